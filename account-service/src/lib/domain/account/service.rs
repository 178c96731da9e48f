use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::account::errors::AccountError;
use crate::domain::account::id_generator::AccountIdGenerator;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::Registration;
use crate::domain::account::models::Session;
use crate::domain::account::models::Username;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::account::ports::ChallengeVerifier;

/// Domain service implementation for account operations.
///
/// Owns the only mutation path for account state. Password hashing and
/// verification run on the blocking pool so slow hashes never stall the
/// async workers serving other requests.
pub struct AccountService<AR, CV>
where
    AR: AccountRepository,
    CV: ChallengeVerifier,
{
    repository: Arc<AR>,
    challenge_verifier: Arc<CV>,
    authenticator: Arc<Authenticator>,
    id_generator: Arc<AccountIdGenerator>,
}

impl<AR, CV> AccountService<AR, CV>
where
    AR: AccountRepository,
    CV: ChallengeVerifier,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `challenge_verifier` - Bot-challenge verification implementation
    /// * `authenticator` - Password hashing and token issuance
    /// * `id_generator` - Account id generator for this instance
    pub fn new(
        repository: Arc<AR>,
        challenge_verifier: Arc<CV>,
        authenticator: Arc<Authenticator>,
        id_generator: Arc<AccountIdGenerator>,
    ) -> Self {
        Self {
            repository,
            challenge_verifier,
            authenticator,
            id_generator,
        }
    }

    fn issue_token(&self, username: &Username) -> Result<String, AccountError> {
        self.authenticator
            .issue_token(username.as_str())
            .map_err(|e| AccountError::Unknown(format!("Token issuance failed: {}", e)))
    }
}

#[async_trait]
impl<AR, CV> AccountServicePort for AccountService<AR, CV>
where
    AR: AccountRepository,
    CV: ChallengeVerifier,
{
    async fn lookup_username(&self, id: &AccountId) -> Result<Username, AccountError> {
        self.repository
            .find_username_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))
    }

    async fn list_usernames(&self) -> Result<Vec<Username>, AccountError> {
        self.repository.list_usernames().await
    }

    async fn authenticate(
        &self,
        username: &Username,
        password: &str,
    ) -> Result<Username, AccountError> {
        let Some(credential) = self.repository.find_credential(username).await? else {
            tracing::debug!(username = %username, "Authentication failed: unknown user");
            return Err(AccountError::AuthFailed);
        };

        let authenticator = Arc::clone(&self.authenticator);
        let password = password.to_owned();
        let stored_hash = credential.password_hash;
        let matches = tokio::task::spawn_blocking(move || {
            authenticator.verify_password(&password, &stored_hash)
        })
        .await?;

        if !matches {
            tracing::debug!(username = %username, "Authentication failed: password mismatch");
            return Err(AccountError::AuthFailed);
        }

        Ok(credential.username)
    }

    async fn create_account(
        &self,
        username: &Username,
        password: &str,
    ) -> Result<AccountId, AccountError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = password.to_owned();
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(&password)).await??;

        let account = Account {
            id: self.id_generator.generate(),
            username: username.clone(),
            password_hash,
            created_at: Utc::now(),
        };

        match self.repository.insert_if_absent(&account).await {
            Ok(account_id) => {
                tracing::info!(account_id = %account_id, username = %username, "Account created");
                Ok(account_id)
            }
            Err(AccountError::AlreadyExists(existing)) => {
                tracing::warn!(username = %existing, "Username already exists");
                Err(AccountError::AlreadyExists(existing))
            }
            Err(e) => Err(e),
        }
    }

    async fn login(&self, username: &Username, password: &str) -> Result<Session, AccountError> {
        let username = self.authenticate(username, password).await?;
        let token = self.issue_token(&username)?;

        tracing::info!(username = %username, "Session issued");

        Ok(Session { username, token })
    }

    async fn register(&self, command: RegisterCommand) -> Result<Registration, AccountError> {
        let verification = self
            .challenge_verifier
            .verify(&command.challenge_response)
            .await;

        if !verification.accepted {
            tracing::warn!(
                username = %command.username,
                error_codes = ?verification.error_codes,
                "Registration rejected by challenge verification"
            );
            return Err(AccountError::ChallengeRejected);
        }

        let account_id = self
            .create_account(&command.username, &command.password)
            .await?;
        let token = self.issue_token(&command.username)?;

        Ok(Registration {
            account_id,
            username: command.username,
            token,
        })
    }
}
