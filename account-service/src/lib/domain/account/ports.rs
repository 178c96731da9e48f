use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::ChallengeVerification;
use crate::domain::account::models::Credential;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::Registration;
use crate::domain::account::models::Session;
use crate::domain::account::models::Username;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Resolve the username of an account.
    ///
    /// # Errors
    /// * `NotFound` - No account with this id
    /// * `ConnectFailed` / `QueryFailed` / `ScanFailed` - Store failure
    async fn lookup_username(&self, id: &AccountId) -> Result<Username, AccountError>;

    /// List all usernames in store order.
    ///
    /// # Errors
    /// * `ConnectFailed` / `QueryFailed` / `ScanFailed` - Store failure
    async fn list_usernames(&self) -> Result<Vec<Username>, AccountError>;

    /// Check a username/password pair.
    ///
    /// Unknown users and wrong passwords are indistinguishable.
    ///
    /// # Errors
    /// * `AuthFailed` - Credentials do not match an account
    /// * `ConnectFailed` / `QueryFailed` / `ScanFailed` - Store failure
    async fn authenticate(&self, username: &Username, password: &str)
        -> Result<Username, AccountError>;

    /// Create an account, atomically with respect to username uniqueness.
    ///
    /// # Errors
    /// * `AlreadyExists` - Username is already taken
    /// * `HashingFailure` - Password could not be hashed
    /// * `ConnectFailed` / `QueryFailed` / `ScanFailed` - Store failure
    async fn create_account(
        &self,
        username: &Username,
        password: &str,
    ) -> Result<AccountId, AccountError>;

    /// Authenticate and issue a session token.
    ///
    /// # Errors
    /// * `AuthFailed` - Credentials do not match an account
    /// * `Unknown` - Token issuance failed
    async fn login(&self, username: &Username, password: &str) -> Result<Session, AccountError>;

    /// Verify the bot challenge, create the account and issue a session token.
    ///
    /// # Errors
    /// * `ChallengeRejected` - Challenge failed; nothing was written
    /// * `AlreadyExists` - Username is already taken
    /// * `Unknown` - Token issuance failed
    async fn register(&self, command: RegisterCommand) -> Result<Registration, AccountError>;
}

/// Persistence operations for the account aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Insert an account unless its username is taken, as one atomic statement.
    ///
    /// # Returns
    /// Id of the stored account
    ///
    /// # Errors
    /// * `AlreadyExists` - Username is already taken
    /// * `ConnectFailed` / `QueryFailed` / `ScanFailed` - Store failure
    async fn insert_if_absent(&self, account: &Account) -> Result<AccountId, AccountError>;

    /// Retrieve the username of an account.
    ///
    /// # Returns
    /// Optional username (None if not found)
    async fn find_username_by_id(&self, id: &AccountId) -> Result<Option<Username>, AccountError>;

    /// Retrieve the stored credential for a username.
    ///
    /// # Returns
    /// Optional credential (None if not found)
    async fn find_credential(&self, username: &Username)
        -> Result<Option<Credential>, AccountError>;

    /// Retrieve all usernames.
    async fn list_usernames(&self) -> Result<Vec<Username>, AccountError>;
}

/// Third-party bot-challenge verification.
///
/// Implementations fail closed: any failure to obtain a definite positive
/// answer yields a rejected verification.
#[async_trait]
pub trait ChallengeVerifier: Send + Sync + 'static {
    async fn verify(&self, challenge_response: &str) -> ChallengeVerification;
}
