use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::Credential;
use crate::domain::account::models::Username;
use crate::domain::account::ports::AccountRepository;

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Classify a driver error into the store failure kinds.
fn store_error(e: sqlx::Error) -> AccountError {
    match &e {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => AccountError::ConnectFailed(e.to_string()),
        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnIndexOutOfBounds { .. } => AccountError::ScanFailed(e.to_string()),
        _ => AccountError::QueryFailed(e.to_string()),
    }
}

fn scan_username(raw: String) -> Result<Username, AccountError> {
    Username::new(raw).map_err(|e| AccountError::ScanFailed(e.to_string()))
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn insert_if_absent(&self, account: &Account) -> Result<AccountId, AccountError> {
        let inserted = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO accounts (account_id, username, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (username) DO NOTHING
            RETURNING account_id
            "#,
        )
        .bind(account.id.as_i64())
        .bind(account.username.as_str())
        .bind(&account.password_hash)
        .bind(account.created_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        inserted
            .map(AccountId)
            .ok_or_else(|| AccountError::AlreadyExists(account.username.as_str().to_string()))
    }

    async fn find_username_by_id(&self, id: &AccountId) -> Result<Option<Username>, AccountError> {
        let row = sqlx::query_scalar::<_, String>(
            r#"
            SELECT username
            FROM accounts
            WHERE account_id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.map(scan_username).transpose()
    }

    async fn find_credential(
        &self,
        username: &Username,
    ) -> Result<Option<Credential>, AccountError> {
        let row = sqlx::query_as::<_, (String, String)>(
            r#"
            SELECT username, password_hash
            FROM accounts
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        match row {
            Some((username, password_hash)) => Ok(Some(Credential {
                username: scan_username(username)?,
                password_hash,
            })),
            None => Ok(None),
        }
    }

    async fn list_usernames(&self) -> Result<Vec<Username>, AccountError> {
        let rows = sqlx::query_scalar::<_, String>(
            r#"
            SELECT username
            FROM accounts
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        rows.into_iter().map(scan_username).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_classification() {
        assert!(matches!(
            store_error(sqlx::Error::PoolTimedOut),
            AccountError::ConnectFailed(_)
        ));
        assert!(matches!(
            store_error(sqlx::Error::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused"
            ))),
            AccountError::ConnectFailed(_)
        ));
        assert!(matches!(
            store_error(sqlx::Error::ColumnNotFound("username".to_string())),
            AccountError::ScanFailed(_)
        ));
        assert!(matches!(
            store_error(sqlx::Error::RowNotFound),
            AccountError::QueryFailed(_)
        ));
    }

    #[test]
    fn test_scan_username_rejects_invalid_rows() {
        assert!(scan_username("alice".to_string()).is_ok());
        assert!(matches!(
            scan_username("a".to_string()),
            Err(AccountError::ScanFailed(_))
        ));
    }
}
