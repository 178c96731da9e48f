use thiserror::Error;

/// Error for AccountId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountIdError {
    #[error("Invalid account ID format: {0}")]
    InvalidFormat(String),

    #[error("Account ID must be positive, got {0}")]
    NotPositive(i64),
}

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Error for identifier generator construction
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdGeneratorError {
    #[error("Node ID out of range: maximum {max}, got {actual}")]
    NodeIdOutOfRange { max: u16, actual: u16 },
}

/// Top-level error for all account-related operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid account ID: {0}")]
    InvalidAccountId(#[from] AccountIdError),

    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    // Domain-level errors
    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("User already exists: {0}")]
    AlreadyExists(String),

    #[error("Authentication failed")]
    AuthFailed,

    #[error("Challenge verification rejected")]
    ChallengeRejected,

    #[error("Password hashing failed: {0}")]
    HashingFailure(String),

    // Infrastructure errors
    #[error("Store connection failed: {0}")]
    ConnectFailed(String),

    #[error("Store query failed: {0}")]
    QueryFailed(String),

    #[error("Store row decoding failed: {0}")]
    ScanFailed(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<auth::PasswordError> for AccountError {
    fn from(err: auth::PasswordError) -> Self {
        AccountError::HashingFailure(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AccountError {
    fn from(err: tokio::task::JoinError) -> Self {
        AccountError::Unknown(format!("Blocking task failed: {}", err))
    }
}
