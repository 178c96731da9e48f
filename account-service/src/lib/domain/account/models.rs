use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::account::errors::AccountIdError;
use crate::domain::account::errors::UsernameError;

/// Account aggregate entity.
///
/// Identity fields are fixed at creation. The password hash never leaves the
/// domain and storage layers.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub username: Username,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Stored credential of an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: Username,
    pub password_hash: String,
}

/// Account unique identifier type
///
/// Time-ordered 64-bit identifier, see [`AccountIdGenerator`](super::id_generator::AccountIdGenerator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(pub i64);

impl AccountId {
    /// Parse an account ID from its decimal string form.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a decimal 64-bit integer
    /// * `NotPositive` - Value is zero or negative
    pub fn from_string(s: &str) -> Result<Self, AccountIdError> {
        let value = s
            .parse::<i64>()
            .map_err(|e| AccountIdError::InvalidFormat(e.to_string()))?;

        if value <= 0 {
            return Err(AccountIdError::NotPositive(value));
        }

        Ok(Self(value))
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for AccountId {
    type Err = AccountIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

/// Username value type
///
/// Ensures username is 3-32 characters and contains only alphanumeric, underscore, and hyphen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 32 characters
    /// * `InvalidCharacters` - Contains non-alphanumeric characters (except _ and -)
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    /// Get username as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new account.
///
/// `challenge_response` is the token the client obtained from the bot
/// challenge widget; it is checked before anything is written.
#[derive(Debug)]
pub struct RegisterCommand {
    pub username: Username,
    pub password: String,
    pub challenge_response: String,
}

impl RegisterCommand {
    pub fn new(username: Username, password: String, challenge_response: String) -> Self {
        Self {
            username,
            password,
            challenge_response,
        }
    }
}

/// Outcome of a successful registration.
#[derive(Debug, Clone)]
pub struct Registration {
    pub account_id: AccountId,
    pub username: Username,
    pub token: String,
}

/// Outcome of a successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub username: Username,
    pub token: String,
}

/// Result of a bot-challenge verification round trip.
///
/// Diagnostic fields are only populated when the verification endpoint
/// answered with a well-formed body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChallengeVerification {
    pub accepted: bool,
    pub hostname: Option<String>,
    pub challenge_ts: Option<String>,
    pub error_codes: Vec<String>,
}

impl ChallengeVerification {
    /// Rejected verification with no diagnostics.
    pub fn rejected() -> Self {
        Self::default()
    }

    pub fn accepted() -> Self {
        Self {
            accepted: true,
            ..Self::default()
        }
    }
}
