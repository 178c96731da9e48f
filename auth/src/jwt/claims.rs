use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Session token claims.
///
/// Carries the authenticated identity, the issuing service and the validity
/// window. Tokens are stateless: everything needed to accept or reject one is
/// in these claims plus the signature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Authenticated username
    pub username: String,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user session starting now.
    ///
    /// # Arguments
    /// * `username` - Authenticated username
    /// * `issuer` - Issuer string embedded in the token
    /// * `ttl` - Lifetime of the token
    ///
    /// # Returns
    /// Claims with iat set to now and exp set to now + ttl
    pub fn for_user(username: impl Into<String>, issuer: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            username: username.into(),
            iss: issuer.into(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Override the expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = exp;
        self
    }

    /// Check if the token is expired at the given time.
    ///
    /// A token is valid only while `exp` is strictly in the future.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}
