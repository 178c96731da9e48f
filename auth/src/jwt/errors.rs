use thiserror::Error;

/// Error type for session token operations.
///
/// Verification failures are kept distinct for diagnostics; callers at the
/// HTTP boundary collapse all of them into a single unauthorized outcome.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid signing configuration: {0}")]
    InvalidKey(String),

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token issuer is invalid")]
    InvalidIssuer,

    #[error("Token is malformed: {0}")]
    Malformed(String),
}
