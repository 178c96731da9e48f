use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Session token issuer and verifier.
///
/// Signs with HS256 and only ever accepts HS256: tokens announcing `none` or
/// any other algorithm are rejected before their claims are looked at.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    ttl: Duration,
}

impl TokenIssuer {
    const ALGORITHM: Algorithm = Algorithm::HS256;

    /// Create a new token issuer.
    ///
    /// # Arguments
    /// * `secret` - Signing key shared by issuance and verification
    /// * `issuer` - Issuer string embedded in and required of every token
    /// * `ttl` - Lifetime of issued tokens
    ///
    /// # Returns
    /// TokenIssuer ready to sign and verify
    ///
    /// # Errors
    /// * `InvalidKey` - Secret or issuer is empty, or ttl is not positive
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Load it from configuration once at startup, never from code
    pub fn new(
        secret: &[u8],
        issuer: impl Into<String>,
        ttl: Duration,
    ) -> Result<Self, TokenError> {
        let issuer = issuer.into();

        if secret.is_empty() {
            return Err(TokenError::InvalidKey("signing secret is empty".to_string()));
        }
        if issuer.trim().is_empty() {
            return Err(TokenError::InvalidKey("issuer is empty".to_string()));
        }
        if ttl <= Duration::zero() {
            return Err(TokenError::InvalidKey("token lifetime must be positive".to_string()));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            issuer,
            ttl,
        })
    }

    /// Issue a session token for a user.
    ///
    /// # Arguments
    /// * `username` - Authenticated username
    ///
    /// # Returns
    /// Signed token expiring `ttl` from now
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(&self, username: &str) -> Result<String, TokenError> {
        let claims = Claims::for_user(username, self.issuer.as_str(), self.ttl);
        self.sign(&claims)
    }

    /// Sign arbitrary claims with the configured key.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Self::ALGORITHM), claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a session token and return its claims.
    ///
    /// # Arguments
    /// * `token` - Compact token string (without scheme prefix)
    ///
    /// # Returns
    /// Verified claims
    ///
    /// # Errors
    /// * `InvalidSignature` - Signature does not match or algorithm is not HS256
    /// * `Expired` - Signature is valid but `exp` is not in the future
    /// * `InvalidIssuer` - Token was issued by someone else
    /// * `Malformed` - Token cannot be decoded
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Self::ALGORITHM);
        validation.leeway = 0;
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss"]);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature
                | ErrorKind::InvalidAlgorithm
                | ErrorKind::InvalidAlgorithmName => TokenError::InvalidSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidIssuer => TokenError::InvalidIssuer,
                _ => TokenError::Malformed(e.to_string()),
            })?;

        // The library accepts exp == now; sessions end at exp.
        if token_data.claims.is_expired(Utc::now().timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(token_data.claims)
    }
}
