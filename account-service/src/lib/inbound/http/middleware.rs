use std::sync::Arc;

use auth::Authenticator;
use auth::TokenError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use thiserror::Error;

use crate::inbound::http::handlers::ApiError;

/// Extension type to store the authenticated caller in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub username: String,
}

/// Reasons a request is turned away by the gate.
///
/// All of them produce the same response; the variant is only logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthGateError {
    #[error("Missing Authorization header")]
    MissingCredential,

    #[error("Authorization header is not a bearer credential")]
    MalformedHeader,

    #[error("Token rejected: {0}")]
    Token(#[from] TokenError),
}

impl IntoResponse for AuthGateError {
    fn into_response(self) -> Response {
        tracing::warn!(reason = %self, "Request rejected by auth gate");
        ApiError::Unauthorized.into_response()
    }
}

/// Middleware that validates bearer tokens and adds the caller to request
/// extensions. The downstream handler only runs for valid tokens.
pub async fn authenticate(
    State(authenticator): State<Arc<Authenticator>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthGateError> {
    let token = extract_token_from_header(&req)?;

    let claims = authenticator.validate_token(token)?;

    req.extensions_mut().insert(AuthenticatedUser {
        username: claims.username,
    });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, AuthGateError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthGateError::MissingCredential)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthGateError::MalformedHeader)?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(AuthGateError::MalformedHeader),
    }
}
