use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::Session;
use crate::domain::account::models::Username;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

/// Authenticate and issue a session token.
///
/// The token is returned both in the body and in the `Authorization`
/// response header.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;

    // A name that could never have been registered fails like any other
    // unknown user.
    let username = Username::new(body.username).map_err(|_| ApiError::Unauthorized)?;

    let session = state
        .account_service
        .login(&username, &body.password)
        .await
        .map_err(ApiError::from)?;

    let authorization = format!("Bearer {}", session.token);
    let response = ApiSuccess::new(
        StatusCode::OK,
        format!("{} login successful", session.username),
        LoginResponseData::from(&session),
    );

    Ok(([(header::AUTHORIZATION, authorization)], response))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub username: String,
    pub token: String,
}

impl From<&Session> for LoginResponseData {
    fn from(session: &Session) -> Self {
        Self {
            username: session.username.as_str().to_string(),
            token: session.token.clone(),
        }
    }
}
