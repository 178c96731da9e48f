use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::AccountId;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_account(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(account_id): Path<String>,
) -> Result<ApiSuccess<GetAccountResponseData>, ApiError> {
    let account_id =
        AccountId::from_string(&account_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    tracing::debug!(caller = %caller.username, account_id = %account_id, "Looking up account");

    state
        .account_service
        .lookup_username(&account_id)
        .await
        .map_err(ApiError::from)
        .map(|username| {
            ApiSuccess::new(
                StatusCode::OK,
                "User found",
                GetAccountResponseData {
                    account_id: account_id.to_string(),
                    username: username.as_str().to_string(),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetAccountResponseData {
    pub account_id: String,
    pub username: String,
}
