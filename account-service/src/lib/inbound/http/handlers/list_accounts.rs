use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn list_accounts(
    State(state): State<AppState>,
) -> Result<ApiSuccess<ListAccountsResponseData>, ApiError> {
    state
        .account_service
        .list_usernames()
        .await
        .map_err(ApiError::from)
        .map(|usernames| {
            ApiSuccess::new(
                StatusCode::OK,
                format!("{} users", usernames.len()),
                ListAccountsResponseData {
                    usernames: usernames
                        .iter()
                        .map(|username| username.as_str().to_string())
                        .collect(),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListAccountsResponseData {
    pub usernames: Vec<String>,
}
