use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::account::errors::AccountError;

pub mod get_account;
pub mod list_accounts;
pub mod login;
pub mod register;

/// Result codes carried in the `code` field of every response envelope.
pub mod codes {
    pub const SUCCESS: u16 = 0;
    pub const CONNECT_FAILED: u16 = 1;
    pub const AUTH_FAILED: u16 = 4;
    pub const UNKNOWN_ERROR: u16 = 8;
    pub const USER_ALREADY_EXISTS: u16 = 9;
    pub const CHALLENGE_REJECTED: u16 = 11;
    pub const NOT_FOUND: u16 = 12;
    pub const INVALID_INPUT: u16 = 13;
}

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(message, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// HTTP-facing failure.
///
/// Only the status, the code and the public message leave the process;
/// internal detail is logged where the error is converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    ServiceUnavailable,
    Unauthorized,
    InternalServerError,
    Conflict,
    Forbidden,
    NotFound,
    UnprocessableEntity(String),
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Conflict => StatusCode::CONFLICT,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            ApiError::ServiceUnavailable => codes::CONNECT_FAILED,
            ApiError::Unauthorized => codes::AUTH_FAILED,
            ApiError::InternalServerError => codes::UNKNOWN_ERROR,
            ApiError::Conflict => codes::USER_ALREADY_EXISTS,
            ApiError::Forbidden => codes::CHALLENGE_REJECTED,
            ApiError::NotFound => codes::NOT_FOUND,
            ApiError::UnprocessableEntity(_) | ApiError::BadRequest(_) => codes::INVALID_INPUT,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::ServiceUnavailable => "Service unavailable".to_string(),
            ApiError::Unauthorized => "Unauthorized".to_string(),
            ApiError::InternalServerError => "Internal server error".to_string(),
            ApiError::Conflict => "Error: User already exists".to_string(),
            ApiError::Forbidden => "Challenge verification failed".to_string(),
            ApiError::NotFound => "User not found".to_string(),
            ApiError::UnprocessableEntity(msg) | ApiError::BadRequest(msg) => msg.clone(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::UNPROCESSABLE_ENTITY {
            ApiError::UnprocessableEntity(rejection.body_text())
        } else {
            ApiError::BadRequest(rejection.body_text())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            code: self.code(),
            message: self.message(),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::NotFound(_) => ApiError::NotFound,
            AccountError::AlreadyExists(_) => ApiError::Conflict,
            AccountError::AuthFailed => ApiError::Unauthorized,
            AccountError::ChallengeRejected => ApiError::Forbidden,
            AccountError::InvalidUsername(_) => ApiError::UnprocessableEntity(err.to_string()),
            AccountError::InvalidAccountId(_) => ApiError::BadRequest(err.to_string()),
            AccountError::ConnectFailed(_) => {
                tracing::error!(error = %err, "Store unavailable");
                ApiError::ServiceUnavailable
            }
            AccountError::QueryFailed(_)
            | AccountError::ScanFailed(_)
            | AccountError::HashingFailure(_)
            | AccountError::Unknown(_) => {
                tracing::error!(error = %err, "Request failed");
                ApiError::InternalServerError
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    code: u16,
    message: String,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            code: codes::SUCCESS,
            message: message.into(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub code: u16,
    pub message: String,
}
