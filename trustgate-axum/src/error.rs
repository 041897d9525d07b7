use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Unknown account")]
    UnknownAccount,

    #[error("History store unavailable")]
    HistoryUnavailable,

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl From<trustgate_core::Error> for ApiError {
    fn from(err: trustgate_core::Error) -> Self {
        if err.is_unknown_account() {
            ApiError::UnknownAccount
        } else if err.is_history_unavailable() {
            // The transport makes no fail-open/fail-closed choice for the
            // caller; it reports the outage distinctly.
            ApiError::HistoryUnavailable
        } else if err.is_validation_error() {
            ApiError::BadRequest(err.to_string())
        } else {
            ApiError::InternalError(err.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            ApiError::UnknownAccount => (StatusCode::NOT_FOUND, "Unknown account"),
            ApiError::HistoryUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "History store unavailable")
            }
            ApiError::InternalError(msg) => {
                tracing::error!(error = %msg, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trustgate_core::error::{AccountError, StorageError};

    #[test]
    fn test_core_errors_map_to_statuses() {
        let err: ApiError =
            trustgate_core::Error::from(AccountError::UnknownAccount("x".into())).into();
        assert!(matches!(err, ApiError::UnknownAccount));

        let err: ApiError = trustgate_core::Error::from(StorageError::Timeout).into();
        assert!(matches!(err, ApiError::HistoryUnavailable));
    }
}
