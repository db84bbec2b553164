use axum::Json;
use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use storefront_core::Error as StoreError;

/// Errors returned by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("malformed request: {0}")]
    Rejected(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Rejected(_) => StatusCode::BAD_REQUEST,
            Self::Store(StoreError::MalformedInput(_)) => StatusCode::BAD_REQUEST,
            Self::Store(StoreError::ConstraintViolation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Store(StoreError::ConnectionFailure(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Store(StoreError::InvalidModel(_) | StoreError::Db(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Rejected(_) | Self::Store(StoreError::MalformedInput(_)) => "malformed_input",
            Self::Store(StoreError::ConstraintViolation(_)) => "constraint_violation",
            Self::Store(StoreError::ConnectionFailure(_)) => "connection_failure",
            Self::Store(StoreError::InvalidModel(_) | StoreError::Db(_)) => "internal",
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::Rejected(message) => message.clone(),
            Self::Store(StoreError::MalformedInput(message)) => message.clone(),
            Self::Store(StoreError::ConstraintViolation(_)) => {
                "request violates a data constraint".to_string()
            }
            Self::Store(StoreError::ConnectionFailure(_)) => "database unavailable".to_string(),
            Self::Store(_) => "internal error".to_string(),
        }
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        Self::Rejected(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(event = "request_failed", status = status.as_u16(), error = %self);
        }
        let body = ErrorBody {
            error: self.code(),
            message: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_store_errors_to_statuses() {
        let cases = [
            (StoreError::MalformedInput("x".into()), StatusCode::BAD_REQUEST),
            (
                StoreError::ConstraintViolation("x".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                StoreError::ConnectionFailure("x".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (StoreError::Db("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status_code(), status);
        }
    }

    #[test]
    fn internal_details_stay_out_of_the_body() {
        let err = ApiError::from(StoreError::Db("disk I/O error at page 7".into()));
        assert_eq!(err.code(), "internal");
        assert_eq!(err.public_message(), "internal error");
    }
}
