//! Request-level error taxonomy and HTTP mapping.
//!
//! Every domain failure surfaces directly to the caller as a status code and
//! a `{"error": "..."}` body; nothing is retried. Backend failures are logged
//! where they are mapped, since that is the only place they are observed.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::storage::StorageError;

/// Errors returned by the credential and feedback services.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Signup with an email that already has an account.
    #[error("Email already exists")]
    DuplicateEmail,

    /// Login with an email no user has.
    #[error("User not found")]
    NotFound,

    /// Login with a wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// A required field was absent or the body was malformed.
    #[error("Invalid request body: {0}")]
    ValidationMissing(String),

    /// Ownership policy rejected a mutation by a non-owner.
    #[error("Not allowed to modify this feedback")]
    Forbidden,

    /// The backend store failed; the underlying message is passed through.
    #[error("{0}")]
    Backend(StorageError),

    /// Anything else (hashing, header encoding, ...).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::DuplicateEmail => Self::DuplicateEmail,
            other => Self::Backend(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::DuplicateEmail | Self::ValidationMissing(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Backend(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed: {self}");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_email_message_matches_contract() {
        // The client matches on this exact string.
        assert_eq!(ApiError::DuplicateEmail.to_string(), "Email already exists");
    }

    #[test]
    fn test_storage_duplicate_maps_to_api_duplicate() {
        let err: ApiError = StorageError::DuplicateEmail.into();
        assert!(matches!(err, ApiError::DuplicateEmail));

        let err: ApiError = StorageError::read("boom").into();
        assert!(matches!(err, ApiError::Backend(_)));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::InvalidCredentials.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::DuplicateEmail.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Forbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::Backend(StorageError::write("x")).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
