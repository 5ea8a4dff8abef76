//! Translation of domain errors into HTTP responses

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::domain::{DomainError, FieldErrors};
use shared::{ErrorResponse, DETAIL, NON_FIELD_ERRORS};

/// Error returned by every REST handler
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Malformed request body: {0}")]
    MalformedBody(#[from] JsonRejection),
    /// A path id that is not an integer cannot name any record
    #[error("Invalid resource id: {0}")]
    InvalidId(#[from] PathRejection),
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::Domain(DomainError::InvalidFields(errors))
    }
}

impl ApiError {
    fn status_and_body(self) -> (StatusCode, ErrorResponse) {
        let mut body = ErrorResponse::new();
        match self {
            ApiError::Domain(DomainError::InvalidFields(errors)) => {
                (StatusCode::BAD_REQUEST, errors.into_map())
            }
            ApiError::Domain(DomainError::InvalidJournalEntry(violations)) => {
                body.insert(
                    NON_FIELD_ERRORS.to_string(),
                    violations.iter().map(ToString::to_string).collect(),
                );
                (StatusCode::BAD_REQUEST, body)
            }
            ApiError::Domain(DomainError::NotFound { .. }) | ApiError::InvalidId(_) => {
                body.insert(DETAIL.to_string(), vec!["Not found.".to_string()]);
                (StatusCode::NOT_FOUND, body)
            }
            ApiError::Domain(DomainError::Storage(e)) => {
                error!("Storage failure: {:?}", e);
                body.insert(DETAIL.to_string(), vec!["Internal server error.".to_string()]);
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
            ApiError::MalformedBody(rejection) => {
                body.insert(DETAIL.to_string(), vec![rejection.body_text()]);
                (StatusCode::BAD_REQUEST, body)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
