use axum::extract::rejection::JsonRejection;
use axum::http::header::InvalidHeaderValue;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shortly_shortener::ShortenerError;
use thiserror::Error;
use tracing::error;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Shortener(#[from] ShortenerError),
    #[error("expiration_time out of range: {0}")]
    InvalidExpiration(i64),
    #[error("invalid request body: {0}")]
    Payload(#[from] JsonRejection),
    #[error("stored url cannot be used as a redirect target: {0}")]
    Location(#[from] InvalidHeaderValue),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Shortener(err) => match err {
                ShortenerError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
                ShortenerError::NotFound(_) => StatusCode::NOT_FOUND,
                ShortenerError::IdSource(_) => StatusCode::SERVICE_UNAVAILABLE,
                ShortenerError::CodeConflict(_) | ShortenerError::Storage(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            AppError::InvalidExpiration(_) => StatusCode::BAD_REQUEST,
            AppError::Payload(rejection) => rejection.status(),
            AppError::Location(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, status = status.as_u16(), "request failed");
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shortly_core::{IdError, StorageError};

    #[test]
    fn statuses() {
        let cases = [
            (ShortenerError::InvalidUrl("x".into()), StatusCode::BAD_REQUEST),
            (ShortenerError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ShortenerError::IdSource(IdError::Exhausted), StatusCode::SERVICE_UNAVAILABLE),
            (ShortenerError::CodeConflict("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (
                ShortenerError::Storage(StorageError::Timeout("x".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(AppError::from(err).status(), expected);
        }
        assert_eq!(AppError::InvalidExpiration(i64::MAX).status(), StatusCode::BAD_REQUEST);
    }
}
