//! Request-scoped errors for the customer routes.
//!
//! Every failure keeps its kind and cause for logs and tests, but the HTTP
//! contract is flat: status 400 with a fixed plain-text message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Body returned for every failed customer operation.
pub const GENERIC_ERROR_MESSAGE: &str = "Oops! Something went wrong!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerErrorKind {
    Cast,
    Validation,
    MalformedBody,
    Database,
}

#[derive(Debug, Error)]
pub enum CustomerError {
    #[error("Cast to {expected} failed for field `{field}`")]
    Cast {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl CustomerError {
    pub fn kind(&self) -> CustomerErrorKind {
        match self {
            CustomerError::Cast { .. } => CustomerErrorKind::Cast,
            CustomerError::Validation(_) => CustomerErrorKind::Validation,
            CustomerError::MalformedBody(_) => CustomerErrorKind::MalformedBody,
            CustomerError::Database(_) | CustomerError::Unavailable(_) => {
                CustomerErrorKind::Database
            }
        }
    }
}

impl IntoResponse for CustomerError {
    fn into_response(self) -> Response {
        tracing::warn!(kind = ?self.kind(), error = %self, "Customer operation failed");
        (StatusCode::BAD_REQUEST, GENERIC_ERROR_MESSAGE).into_response()
    }
}
