//! Error types for the todo service.
//!
//! # Design
//! `BadRequest` and `NotFound` are the two failures a caller is expected to
//! handle: both are raised before the store is mutated and carry a message
//! that is safe to show to the client. Everything else (store or encoding
//! failures) is fatal to the request and maps to a 500.

use thiserror::Error;

use crate::http::HttpStatus;

/// Errors raised by a `TodoStore` implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A stored document could not be decoded into a `Todo`.
    #[error("malformed todo document: {0}")]
    Malformed(String),

    /// The backing database reported a failure.
    #[error("store backend failed: {0}")]
    Backend(String),
}

/// Errors returned by `TodoController` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request carried a malformed id, filter value or body.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The id was well formed but no todo has it.
    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// The response payload could not be encoded as JSON.
    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status this error is reported with.
    pub fn status(&self) -> HttpStatus {
        match self {
            ApiError::BadRequest(_) => HttpStatus::BadRequest,
            ApiError::NotFound(_) => HttpStatus::NotFound,
            ApiError::Store(_) | ApiError::Encode(_) => HttpStatus::InternalServerError,
        }
    }
}
