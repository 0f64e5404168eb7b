//! Typed error handling for the point-of-sale API
//!
//! Repositories and handlers return [`ApiError`], which carries enough
//! information to pick the HTTP status and the `{ "error": message }` body
//! without leaking internal details to the caller.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: malformed, missing or out-of-range input (400)
//! - [`ConflictError`]: duplicate unique key (409)
//! - [`NotFoundError`]: unknown record id (404)
//! - [`RequestError`]: unusable request (bad id, bad JSON, bad filter) (400)
//! - [`StorageError`]: the JSON document could not be read or written (500)
//!
//! # Example
//!
//! ```rust,ignore
//! match repository.get(id).await {
//!     Ok(item) => println!("Found: {:?}", item),
//!     Err(ApiError::NotFound(e)) => println!("{}", e),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use super::entity::RecordId;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type returned by repositories and handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input failed a validation rule
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A unique key is already taken
    #[error(transparent)]
    Conflict(#[from] ConflictError),

    /// The requested record does not exist
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The request itself could not be interpreted
    #[error(transparent)]
    Request(#[from] RequestError),

    /// The document could not be persisted or loaded
    #[error(transparent)]
    Persistence(#[from] StorageError),

    /// A persistence failure reported with a fixed, endpoint-specific message
    #[error("{message}")]
    Internal {
        message: &'static str,
        #[source]
        source: StorageError,
    },
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Request(_) => StatusCode::BAD_REQUEST,
            ApiError::Persistence(_) | ApiError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Request(e) => e.error_code(),
            ApiError::Persistence(_) | ApiError::Internal { .. } => "PERSISTENCE_FAILURE",
        }
    }

    /// Replace the message of a persistence failure with a fixed one
    ///
    /// Other errors are returned unchanged, so handlers can apply this to
    /// every repository result.
    pub fn for_endpoint(self, message: &'static str) -> Self {
        match self {
            ApiError::Persistence(source) => ApiError::Internal { message, source },
            other => other,
        }
    }

    /// Message safe to return to the caller
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Persistence(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.public_message(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            let cause = match &self {
                ApiError::Internal { source, .. } => source.to_string(),
                other => other.to_string(),
            };
            tracing::error!(code = self.error_code(), %cause, "{}", self.public_message());
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// A violated validation rule
///
/// The message is shown to the caller verbatim and names the rule.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

// =============================================================================
// Conflict Errors
// =============================================================================

/// Errors raised when a unique key is already taken
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConflictError {
    /// Another record already uses this name (case-insensitive)
    #[error("{label} with this name already exists.")]
    DuplicateName { label: &'static str, name: String },
}

// =============================================================================
// Not Found Errors
// =============================================================================

/// Error raised when no record has the requested id
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{label} not found")]
pub struct NotFoundError {
    pub label: &'static str,
    pub id: RecordId,
}

impl NotFoundError {
    pub fn new(label: &'static str, id: RecordId) -> Self {
        Self { label, id }
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to the shape of the HTTP request
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    /// Path id is not an integer
    #[error("Invalid id")]
    InvalidId { value: String },

    /// Body is not valid JSON
    #[error("Invalid JSON body")]
    InvalidBody { message: String },

    /// `filter` query parameter is not a JSON object
    #[error("Invalid filter: {message}")]
    InvalidFilter { message: String },
}

impl RequestError {
    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidId { .. } => "INVALID_ID",
            RequestError::InvalidBody { .. } => "INVALID_BODY",
            RequestError::InvalidFilter { .. } => "INVALID_FILTER",
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by the JSON document store
#[derive(Debug, Error)]
pub enum StorageError {
    /// The document file exists but could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document file is not valid JSON for the expected layout
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The in-memory document could not be serialized
    #[error("failed to encode document: {0}")]
    Encode(#[source] serde_json::Error),

    /// The document could not be written back
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for repository and handler operations
pub type ApiResult<T> = Result<T, ApiError>;
