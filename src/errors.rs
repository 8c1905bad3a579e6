use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::error::DbErr;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard error payload returned by every handler.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status category (e.g., "Not Found", "Bad Request")
    pub error: String,
    /// Human-readable error description
    pub message: String,
    /// ISO 8601 timestamp when the error occurred
    pub timestamp: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::error::DbErr),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unknown product group: {0}")]
    InvalidGroup(String),

    /// A CSV data row that cannot be turned into a normalized record.
    /// Any occurrence aborts the whole upload batch.
    #[error("Malformed CSV row at line {line}: {reason}")]
    RowParse { line: u64, reason: String },

    /// A field value outside the enumerated domain declared by the
    /// product group's schema.
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    /// Lookup and mutation disagreed about a product mid-merge. Should be
    /// unreachable; surfaced instead of silently proceeding.
    #[error("Merge inconsistency: {0}")]
    MergeInconsistency(String),

    #[error("Transaction conflict: {0}")]
    TransactionConflict(String),

    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

impl ServiceError {
    /// Returns the HTTP status code for this error.
    /// Single source of truth for the error-to-status mapping.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::DatabaseError(_) | Self::InternalError(_) | Self::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::MergeInconsistency(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ValidationError(_)
            | Self::InvalidGroup(_)
            | Self::RowParse { .. }
            | Self::InvalidOperation(_) => StatusCode::BAD_REQUEST,
            Self::SchemaViolation(_) | Self::InsufficientStock(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Conflict(_) | Self::TransactionConflict(_) => StatusCode::CONFLICT,
        }
    }

    /// Message suitable for HTTP responses. Internal errors collapse to a
    /// generic message so storage details never leak to clients.
    pub fn response_message(&self) -> String {
        match self {
            Self::DatabaseError(_) => "Database error".to_string(),
            Self::InternalError(_) | Self::Other(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }

    /// Classifies a commit/write failure, promoting storage-level write
    /// conflicts to `TransactionConflict` so callers can retry the batch.
    pub fn from_write_err(err: DbErr) -> Self {
        let msg = err.to_string();
        let lowered = msg.to_ascii_lowercase();
        if lowered.contains("40001")
            || lowered.contains("serialization")
            || lowered.contains("deadlock")
            || lowered.contains("database is locked")
        {
            ServiceError::TransactionConflict(msg)
        } else {
            ServiceError::DatabaseError(err)
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let err = ErrorResponse {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: self.response_message(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(err)).into_response()
    }
}
