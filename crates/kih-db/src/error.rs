//! Database error types for kih-db.

use thiserror::Error;

/// Errors from document store operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// A write targeted a document that does not exist.
    #[error("Document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    /// A query constraint cannot be expressed (bad field name, unsupported value).
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// A stored document does not match the expected entity shape.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// JSON encoding of a document body failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
