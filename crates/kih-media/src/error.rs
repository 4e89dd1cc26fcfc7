//! Media storage error types.

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// Object storage request failed.
    #[error("object storage error: {0}")]
    Store(#[from] object_store::Error),

    /// Object key could not be parsed.
    #[error("invalid object key: {0}")]
    InvalidKey(#[from] object_store::path::Error),

    /// URL does not point into the configured public bucket.
    #[error("not a media URL: {0}")]
    ForeignUrl(String),

    /// Upload rejected before reaching the store.
    #[error("invalid upload: {0}")]
    InvalidUpload(String),

    /// No randomness available for the object key tag.
    #[error("failed to generate object key tag: {0}")]
    KeyTag(#[from] getrandom::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
