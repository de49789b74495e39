//! Error types for the reading list core

use thiserror::Error;

/// Result type alias using ReadingListError
pub type Result<T> = std::result::Result<T, ReadingListError>;

/// Top-level error type for all reading list operations
#[derive(Debug, Error)]
pub enum ReadingListError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Markup error: {0}")]
    Markup(#[from] quick_xml::Error),
}

/// Errors reported by the entry store
///
/// Missing images and missing render templates are not errors anywhere in
/// this crate; they degrade to omission and empty output respectively.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Entry store unavailable: {0}")]
    Unavailable(String),

    #[error("Content type '{0}' already registered with a different shape")]
    Conflict(String),

    #[error("Unknown content type: {0}")]
    UnknownType(String),
}

/// Result type for entry store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;
