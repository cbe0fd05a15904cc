//! Article store error types.

use std::path::PathBuf;
use thiserror::Error;

/// Storage-related errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no article stored under slug `{0}`")]
    NotFound(String),

    #[error("slug `{0}` is not a valid storage key")]
    InvalidSlug(String),

    #[error("corrupt article document `{0}`")]
    Corrupt(PathBuf, #[source] serde_json::Error),

    #[error("IO error when accessing `{0}`")]
    Io(PathBuf, #[source] std::io::Error),
}

impl StoreError {
    /// True for the missing-document case, false for real failures.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
