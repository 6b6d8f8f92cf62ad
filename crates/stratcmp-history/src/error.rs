//! History error types

use std::path::PathBuf;

/// Errors from a [`crate::KeyValueStore`]
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Slot name unusable as a storage key
    #[error("invalid slot name: {0:?}")]
    InvalidSlot(String),

    /// Filesystem failure in a [`crate::FileStore`]
    #[error("i/o error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from [`crate::HistoryLog`] mutations
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// Remove position past the end of the log
    #[error("history block {position} out of range (have {len})")]
    BlockOutOfRange { position: usize, len: usize },

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
