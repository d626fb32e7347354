//! Error types for the TUI crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TuiError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("transcript {path} is not valid: {source}")]
    InvalidTranscript {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Classify(#[from] relaychat_core::ClassifyError),

    #[error(transparent)]
    Storage(#[from] relaychat_storage::StorageError),
}

pub type TuiResult<T> = Result<T, TuiError>;
