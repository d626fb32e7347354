//! Error types for the core crate.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Message classification error.
    #[error("classification error: {0}")]
    Classify(#[from] ClassifyError),

    /// Storage error.
    #[error("storage error: {0}")]
    Storage(#[from] relaychat_storage::StorageError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid JSON/JSONC syntax.
    #[error("invalid config at {path}: {message}")]
    InvalidJson { path: String, message: String },

    /// Environment override has an unusable value.
    #[error("invalid value for {name}: {value}")]
    InvalidEnv { name: String, value: String },

    /// A config file field parsed but is out of range.
    #[error("invalid {field} in {path}: {message}")]
    InvalidValue {
        path: String,
        field: &'static str,
        message: String,
    },
}

/// Message classification errors.
///
/// These signal a contract violation between the message source and the
/// renderer. They are never recovered with a default rendering.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// The message kind is not one the renderer knows.
    #[error("unknown message kind '{kind}' for message {id}")]
    UnknownKind { id: String, kind: String },

    /// The kind is known but the payload does not match it.
    #[error("malformed {kind} message {id}: {source}")]
    MalformedPayload {
        id: String,
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_kind_message() {
        let err = ClassifyError::UnknownKind {
            id: "msg_1".to_string(),
            kind: "agent-thought".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unknown message kind 'agent-thought' for message msg_1"
        );
    }

    #[test]
    fn test_classify_error_converts_to_core_error() {
        let err: CoreError = ClassifyError::UnknownKind {
            id: "msg_1".to_string(),
            kind: "x".to_string(),
        }
        .into();
        assert!(matches!(err, CoreError::Classify(_)));
        assert!(err.to_string().starts_with("classification error"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidEnv {
            name: "RELAYCHAT_HISTORY_MAX".to_string(),
            value: "lots".to_string(),
        };
        assert_eq!(err.to_string(), "invalid value for RELAYCHAT_HISTORY_MAX: lots");
    }
}
