//! Error types shared across Touchless crates.

use std::path::PathBuf;

/// Top-level error type for Touchless operations.
#[derive(Debug, thiserror::Error)]
pub enum TouchlessError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid landmark data: {message}")]
    Landmark { message: String },

    #[error("Pointer backend error: {message}")]
    Pointer { message: String },

    #[error("Landmark source error: {message}")]
    Source { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using TouchlessError.
pub type TouchlessResult<T> = Result<T, TouchlessError>;

impl TouchlessError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn landmark(msg: impl Into<String>) -> Self {
        Self::Landmark {
            message: msg.into(),
        }
    }

    pub fn pointer(msg: impl Into<String>) -> Self {
        Self::Pointer {
            message: msg.into(),
        }
    }

    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helper_messages() {
        let err = TouchlessError::pointer("button_down failed");
        assert_eq!(err.to_string(), "Pointer backend error: button_down failed");

        let err = TouchlessError::landmark("hand has 3 points");
        assert!(matches!(err, TouchlessError::Landmark { .. }));
    }

    #[test]
    fn test_json_error_converts() {
        let parse: Result<u32, _> = serde_json::from_str("not json");
        let err: TouchlessError = parse.unwrap_err().into();
        assert!(matches!(err, TouchlessError::Json(_)));
    }
}
