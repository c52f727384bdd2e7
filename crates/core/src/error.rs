use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for dashchat-core
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types shared by the dashchat crates
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error for file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Parse/serialization errors
    #[error("parse error: {0}")]
    Parse(String),

    /// Persisted UI state could not be read or written
    #[error("state store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors raised by the on-disk stores under the state directory
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },

    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },

    #[error("corrupt state file {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("could not determine home directory")]
    NoHomeDir,
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(format!("TOML parse error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Config("missing profile".to_string());
        assert_eq!(err.to_string(), "configuration error: missing profile");

        let err = Error::Parse("expected value at line 1".to_string());
        assert_eq!(err.to_string(), "parse error: expected value at line 1");
    }

    #[test]
    fn test_store_error_wraps() {
        let err: Error = StoreError::NoHomeDir.into();
        assert_eq!(err.to_string(), "state store error: could not determine home directory");

        let err: Error =
            StoreError::Corrupt { path: PathBuf::from("/tmp/w.json"), reason: "expected map".to_string() }.into();
        assert!(err.to_string().contains("/tmp/w.json"));
    }

    #[test]
    fn test_io_error_from() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
