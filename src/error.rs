//! Error types for csvpeek.
//!
//! This module provides a unified error handling approach using `thiserror`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for csvpeek operations.
pub type Result<T> = std::result::Result<T, CsvPeekError>;

/// Errors that can occur in csvpeek.
#[derive(Debug, Error)]
pub enum CsvPeekError {
    /// The CSV source could not be opened or read.
    #[error("Failed to load dataset {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV content is structurally unreadable.
    #[error("Failed to parse CSV {path}: {reason}")]
    ParseFailure { path: PathBuf, reason: String },

    /// Failed to access clipboard.
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),

    /// Failed to hand a link or image to the system opener.
    #[error("Failed to open {target}: {source}")]
    Launch {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CsvPeekError {
    /// Create a SourceUnavailable error.
    pub fn source_unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SourceUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Create a ParseFailure error.
    pub fn parse_failure(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ParseFailure {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a Launch error.
    pub fn launch(target: impl Into<String>, source: std::io::Error) -> Self {
        Self::Launch {
            target: target.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_error_messages_name_the_source() {
        let err = CsvPeekError::source_unavailable(
            "data/csv/cats.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert_eq!(
            err.to_string(),
            "Failed to load dataset data/csv/cats.csv: not found"
        );

        let err = CsvPeekError::parse_failure("cats.csv", "invalid UTF-8 in header");
        assert_eq!(
            err.to_string(),
            "Failed to parse CSV cats.csv: invalid UTF-8 in header"
        );
    }

    #[test]
    fn test_launch_error_names_the_target() {
        let err = CsvPeekError::launch(
            "https://example.com",
            std::io::Error::new(std::io::ErrorKind::Other, "no browser"),
        );
        assert_eq!(
            err.to_string(),
            "Failed to open https://example.com: no browser"
        );
    }
}
