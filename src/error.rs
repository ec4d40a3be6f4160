//! Error handling for event loading operations.
//!
//! Each stage owns its own error type ([`ParseError`], [`StorageError`],
//! [`LockError`]); this module unifies them with file system and
//! configuration failures into the crate-wide [`Error`].

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::app::services::batch_inserter::StorageError;
use crate::app::services::csv_parser::ParseError;
use crate::app::services::file_processor::LockError;
use crate::constants::exit_codes;

/// Result type alias for the event loader
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Lock error: {0}")]
    Lock(#[from] LockError),

    #[error("File system error for '{}': {message}", .path.display())]
    FileSystem {
        path: PathBuf,
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A file-level failure; the file is skipped and the run continues
    #[error("File '{}' rejected: {source}", .path.display())]
    FileRejected {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a file system error with context
    pub fn file_system(
        path: impl AsRef<Path>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Wrap a stage failure as the rejection of one file
    pub fn file_rejected(path: impl AsRef<Path>, source: Error) -> Self {
        Self::FileRejected {
            path: path.as_ref().to_path_buf(),
            source: Box::new(source),
        }
    }

    /// Innermost error, unwrapping file rejections
    pub fn root(&self) -> &Error {
        match self {
            Self::FileRejected { source, .. } => source.root(),
            other => other,
        }
    }

    /// Process exit status for a run that ended with this error
    pub fn exit_code(&self) -> u8 {
        match self.root() {
            Self::Lock(LockError::Held { .. }) => exit_codes::LOCK_CONTENTION,
            _ => exit_codes::FAILURE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_contention_has_distinct_exit_code() {
        let error = Error::from(LockError::Held {
            path: PathBuf::from("/data/in/.event-loader.lock"),
        });
        assert_eq!(error.exit_code(), exit_codes::LOCK_CONTENTION);

        let config_error = Error::configuration("bad table name");
        assert_eq!(config_error.exit_code(), exit_codes::FAILURE);
    }

    #[test]
    fn test_file_rejected_exposes_root_cause() {
        let error = Error::file_rejected("in/a.csv", ParseError::NoValidLines.into());

        assert!(matches!(error.root(), Error::Parse(ParseError::NoValidLines)));
        assert_eq!(
            error.to_string(),
            "File 'in/a.csv' rejected: Parse error: no valid lines in file"
        );
    }
}
