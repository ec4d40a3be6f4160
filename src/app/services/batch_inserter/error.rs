//! Storage failure types

use std::path::PathBuf;
use thiserror::Error;

/// Backend failure while bootstrapping the table or inserting a batch
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to open database '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to create table '{table}': {source}")]
    CreateTable {
        table: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("batch insert into '{table}' failed: {source}")]
    Insert {
        table: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("invalid table name '{table}'")]
    InvalidTable { table: String },

    #[error("no rows to insert into '{table}'")]
    EmptyBatch { table: String },

    #[error("{message}")]
    Backend { message: String },
}

impl StorageError {
    /// Create a backend error for stores not built on rusqlite
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}
