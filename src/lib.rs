//! Event Loader Library
//!
//! Loads comma-separated event files dropped into an input directory into a
//! SQLite table, one batch per file.
//!
//! This library provides tools for:
//! - Validating headers against the five-column event schema in any order
//! - Validating rows and skipping the bad ones with a logged reason
//! - Writing each file's accepted rows in a single bulk insert
//! - Moving loaded files out of the input directory and quarantining failures
//! - Guarding the input directory against concurrent runs

pub mod config;
pub mod constants;
pub mod error;

// Core application modules
pub mod app {
    pub mod event_log;
    pub mod models;
    pub mod services {
        pub mod batch_inserter;
        pub mod csv_parser;
        pub mod file_processor;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::event_log::{EventLog, MemoryEventLog, TracingEventLog};
pub use app::models::{EventRecord, Field, FieldValue};
pub use app::services::batch_inserter::{EventStore, SqliteStore};
pub use app::services::file_processor::{FileOutcome, FileProcessor, RunSummary};
pub use config::{Config, FailurePolicy};
pub use error::{Error, Result};
