//! Application constants for the event loader
//!
//! This module contains the fixed event schema, format strings, default
//! configuration values and process exit codes used throughout the crate.

// =============================================================================
// Event Schema
// =============================================================================

/// Column names every input file must declare exactly once, in sorted order
///
/// Header validation compares a sorted copy of a file's header against this
/// list, so it must stay sorted.
pub const SCHEMA_FIELD_NAMES: [&str; 5] = [
    "callRef",
    "eventAction",
    "eventCurrencyCode",
    "eventDatetime",
    "eventValue",
];

/// Strict timestamp layout (`YYYY-MM-DD HH:MM:SS`, no timezone)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Length of an ISO-4217 currency code
pub const CURRENCY_CODE_LENGTH: usize = 3;

/// Field separator for header and data lines
pub const FIELD_DELIMITER: char = ',';

/// Minimum line count for a loadable file (header plus one data row)
pub const MIN_FILE_LINES: usize = 2;

// =============================================================================
// Defaults
// =============================================================================

/// Default directory watched for new files
pub const DEFAULT_INPUT_DIR: &str = "input";

/// Default directory receiving successfully loaded files
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Quarantine directory name created under the input directory when no
/// explicit failed path is configured
pub const DEFAULT_FAILED_DIR_NAME: &str = "failed";

/// Default SQLite database file
pub const DEFAULT_DATABASE_PATH: &str = "events.db";

/// Default target table
pub const DEFAULT_TABLE_NAME: &str = "event";

/// Default extension of candidate input files
pub const DEFAULT_FILE_EXTENSION: &str = "csv";

/// Lock file created inside the input directory
pub const DEFAULT_LOCK_FILE_NAME: &str = ".event-loader.lock";

// =============================================================================
// Configuration Sources
// =============================================================================

/// Directory under the user config directory holding `config.toml`
pub const CONFIG_DIR_NAME: &str = "event-loader";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variables overriding file configuration
pub mod env_vars {
    pub const INPUT: &str = "EVENT_LOADER_INPUT";
    pub const OUTPUT: &str = "EVENT_LOADER_OUTPUT";
    pub const FAILED: &str = "EVENT_LOADER_FAILED";
    pub const DATABASE: &str = "EVENT_LOADER_DATABASE";
    pub const TABLE: &str = "EVENT_LOADER_TABLE";
    pub const EXTENSION: &str = "EVENT_LOADER_EXTENSION";
}

// =============================================================================
// Logging
// =============================================================================

/// Tracing target used for operator-facing event messages
pub const EVENT_LOG_TARGET: &str = "event_loader::events";

// =============================================================================
// Exit Codes
// =============================================================================

/// Process exit statuses
pub mod exit_codes {
    /// Run completed (including the "no files to process" case)
    pub const SUCCESS: u8 = 0;

    /// Configuration, startup or check failure
    pub const FAILURE: u8 = 1;

    /// Another instance holds the input directory lock
    pub const LOCK_CONTENTION: u8 = 2;
}
