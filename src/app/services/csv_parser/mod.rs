//! Event CSV parser
//!
//! This module turns the raw lines of one input file into validated event
//! records. A malformed row never fails the whole file: it is logged through
//! the injected [`EventLog`](crate::app::event_log::EventLog) and counted as
//! skipped. Only structural problems (too few lines, a bad header, or no
//! valid row at all) reject the file.
//!
//! ## Architecture
//!
//! - [`parser`] - File-level orchestration and skip accounting
//! - [`header`] - Header line verification against the fixed schema
//! - [`record_parser`] - Per-row validation into an [`EventRecord`](crate::app::models::EventRecord)
//! - [`field_parsers`] - Typed rules for individual cells
//! - [`stats`] - Parse result and statistics
//! - [`error`] - Parse failure reasons
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use event_loader::app::event_log::MemoryEventLog;
//! use event_loader::app::services::csv_parser::CsvParser;
//!
//! let parser = CsvParser::new(Arc::new(MemoryEventLog::new()));
//! let result = parser
//!     .parse(&[
//!         "callRef,eventDatetime,eventCurrencyCode,eventAction,eventValue",
//!         "1,2018-01-15 10:14:56,GBP,foo,1.00",
//!     ])
//!     .unwrap();
//!
//! assert_eq!(result.processed(), 1);
//! assert_eq!(result.skipped(), 0);
//! ```

pub mod error;
pub mod field_parsers;
pub mod header;
pub mod parser;
pub mod record_parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use error::ParseError;
pub use header::parse_header;
pub use parser::CsvParser;
pub use record_parser::parse_event_record;
pub use stats::{ParseResult, ParseStats, SkippedRow};
