//! Core event CSV parser implementation
//!
//! This module provides the file-level parse: header verification, per-row
//! validation with skip accounting, and the all-rows-invalid check.

use std::fmt;
use std::sync::Arc;
use tracing::debug;

use super::error::ParseError;
use super::header::parse_header;
use super::record_parser::parse_event_record;
use super::stats::{ParseResult, ParseStats};
use crate::app::event_log::EventLog;
use crate::app::models::{EventRecord, ParsedHeader};
use crate::constants::MIN_FILE_LINES;

/// Parser for event files
///
/// Row-level failures are logged through the injected event log and counted;
/// they never escape [`CsvParser::parse`] as errors.
pub struct CsvParser {
    log: Arc<dyn EventLog>,
}

impl fmt::Debug for CsvParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsvParser").finish_non_exhaustive()
    }
}

impl CsvParser {
    /// Create a new parser reporting skipped rows to `log`
    pub fn new(log: Arc<dyn EventLog>) -> Self {
        Self { log }
    }

    /// Parse the non-blank lines of one file
    ///
    /// The first line is the header; every following line is a data row.
    pub fn parse<S: AsRef<str>>(&self, lines: &[S]) -> Result<ParseResult, ParseError> {
        if lines.len() < MIN_FILE_LINES {
            return Err(ParseError::NotEnoughLines);
        }

        let header = self.parse_header(lines[0].as_ref())?;
        debug!("Parsed header: {:?}", header.names());

        let mut stats = ParseStats::new();
        let mut records = Vec::with_capacity(lines.len() - 1);

        for (index, line) in lines.iter().enumerate().skip(1) {
            let line = line.as_ref();
            let line_number = index + 1;
            stats.processed += 1;

            match self.parse_row(&header, line) {
                Ok(record) => records.push(record),
                Err(reason) => {
                    self.log.log(&format!(
                        "Skipping line {}: {} [{}]",
                        line_number, reason, line
                    ));
                    stats.record_skip(line_number, line, reason);
                }
            }
        }

        if stats.all_skipped() {
            return Err(ParseError::NoValidLines);
        }

        debug!(
            "Parsed {} of {} rows ({} skipped)",
            records.len(),
            stats.processed,
            stats.skipped
        );

        Ok(ParseResult {
            header,
            records,
            stats,
        })
    }

    /// Verify a header line and return its column order
    pub fn parse_header(&self, line: &str) -> Result<ParsedHeader, ParseError> {
        parse_header(line)
    }

    /// Validate one data row against `header`
    pub fn parse_row(&self, header: &ParsedHeader, line: &str) -> Result<EventRecord, ParseError> {
        parse_event_record(header, line)
    }
}
