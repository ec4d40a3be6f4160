//! Parsing statistics and result structures for event files
//!
//! This module provides the per-file parse outcome handed to the batch
//! inserter, together with the skip accounting reported to operators.

use super::error::ParseError;
use crate::app::models::{EventRecord, ParsedHeader, ValidatedRow};

/// Parsing result with accepted records and statistics
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Column order declared by the file
    pub header: ParsedHeader,

    /// Accepted records, in file order
    pub records: Vec<EventRecord>,

    /// Row accounting for the file
    pub stats: ParseStats,
}

impl ParseResult {
    /// Data rows presented to the validator (valid + skipped)
    pub fn processed(&self) -> usize {
        self.stats.processed
    }

    /// Data rows rejected by validation
    pub fn skipped(&self) -> usize {
        self.stats.skipped
    }

    /// Accepted rows
    pub fn valid_count(&self) -> usize {
        self.records.len()
    }

    /// Accepted rows as positional values in header order
    pub fn rows(&self) -> Vec<ValidatedRow> {
        self.records
            .iter()
            .map(|record| record.to_row(&self.header))
            .collect()
    }
}

/// A data row rejected during parsing
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    /// 1-based position among the file's non-blank lines (the header is line 1)
    pub line_number: usize,

    /// Original row text
    pub raw: String,

    /// Failed rule
    pub reason: ParseError,
}

/// Row accounting for one file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseStats {
    /// Number of data rows presented
    pub processed: usize,

    /// Number of data rows skipped due to validation failures
    pub skipped: usize,

    /// Details of every skipped row
    pub skipped_rows: Vec<SkippedRow>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows that passed validation
    pub fn valid(&self) -> usize {
        self.processed - self.skipped
    }

    /// Record a skipped row
    pub fn record_skip(&mut self, line_number: usize, raw: &str, reason: ParseError) {
        self.skipped += 1;
        self.skipped_rows.push(SkippedRow {
            line_number,
            raw: raw.to_string(),
            reason,
        });
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.processed == 0 {
            0.0
        } else {
            (self.valid() as f64 / self.processed as f64) * 100.0
        }
    }

    /// Whether every presented row was rejected
    pub fn all_skipped(&self) -> bool {
        self.skipped == self.processed
    }
}
