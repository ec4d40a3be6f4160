//! Per-file outcomes and run statistics

use serde::Serialize;
use std::path::PathBuf;

/// Result of processing a single input file
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// Rows stored; `relocated` is false when the move to the output
    /// directory failed after the insert succeeded
    Loaded {
        file: PathBuf,
        processed: usize,
        skipped: usize,
        inserted: usize,
        relocated: bool,
    },

    /// Parsed and validated only (dry run); nothing stored or moved
    Validated {
        file: PathBuf,
        processed: usize,
        skipped: usize,
    },

    /// File-level failure; nothing from this file was stored
    Rejected {
        file: PathBuf,
        reason: String,
        quarantined: bool,
    },
}

/// Aggregate statistics for one run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub files_found: usize,
    pub files_loaded: usize,
    pub files_validated: usize,
    pub files_rejected: usize,
    pub files_quarantined: usize,
    pub relocation_failures: usize,
    pub rows_processed: usize,
    pub rows_inserted: usize,
    pub rows_skipped: usize,
    pub processing_time_ms: u64,
    pub outcomes: Vec<FileOutcome>,
}

impl RunSummary {
    /// Fold one file's outcome into the totals
    pub fn record(&mut self, outcome: FileOutcome) {
        match &outcome {
            FileOutcome::Loaded {
                processed,
                skipped,
                inserted,
                relocated,
                ..
            } => {
                self.files_loaded += 1;
                self.rows_processed += processed;
                self.rows_skipped += skipped;
                self.rows_inserted += inserted;
                if !relocated {
                    self.relocation_failures += 1;
                }
            }
            FileOutcome::Validated {
                processed, skipped, ..
            } => {
                self.files_validated += 1;
                self.rows_processed += processed;
                self.rows_skipped += skipped;
            }
            FileOutcome::Rejected { quarantined, .. } => {
                self.files_rejected += 1;
                if *quarantined {
                    self.files_quarantined += 1;
                }
            }
        }
        self.outcomes.push(outcome);
    }

    /// Whether every discovered file was loaded or validated
    pub fn is_clean(&self) -> bool {
        self.files_rejected == 0 && self.relocation_failures == 0
    }
}
