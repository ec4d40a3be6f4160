//! Test utilities for batch insertion

use std::sync::Arc;

use crate::app::event_log::MemoryEventLog;
use crate::app::services::csv_parser::{CsvParser, ParseResult};

use super::error::StorageError;
use super::statement::InsertStatement;
use super::store::EventStore;


/// Parse `lines` with a throwaway event log
pub fn parse_lines(lines: &[&str]) -> ParseResult {
    CsvParser::new(Arc::new(MemoryEventLog::new()))
        .parse(lines)
        .unwrap()
}

/// Two valid rows (one with absent optionals) and one rejected row
pub fn sample_result() -> ParseResult {
    parse_lines(&[
        "callRef,eventDatetime,eventCurrencyCode,eventAction,eventValue",
        "1,2018-01-15 10:14:56,GBP,foo,1.00",
        "2,2018-01-15 10:14:56,,foo,",
        "x,2018-01-15 10:14:56,GBP,foo,1.00",
    ])
}

/// Store that refuses every insert
#[derive(Debug, Default)]
pub struct FailingStore {
    pub attempts: usize,
}

impl EventStore for FailingStore {
    fn ensure_table(&mut self, _table: &str) -> Result<(), StorageError> {
        Ok(())
    }

    fn execute_insert(
        &mut self,
        _table: &str,
        _statement: &InsertStatement,
    ) -> Result<usize, StorageError> {
        self.attempts += 1;
        Err(StorageError::backend("connection reset"))
    }
}
