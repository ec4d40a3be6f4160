//! Test utilities for event CSV parser testing
//!
//! This module provides common fixtures and helper functions used across the
//! parser test modules.

use std::sync::Arc;

use crate::app::event_log::MemoryEventLog;
use crate::app::models::{Field, ParsedHeader};
use crate::app::services::csv_parser::CsvParser;

mod record_tests;
mod stats_tests;

/// Header order used by the row fixtures
pub const ROW_FIXTURE_HEADER: &str =
    "eventDatetime,eventAction,callRef,eventValue,eventCurrencyCode";

/// Parsed form of [`ROW_FIXTURE_HEADER`]
pub fn row_fixture_header() -> ParsedHeader {
    ParsedHeader::new(vec![
        Field::EventDatetime,
        Field::EventAction,
        Field::CallRef,
        Field::EventValue,
        Field::EventCurrencyCode,
    ])
}

/// Parser wired to an in-memory event log
pub fn create_test_parser() -> (CsvParser, Arc<MemoryEventLog>) {
    let log = Arc::new(MemoryEventLog::new());
    (CsvParser::new(log.clone()), log)
}

/// Lines of a small file in the order used by upstream exports
pub fn create_test_event_lines() -> Vec<String> {
    vec![
        "callRef,eventDatetime,eventCurrencyCode,eventAction,eventValue".to_string(),
        "1,2018-01-15 10:14:56,GBP,foo,1.00".to_string(),
        "2,2018-01-15 10:14:56,,foo,".to_string(),
        "x,2018-01-15 10:14:56,GBP,foo,1.00".to_string(),
    ]
}
