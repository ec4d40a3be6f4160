//! Tests for parsing statistics functionality

use super::super::error::ParseError;
use super::super::stats::ParseStats;

#[test]
fn test_parse_stats_calculation() {
    let mut stats = ParseStats::new();
    stats.processed = 4;
    stats.record_skip(3, "bad,row", ParseError::IncorrectValueCount);

    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.valid(), 3);
    assert_eq!(stats.success_rate(), 75.0);
    assert!(!stats.all_skipped());
    assert_eq!(stats.skipped_rows[0].line_number, 3);
    assert_eq!(stats.skipped_rows[0].raw, "bad,row");
}

#[test]
fn test_parse_stats_empty() {
    let empty_stats = ParseStats::new();

    assert_eq!(empty_stats.processed, 0);
    assert_eq!(empty_stats.skipped, 0);
    assert!(empty_stats.skipped_rows.is_empty());
    assert_eq!(empty_stats.success_rate(), 0.0);
}

#[test]
fn test_parse_stats_all_skipped() {
    let mut stats = ParseStats::new();
    stats.processed = 2;
    stats.record_skip(2, "a", ParseError::InvalidDate);
    stats.record_skip(3, "b", ParseError::MissingAction);

    assert!(stats.all_skipped());
    assert_eq!(stats.valid(), 0);
    assert_eq!(stats.success_rate(), 0.0);
}
