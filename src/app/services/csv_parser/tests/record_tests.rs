//! Tests for per-row validation

use super::super::error::ParseError;
use super::super::record_parser::parse_event_record;
use super::row_fixture_header;
use crate::app::models::FieldValue;
use chrono::NaiveDate;

fn parse(line: &str) -> Result<Vec<FieldValue>, ParseError> {
    let header = row_fixture_header();
    parse_event_record(&header, line).map(|record| record.to_row(&header))
}

fn timestamp_text() -> FieldValue {
    FieldValue::Text("2018-01-15 10:14:56".to_string())
}

#[test]
fn test_all_columns_populated() {
    let header = row_fixture_header();
    let record = parse_event_record(&header, "2018-01-15 10:14:56,foo,1,1.00,GBP").unwrap();

    assert_eq!(record.call_ref, 1);
    assert_eq!(record.action, "foo");
    assert_eq!(record.value, Some(1.0));
    assert_eq!(record.currency_code.as_deref(), Some("GBP"));
    assert_eq!(
        record.datetime,
        NaiveDate::from_ymd_opt(2018, 1, 15)
            .unwrap()
            .and_hms_opt(10, 14, 56)
            .unwrap()
    );

    assert_eq!(
        record.to_row(&header),
        vec![
            timestamp_text(),
            FieldValue::Text("foo".to_string()),
            FieldValue::Integer(1),
            FieldValue::Real(1.0),
            FieldValue::Text("GBP".to_string()),
        ]
    );
}

#[test]
fn test_value_and_currency_omitted_become_absent() {
    let row = parse("2018-01-15 10:14:56,foo,1,,").unwrap();

    assert_eq!(
        row,
        vec![
            timestamp_text(),
            FieldValue::Text("foo".to_string()),
            FieldValue::Integer(1),
            FieldValue::Absent,
            FieldValue::Absent,
        ]
    );
    assert!(!row.contains(&FieldValue::Text(String::new())));
}

#[test]
fn test_currency_without_value_is_accepted() {
    let row = parse("2018-01-15 10:14:56,foo,1,,GBP").unwrap();

    assert_eq!(row[3], FieldValue::Absent);
    assert_eq!(row[4], FieldValue::Text("GBP".to_string()));
}

#[test]
fn test_value_without_currency_is_rejected() {
    assert_eq!(
        parse("2018-01-15 10:14:56,foo,1,1.00,"),
        Err(ParseError::MissingCurrency)
    );
}

#[test]
fn test_cells_are_trimmed() {
    let row = parse(" 2018-01-15 10:14:56 , foo , 1 , 2.5 , EUR ").unwrap();

    assert_eq!(row[1], FieldValue::Text("foo".to_string()));
    assert_eq!(row[3], FieldValue::Real(2.5));
    assert_eq!(row[4], FieldValue::Text("EUR".to_string()));
}

#[test]
fn test_bad_rows_fail_on_their_own_rule() {
    let cases = [
        ("2018-01-15 10:14:56,foo,1,1.00", ParseError::IncorrectValueCount),
        ("2018-01-15 10:14:56,foo,1,1.00,GBP,BAR", ParseError::IncorrectValueCount),
        ("2018/01/15 10:14:56,foo,1,1.00,GBP", ParseError::InvalidDate),
        ("2018-13-40 10:14:56,foo,1,1.00,GBP", ParseError::InvalidDate),
        ("2018-01-15 10:14:60,foo,1,1.00,GBP", ParseError::InvalidDate),
        ("2018-01-15 10:14:56,,1,1.00,GBP", ParseError::MissingAction),
        ("2018-01-15 10:14:56,foo,bar,1.00,GBP", ParseError::InvalidCallRef),
        ("2018-01-15 10:14:56,foo,,1.00,GBP", ParseError::InvalidCallRef),
        ("2018-01-15 10:14:56,foo,1.5,1.00,GBP", ParseError::InvalidCallRef),
        ("2018-01-15 10:14:56,foo,1,bar,GBP", ParseError::InvalidValue),
        ("2018-01-15 10:14:56,foo,1,1.00,X", ParseError::InvalidCurrency),
        ("2018-01-15 10:14:56,foo,1,,GBPX", ParseError::InvalidCurrency),
    ];

    for (line, expected) in cases {
        let error = parse(line).unwrap_err();
        assert_eq!(error, expected, "{line}");
        assert!(error.is_row_level());
    }
}

#[test]
fn test_embedded_delimiter_is_a_value_count_error() {
    assert_eq!(
        parse("2018-01-15 10:14:56,\"foo,bar\",1,1.00,GBP"),
        Err(ParseError::IncorrectValueCount)
    );
}

#[test]
fn test_error_messages() {
    assert_eq!(ParseError::InvalidDate.to_string(), "invalid date format");
    assert_eq!(ParseError::MissingAction.to_string(), "missing event action");
    assert_eq!(
        ParseError::InvalidCallRef.to_string(),
        "missing or invalid call ref"
    );
    assert_eq!(ParseError::MissingCurrency.to_string(), "missing currency code");
    assert_eq!(ParseError::InvalidCurrency.to_string(), "invalid currency code");
    assert_eq!(
        ParseError::IncorrectValueCount.to_string(),
        "incorrect number of values"
    );
}
