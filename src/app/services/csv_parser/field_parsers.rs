//! Field parsing utilities for event rows
//!
//! Each function applies the rule for one schema field to an already trimmed
//! cell and reports the matching [`ParseError`] on failure.

use chrono::{NaiveDateTime, Timelike};

use super::error::ParseError;
use crate::constants::{CURRENCY_CODE_LENGTH, FIELD_DELIMITER, TIMESTAMP_FORMAT};

/// Split a line on the delimiter and trim every cell
///
/// There is no quoting support: a delimiter inside a value always starts a
/// new cell.
pub fn split_cells(line: &str) -> Vec<&str> {
    line.split(FIELD_DELIMITER).map(str::trim).collect()
}

/// Parse a strict `YYYY-MM-DD HH:MM:SS` timestamp
///
/// The parsed value is formatted back and must reproduce the input exactly,
/// which rejects inputs chrono accepts leniently (unpadded fields and the like).
/// Second `60` is not a valid field value, so leap seconds are rejected too.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, ParseError> {
    let parsed = NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map_err(|_| ParseError::InvalidDate)?;

    if parsed.nanosecond() >= 1_000_000_000 {
        return Err(ParseError::InvalidDate);
    }

    if parsed.format(TIMESTAMP_FORMAT).to_string() != value {
        return Err(ParseError::InvalidDate);
    }

    Ok(parsed)
}

/// Parse the required event action
pub fn parse_action(value: &str) -> Result<String, ParseError> {
    if value.is_empty() {
        return Err(ParseError::MissingAction);
    }
    Ok(value.to_string())
}

/// Parse the required integer call reference
pub fn parse_call_ref(value: &str) -> Result<i64, ParseError> {
    if value.is_empty() {
        return Err(ParseError::InvalidCallRef);
    }
    value.parse::<i64>().map_err(|_| ParseError::InvalidCallRef)
}

/// Parse the optional event value; an empty cell is absent
pub fn parse_optional_value(value: &str) -> Result<Option<f64>, ParseError> {
    if value.is_empty() {
        return Ok(None);
    }

    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(Some(number)),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse the optional currency code; an empty cell is absent
///
/// Only the length is checked, not membership in the ISO-4217 code table.
pub fn parse_optional_currency(value: &str) -> Result<Option<String>, ParseError> {
    if value.is_empty() {
        return Ok(None);
    }

    if value.chars().count() != CURRENCY_CODE_LENGTH {
        return Err(ParseError::InvalidCurrency);
    }

    Ok(Some(value.to_string()))
}
