//! Individual event row processing
//!
//! Cells are addressed by schema field rather than by position, so the rules
//! below hold for any column order the header declares.

use super::error::ParseError;
use super::field_parsers::{
    parse_action, parse_call_ref, parse_optional_currency, parse_optional_value, parse_timestamp,
    split_cells,
};
use crate::app::models::{EventRecord, Field, ParsedHeader};

/// Trimmed cells of one row, indexed by schema field
struct NamedCells<'a> {
    cells: [&'a str; Field::ALL.len()],
}

impl<'a> NamedCells<'a> {
    fn zip(header: &ParsedHeader, values: &[&'a str]) -> Self {
        let mut cells = [""; Field::ALL.len()];
        for (field, value) in header.fields().iter().zip(values) {
            cells[field.index()] = *value;
        }
        Self { cells }
    }

    fn get(&self, field: Field) -> &'a str {
        self.cells[field.index()]
    }
}

/// Validate one data line against `header` and build the event record
///
/// Rules run in a fixed order so each malformed row reports one
/// deterministic reason: value count, timestamp, action, call reference,
/// value, currency presence, then currency length.
pub fn parse_event_record(header: &ParsedHeader, line: &str) -> Result<EventRecord, ParseError> {
    let values = split_cells(line);
    if values.len() != header.len() {
        return Err(ParseError::IncorrectValueCount);
    }

    let cells = NamedCells::zip(header, &values);

    let datetime = parse_timestamp(cells.get(Field::EventDatetime))?;
    let action = parse_action(cells.get(Field::EventAction))?;
    let call_ref = parse_call_ref(cells.get(Field::CallRef))?;
    let value = parse_optional_value(cells.get(Field::EventValue))?;

    let currency_cell = cells.get(Field::EventCurrencyCode);
    if value.is_some() && currency_cell.is_empty() {
        return Err(ParseError::MissingCurrency);
    }
    let currency_code = parse_optional_currency(currency_cell)?;

    Ok(EventRecord {
        call_ref,
        action,
        currency_code,
        datetime,
        value,
    })
}
