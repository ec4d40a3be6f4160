//! Header line verification
//!
//! A header must name every schema field exactly once, in any order and with
//! any surrounding whitespace.

use super::error::ParseError;
use super::field_parsers::split_cells;
use crate::app::models::{Field, ParsedHeader};
use crate::constants::SCHEMA_FIELD_NAMES;

/// Parse a header line into the file's column order
///
/// A sorted copy of the names is compared with the sorted schema, which
/// catches missing, duplicated and unknown names in one check. The returned
/// header keeps the original, unsorted order.
pub fn parse_header(line: &str) -> Result<ParsedHeader, ParseError> {
    let names = split_cells(line);

    if names.len() != SCHEMA_FIELD_NAMES.len() {
        return Err(ParseError::HeaderCount {
            line: line.to_string(),
        });
    }

    let mut sorted = names.clone();
    sorted.sort_unstable();
    if sorted != SCHEMA_FIELD_NAMES {
        return Err(ParseError::HeaderMismatch {
            line: line.to_string(),
        });
    }

    let fields = names
        .iter()
        .map(|name| {
            Field::from_name(name).ok_or_else(|| ParseError::HeaderMismatch {
                line: line.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ParsedHeader::new(fields))
}
