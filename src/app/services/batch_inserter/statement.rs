//! Bulk insert statement construction

use super::error::StorageError;
use crate::app::models::{FieldValue, ParsedHeader};
use crate::app::services::csv_parser::ParseResult;

/// A single multi-row insert and its bound parameters
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    /// SQL text with `?` placeholders only
    pub sql: String,

    /// Parameters, row after row, each row in header order
    pub params: Vec<FieldValue>,

    /// Number of row groups in the statement
    pub row_count: usize,
}

/// Whether `name` is a plain SQL identifier (`[A-Za-z_][A-Za-z0-9_]*`)
///
/// The table name is the only part of the statement that cannot be bound,
/// so it is restricted to this shape before being written into the SQL.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Placeholder group for one row, e.g. `(?,?,?,?,?)`
fn row_placeholder(columns: usize) -> String {
    format!("({})", vec!["?"; columns].join(","))
}

/// Build the bulk insert for every accepted row of `result`
///
/// The column list is the file's own header order, matching the positional
/// values of each row.
pub fn build_insert(table: &str, result: &ParseResult) -> Result<InsertStatement, StorageError> {
    if !is_valid_identifier(table) {
        return Err(StorageError::InvalidTable {
            table: table.to_string(),
        });
    }
    if result.records.is_empty() {
        return Err(StorageError::EmptyBatch {
            table: table.to_string(),
        });
    }

    let header: &ParsedHeader = &result.header;
    let placeholder = row_placeholder(header.len());
    let placeholders = vec![placeholder.as_str(); result.records.len()].join(",");

    let sql = format!(
        "INSERT INTO {} ({}) VALUES {}",
        table,
        header.names().join(","),
        placeholders
    );

    let params = result
        .records
        .iter()
        .flat_map(|record| record.to_row(header))
        .collect();

    Ok(InsertStatement {
        sql,
        params,
        row_count: result.records.len(),
    })
}
