//! Core data models for event loading
//!
//! This module contains the fixed event schema ([`Field`]), the column order
//! declared by one file ([`ParsedHeader`]), the validated named-field record
//! ([`EventRecord`]) and the positional values bound into the insert
//! statement ([`FieldValue`], [`ValidatedRow`]).

use chrono::NaiveDateTime;
use std::fmt;

use crate::constants::{SCHEMA_FIELD_NAMES, TIMESTAMP_FORMAT};

/// One of the five schema fields every input file must declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    CallRef,
    EventAction,
    EventCurrencyCode,
    EventDatetime,
    EventValue,
}

impl Field {
    /// All schema fields, in the same order as [`SCHEMA_FIELD_NAMES`]
    pub const ALL: [Field; 5] = [
        Field::CallRef,
        Field::EventAction,
        Field::EventCurrencyCode,
        Field::EventDatetime,
        Field::EventValue,
    ];

    /// Column name as it appears in file headers and in the table
    pub fn name(self) -> &'static str {
        SCHEMA_FIELD_NAMES[self.index()]
    }

    /// Look up a field by its exact column name
    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.name() == name)
    }

    /// Stable slot of this field in fixed-size per-field arrays
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Column order declared on one file's header line
///
/// Always a permutation of [`Field::ALL`]. The order is kept as found in the
/// file because it maps each row's positional cells to fields and is reused
/// as the column list of the insert statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHeader {
    fields: Vec<Field>,
}

impl ParsedHeader {
    pub(crate) fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Column names in file order
    pub fn names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|field| field.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A single bound value of a validated row
///
/// `Absent` is the explicit "no value supplied" marker for empty optional
/// cells; it is bound as SQL `NULL`, never as an empty string.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Absent,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl FieldValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }
}

/// Positional values of one accepted row, ordered like its file's header
pub type ValidatedRow = Vec<FieldValue>;

/// An event record that passed every validation rule
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    /// Call reference identifier
    pub call_ref: i64,

    /// Event action label (never empty)
    pub action: String,

    /// Three-character currency code, required whenever `value` is present
    pub currency_code: Option<String>,

    /// Event timestamp (no timezone)
    pub datetime: NaiveDateTime,

    /// Optional event value
    pub value: Option<f64>,
}

impl EventRecord {
    /// Value bound for one schema field
    pub fn value_of(&self, field: Field) -> FieldValue {
        match field {
            Field::CallRef => FieldValue::Integer(self.call_ref),
            Field::EventAction => FieldValue::Text(self.action.clone()),
            Field::EventCurrencyCode => self
                .currency_code
                .clone()
                .map_or(FieldValue::Absent, FieldValue::Text),
            Field::EventDatetime => {
                FieldValue::Text(self.datetime.format(TIMESTAMP_FORMAT).to_string())
            }
            Field::EventValue => self.value.map_or(FieldValue::Absent, FieldValue::Real),
        }
    }

    /// Positional values ordered by `header`
    pub fn to_row(&self, header: &ParsedHeader) -> ValidatedRow {
        header
            .fields()
            .iter()
            .map(|field| self.value_of(*field))
            .collect()
    }
}
