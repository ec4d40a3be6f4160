//! Parse failure reasons

use thiserror::Error;

/// Why a header, a row or a whole file was refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("not enough lines")]
    NotEnoughLines,

    #[error("incorrect number of column headers: {line}")]
    HeaderCount { line: String },

    #[error("incorrect column headers: {line}")]
    HeaderMismatch { line: String },

    #[error("incorrect number of values")]
    IncorrectValueCount,

    #[error("invalid date format")]
    InvalidDate,

    #[error("missing event action")]
    MissingAction,

    #[error("missing or invalid call ref")]
    InvalidCallRef,

    #[error("invalid event value")]
    InvalidValue,

    #[error("missing currency code")]
    MissingCurrency,

    #[error("invalid currency code")]
    InvalidCurrency,

    #[error("no valid lines in file")]
    NoValidLines,
}

impl ParseError {
    /// Whether this failure concerns a single data row (recoverable by skipping it)
    pub fn is_row_level(&self) -> bool {
        !matches!(
            self,
            ParseError::NotEnoughLines
                | ParseError::HeaderCount { .. }
                | ParseError::HeaderMismatch { .. }
                | ParseError::NoValidLines
        )
    }
}
