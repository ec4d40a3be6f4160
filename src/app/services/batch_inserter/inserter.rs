//! Per-file batch inserter

use tracing::debug;

use super::error::StorageError;
use super::statement::build_insert;
use super::store::EventStore;
use crate::app::services::csv_parser::ParseResult;

/// Writes the accepted rows of one parsed file as a single batch
#[derive(Debug)]
pub struct BatchInserter<S: EventStore> {
    store: S,
}

impl<S: EventStore> BatchInserter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Idempotent table bootstrap, run once before any file
    pub fn ensure_table(&mut self, table: &str) -> Result<(), StorageError> {
        self.store.ensure_table(table)
    }

    /// Insert every valid row of `result` into `table` in one statement
    ///
    /// Returns the number of rows written. On error nothing from this file
    /// has been stored.
    pub fn insert(&mut self, table: &str, result: &ParseResult) -> Result<usize, StorageError> {
        let statement = build_insert(table, result)?;
        debug!(
            "Inserting {} rows into '{}' ({} parameters)",
            statement.row_count,
            table,
            statement.params.len()
        );

        self.store.execute_insert(table, &statement)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
