//! Storage backends for event batches
//!
//! [`EventStore`] is the seam between the inserter and the database; the
//! production implementation is [`SqliteStore`] over a single shared
//! `rusqlite` connection.

use rusqlite::types::{ToSqlOutput, Value, ValueRef};
use rusqlite::{Connection, ToSql, params_from_iter};
use std::path::Path;
use tracing::debug;

use super::error::StorageError;
use super::statement::{InsertStatement, is_valid_identifier};
use crate::app::models::FieldValue;

/// Relational sink for validated event batches
pub trait EventStore {
    /// Create the event table if it does not exist yet (idempotent)
    fn ensure_table(&mut self, table: &str) -> Result<(), StorageError>;

    /// Execute one bulk insert, returning the number of rows written
    fn execute_insert(
        &mut self,
        table: &str,
        statement: &InsertStatement,
    ) -> Result<usize, StorageError>;
}

impl ToSql for FieldValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            FieldValue::Absent => ToSqlOutput::Owned(Value::Null),
            FieldValue::Integer(value) => ToSqlOutput::Owned(Value::Integer(*value)),
            FieldValue::Real(value) => ToSqlOutput::Owned(Value::Real(*value)),
            FieldValue::Text(value) => ToSqlOutput::Borrowed(ValueRef::Text(value.as_bytes())),
        })
    }
}

/// SQLite-backed event store
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database file at `path`
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::backend(format!(
                    "failed to create database directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let conn = Connection::open(path).map_err(|source| StorageError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self { conn })
    }

    /// Create an in-memory store (for testing and dry runs)
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|source| StorageError::Open {
            path: ":memory:".into(),
            source,
        })?;

        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Number of rows currently stored in `table`
    pub fn count_rows(&self, table: &str) -> Result<i64, StorageError> {
        if !is_valid_identifier(table) {
            return Err(StorageError::InvalidTable {
                table: table.to_string(),
            });
        }

        self.conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                row.get(0)
            })
            .map_err(|e| StorageError::backend(format!("failed to count rows in '{}': {}", table, e)))
    }
}

impl EventStore for SqliteStore {
    fn ensure_table(&mut self, table: &str) -> Result<(), StorageError> {
        if !is_valid_identifier(table) {
            return Err(StorageError::InvalidTable {
                table: table.to_string(),
            });
        }

        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id INTEGER PRIMARY KEY,
                callRef INTEGER NOT NULL,
                eventAction TEXT NOT NULL,
                eventCurrencyCode TEXT,
                eventDatetime TEXT NOT NULL,
                eventValue REAL
            );
            "#,
            table
        );

        self.conn
            .execute_batch(&ddl)
            .map_err(|source| StorageError::CreateTable {
                table: table.to_string(),
                source,
            })?;

        debug!("Ensured table '{}' exists", table);
        Ok(())
    }

    fn execute_insert(
        &mut self,
        table: &str,
        statement: &InsertStatement,
    ) -> Result<usize, StorageError> {
        let insert_error = |source| StorageError::Insert {
            table: table.to_string(),
            source,
        };

        let mut prepared = self.conn.prepare(&statement.sql).map_err(insert_error)?;
        prepared
            .execute(params_from_iter(statement.params.iter()))
            .map_err(insert_error)
    }
}
