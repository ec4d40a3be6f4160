//! Batch insertion of parsed event files
//!
//! All accepted rows of one file are written by a single multi-row `INSERT`
//! whose column list is the file's header order. Every value is a bound
//! parameter. The statement either lands completely or fails; there is no
//! chunking and no partial commit.
//!
//! - [`statement`] - Builds the bulk statement and its parameters
//! - [`store`] - Storage seam ([`EventStore`]) and the SQLite backend
//! - [`inserter`] - [`BatchInserter`], used once per file by the processor

pub mod error;
pub mod inserter;
pub mod statement;
pub mod store;

#[cfg(test)]
pub mod tests;

pub use error::StorageError;
pub use inserter::BatchInserter;
pub use statement::{InsertStatement, build_insert, is_valid_identifier};
pub use store::{EventStore, SqliteStore};
