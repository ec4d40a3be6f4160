//! Directory-level processing engine.
//!
//! Orchestrates one loader run over the input directory:
//!
//! ```text
//! Locking -> Listing -> Setup -> per file: Reading -> Parsing -> Inserting -> Relocating -> Done
//! ```
//!
//! Files are handled one at a time in path order. A file that fails any
//! stage is rejected (logged, optionally quarantined) and the run moves on;
//! only failing to take the directory lock ends the run early.

pub mod discovery;
pub mod lock;
pub mod outcome;
pub mod processor;

#[cfg(test)]
pub mod tests;

pub use discovery::{discover_input_files, read_lines};
pub use lock::{DirectoryLock, LockError};
pub use outcome::{FileOutcome, RunSummary};
pub use processor::FileProcessor;
