//! Test utilities for directory processing

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use crate::app::event_log::MemoryEventLog;
use crate::app::services::batch_inserter::SqliteStore;
use crate::config::Config;

use super::processor::FileProcessor;


/// A valid file: two accepted rows and one rejected row
pub const MIXED_FILE: &str = "callRef,eventDatetime,eventCurrencyCode,eventAction,eventValue\n\
1,2018-01-15 10:14:56,GBP,foo,1.00\n\
2,2018-01-15 10:14:56,,foo,\n\
x,2018-01-15 10:14:56,GBP,foo,1.00\n";

/// A file every row of which is rejected
pub const ALL_BAD_FILE: &str = "callRef,eventDatetime,eventCurrencyCode,eventAction,eventValue\n\
x,2018-01-15 10:14:56,GBP,foo,1.00\n\
3,2018-02-30 10:14:56,GBP,foo,1.00\n";

/// Temporary directory tree with an existing input directory
pub struct TestDirs {
    // Keeps the tree alive for the duration of the test
    pub root: TempDir,
    pub config: Config,
}

impl TestDirs {
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        let input = root.path().join("input");
        fs::create_dir(&input).unwrap();

        let config = Config {
            input_path: input,
            output_path: root.path().join("output"),
            ..Config::default()
        };

        Self { root, config }
    }

    pub fn input(&self) -> &Path {
        &self.config.input_path
    }

    pub fn output(&self) -> &Path {
        &self.config.output_path
    }

    pub fn failed(&self) -> PathBuf {
        self.config.failed_dir()
    }

    /// Write `content` as `name` in the input directory
    pub fn write_input(&self, name: &str, content: &str) -> PathBuf {
        let path = self.input().join(name);
        fs::write(&path, content).unwrap();
        path
    }
}

/// Processor over an in-memory SQLite store and a recording event log
pub fn create_test_processor(config: Config) -> (FileProcessor<SqliteStore>, Arc<MemoryEventLog>) {
    let log = Arc::new(MemoryEventLog::new());
    let store = SqliteStore::open_in_memory().unwrap();
    (FileProcessor::new(config, store, log.clone()), log)
}
