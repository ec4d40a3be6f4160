//! Per-run orchestration of the input directory
//!
//! Owns the parser and the inserter for the whole run and drives every
//! discovered file through read, parse, insert and relocate.

use indicatif::ProgressBar;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::discovery::{discover_input_files, read_lines};
use super::lock::{DirectoryLock, LockError};
use super::outcome::{FileOutcome, RunSummary};
use crate::app::event_log::EventLog;
use crate::app::services::batch_inserter::{BatchInserter, EventStore};
use crate::app::services::csv_parser::CsvParser;
use crate::config::{Config, FailurePolicy};
use crate::{Error, Result};

/// What a file produced once it got past parsing
enum FileLoad {
    Stored {
        processed: usize,
        skipped: usize,
        inserted: usize,
    },
    Validated {
        processed: usize,
        skipped: usize,
    },
}

/// Main processor for one input directory
pub struct FileProcessor<S: EventStore> {
    config: Config,
    parser: CsvParser,
    inserter: BatchInserter<S>,
    log: Arc<dyn EventLog>,
    dry_run: bool,
    progress: ProgressBar,
}

impl<S: EventStore> fmt::Debug for FileProcessor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileProcessor")
            .field("config", &self.config)
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}

impl<S: EventStore> FileProcessor<S> {
    /// Create a processor writing to `store` and reporting to `log`
    pub fn new(config: Config, store: S, log: Arc<dyn EventLog>) -> Self {
        Self {
            parser: CsvParser::new(log.clone()),
            inserter: BatchInserter::new(store),
            config,
            log,
            dry_run: false,
            progress: ProgressBar::hidden(),
        }
    }

    /// Parse and validate only; nothing is inserted or moved
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Report per-file progress on `progress`
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn inserter(&self) -> &BatchInserter<S> {
        &self.inserter
    }

    pub fn into_store(self) -> S {
        self.inserter.into_store()
    }

    /// Process every candidate file in the input directory
    ///
    /// Returns an error only when the run cannot start (the directory lock
    /// is unavailable or the directory cannot be listed). Per-file failures
    /// are reported in the summary.
    pub fn run(&mut self) -> Result<RunSummary> {
        let start_time = Instant::now();

        // Held until the end of this function on every path
        let _lock = self.acquire_lock()?;

        let files = discover_input_files(&self.config.input_path, self.config.extension())?;
        let mut summary = RunSummary {
            files_found: files.len(),
            ..Default::default()
        };

        if files.is_empty() {
            self.log.log("No files to process.");
            summary.processing_time_ms = start_time.elapsed().as_millis() as u64;
            return Ok(summary);
        }

        self.prepare();

        self.progress.set_length(files.len() as u64);
        for file in &files {
            self.progress.set_message(file_label(file));
            let outcome = self.process_file(file);
            summary.record(outcome);
            self.progress.inc(1);
        }
        self.progress.finish_and_clear();

        summary.processing_time_ms = start_time.elapsed().as_millis() as u64;
        info!(
            "Run finished: {} loaded, {} rejected, {} rows inserted, {} rows skipped in {}ms",
            summary.files_loaded,
            summary.files_rejected,
            summary.rows_inserted,
            summary.rows_skipped,
            summary.processing_time_ms
        );

        Ok(summary)
    }

    fn acquire_lock(&self) -> Result<DirectoryLock> {
        DirectoryLock::acquire(&self.config.input_path, &self.config.lock_file_name).map_err(
            |error| {
                match &error {
                    LockError::Held { .. } => self.log.log(&format!(
                        "Another instance is already processing {}; aborting.",
                        self.config.input_path.display()
                    )),
                    LockError::Io { .. } => self.log.log(&format!("Unable to lock input: {}", error)),
                }
                Error::from(error)
            },
        )
    }

    /// Create the output and quarantine directories and the target table
    ///
    /// Failures are logged; the affected step then fails per file.
    fn prepare(&mut self) {
        if self.dry_run {
            return;
        }

        if let Err(e) = fs::create_dir_all(&self.config.output_path) {
            self.log.log(&format!(
                "Failed to create output directory {}: {}",
                self.config.output_path.display(),
                e
            ));
        }

        if self.config.failure_policy == FailurePolicy::Quarantine {
            let failed_dir = self.config.failed_dir();
            if let Err(e) = fs::create_dir_all(&failed_dir) {
                self.log.log(&format!(
                    "Failed to create failed directory {}: {}",
                    failed_dir.display(),
                    e
                ));
            }
        }

        if let Err(e) = self.inserter.ensure_table(&self.config.table_name) {
            self.log.log(&format!(
                "Failed to prepare table '{}': {}",
                self.config.table_name, e
            ));
        }
    }

    /// Drive one file through the pipeline; never fails the run
    pub fn process_file(&mut self, path: &Path) -> FileOutcome {
        debug!("Processing file {}", path.display());

        match self.load_file(path) {
            Ok(FileLoad::Stored {
                processed,
                skipped,
                inserted,
            }) => {
                let relocated = self.relocate(path);
                self.log.log(&format!(
                    "Processed {}: {} rows processed, {} skipped, {} inserted",
                    path.display(),
                    processed,
                    skipped,
                    inserted
                ));
                FileOutcome::Loaded {
                    file: path.to_path_buf(),
                    processed,
                    skipped,
                    inserted,
                    relocated,
                }
            }
            Ok(FileLoad::Validated { processed, skipped }) => {
                self.log.log(&format!(
                    "Validated {}: {} rows processed, {} skipped (dry run)",
                    path.display(),
                    processed,
                    skipped
                ));
                FileOutcome::Validated {
                    file: path.to_path_buf(),
                    processed,
                    skipped,
                }
            }
            Err(error) => {
                let error = Error::file_rejected(path, error);
                debug!("{}", error);
                self.log.log(&format!(
                    "Failed to process {}: {}",
                    path.display(),
                    error.root()
                ));
                let quarantined = self.quarantine(path);
                FileOutcome::Rejected {
                    file: path.to_path_buf(),
                    reason: error.root().to_string(),
                    quarantined,
                }
            }
        }
    }

    /// Read, parse and (unless dry run) insert one file
    fn load_file(&mut self, path: &Path) -> Result<FileLoad> {
        let lines = read_lines(path)?;
        let result = self.parser.parse(&lines)?;

        if self.dry_run {
            return Ok(FileLoad::Validated {
                processed: result.processed(),
                skipped: result.skipped(),
            });
        }

        let inserted = self.inserter.insert(&self.config.table_name, &result)?;

        Ok(FileLoad::Stored {
            processed: result.processed(),
            skipped: result.skipped(),
            inserted,
        })
    }

    /// Move a loaded file into the output directory
    ///
    /// Best effort: the rows are already stored, so a failure is only logged.
    fn relocate(&self, path: &Path) -> bool {
        let Some(file_name) = path.file_name() else {
            return false;
        };
        let target = self.config.output_path.join(file_name);

        match fs::rename(path, &target) {
            Ok(()) => {
                debug!("Moved {} to {}", path.display(), target.display());
                true
            }
            Err(e) => {
                self.log.log(&format!(
                    "Failed to move {} to {}: {}",
                    path.display(),
                    target.display(),
                    e
                ));
                false
            }
        }
    }

    /// Apply the failure policy to a rejected file
    fn quarantine(&self, path: &Path) -> bool {
        if self.dry_run || self.config.failure_policy == FailurePolicy::LeaveInPlace {
            return false;
        }

        let Some(file_name) = path.file_name() else {
            return false;
        };
        let target = self.config.failed_dir().join(file_name);

        match fs::rename(path, &target) {
            Ok(()) => {
                debug!("Quarantined {} to {}", path.display(), target.display());
                true
            }
            Err(e) => {
                self.log.log(&format!(
                    "Failed to quarantine {} to {}: {}",
                    path.display(),
                    target.display(),
                    e
                ));
                false
            }
        }
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
