//! Configuration management and validation.
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then `EVENT_LOADER_*` environment variables, then command-line flags
//! (applied by the CLI layer).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::app::services::batch_inserter::is_valid_identifier;
use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_DATABASE_PATH, DEFAULT_FAILED_DIR_NAME,
    DEFAULT_FILE_EXTENSION, DEFAULT_INPUT_DIR, DEFAULT_LOCK_FILE_NAME, DEFAULT_OUTPUT_DIR,
    DEFAULT_TABLE_NAME, env_vars,
};
use crate::{Error, Result};

/// What happens to a file that failed parsing or insertion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Move the file into the failed directory
    #[default]
    Quarantine,
    /// Leave the file where it is; it will be picked up again next run
    LeaveInPlace,
}

/// Runtime configuration for a loader run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory watched for new files
    pub input_path: PathBuf,

    /// Directory receiving successfully loaded files
    pub output_path: PathBuf,

    /// Quarantine directory (defaults to `<input>/failed`)
    pub failed_path: Option<PathBuf>,

    /// Handling of files that could not be loaded
    pub failure_policy: FailurePolicy,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Target table
    pub table_name: String,

    /// Extension of candidate input files, without the dot
    pub file_extension: String,

    /// Lock file created inside the input directory
    pub lock_file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_DIR),
            output_path: PathBuf::from(DEFAULT_OUTPUT_DIR),
            failed_path: None,
            failure_policy: FailurePolicy::default(),
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            table_name: DEFAULT_TABLE_NAME.to_string(),
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
            lock_file_name: DEFAULT_LOCK_FILE_NAME.to_string(),
        }
    }
}

impl Config {
    /// Default location of the configuration file
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Parse a TOML configuration file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::file_system(path, "failed to read config file", e))?;

        toml::from_str(&content).map_err(|e| {
            Error::configuration(format!(
                "Invalid config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Load defaults, then `config_file` if given, then environment overrides
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        debug!("Layered configuration: {:?}", config);
        Ok(config)
    }

    /// Apply `EVENT_LOADER_*` overrides looked up through `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(value) = lookup(env_vars::INPUT) {
            self.input_path = PathBuf::from(value);
        }
        if let Some(value) = lookup(env_vars::OUTPUT) {
            self.output_path = PathBuf::from(value);
        }
        if let Some(value) = lookup(env_vars::FAILED) {
            self.failed_path = Some(PathBuf::from(value));
        }
        if let Some(value) = lookup(env_vars::DATABASE) {
            self.database_path = PathBuf::from(value);
        }
        if let Some(value) = lookup(env_vars::TABLE) {
            self.table_name = value;
        }
        if let Some(value) = lookup(env_vars::EXTENSION) {
            self.file_extension = value;
        }
    }

    /// Quarantine directory for rejected files
    pub fn failed_dir(&self) -> PathBuf {
        self.failed_path
            .clone()
            .unwrap_or_else(|| self.input_path.join(DEFAULT_FAILED_DIR_NAME))
    }

    /// Check values that cannot be known to be wrong until used
    pub fn validate(&self) -> Result<()> {
        if !is_valid_identifier(&self.table_name) {
            return Err(Error::configuration(format!(
                "Table name '{}' must be a plain identifier (letters, digits, underscore)",
                self.table_name
            )));
        }

        let extension = self.file_extension.trim_start_matches('.');
        if extension.is_empty() || extension.contains(['/', '\\', '*', '?', '[', ']']) {
            return Err(Error::configuration(format!(
                "Invalid file extension '{}'",
                self.file_extension
            )));
        }

        if self.lock_file_name.is_empty() || self.lock_file_name.contains(['/', '\\']) {
            return Err(Error::configuration(format!(
                "Invalid lock file name '{}'",
                self.lock_file_name
            )));
        }

        if self.input_path == self.output_path {
            return Err(Error::configuration(
                "Input and output directories must differ",
            ));
        }

        if self.failure_policy == FailurePolicy::Quarantine
            && (self.failed_dir() == self.input_path || self.failed_dir() == self.output_path)
        {
            return Err(Error::configuration(
                "Failed directory must differ from the input and output directories",
            ));
        }

        Ok(())
    }

    /// Extension without a leading dot
    pub fn extension(&self) -> &str {
        self.file_extension.trim_start_matches('.')
    }
}
