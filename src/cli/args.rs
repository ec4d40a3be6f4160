//! Command-line argument definitions for the event loader
//!
//! This module defines the CLI interface using the clap derive API. Flags
//! given here are the last configuration layer, applied on top of the
//! config file and environment.

use crate::config::{Config, FailurePolicy};
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the event loader
///
/// Loads comma-separated event files from an input directory into a SQLite
/// table, one batch per file, moving each loaded file to an output directory.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "event-loader",
    version,
    about = "Load CSV event files from a directory into SQLite",
    long_about = "Scans an input directory for event files, validates every row against the \
                  five-column event schema, writes each file's accepted rows to SQLite in a \
                  single batch and moves the file to the output directory. Files that cannot \
                  be loaded are moved to a failed directory. Only one instance may process a \
                  directory at a time."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Process every pending file in the input directory
    Run(RunArgs),
    /// Parse a single file and report what would be loaded
    Check(CheckArgs),
}

/// Arguments for the run command
#[derive(Debug, Clone, Default, Parser)]
pub struct RunArgs {
    /// Directory watched for new event files
    #[arg(
        short = 'i',
        long = "input",
        value_name = "DIR",
        help = "Input directory containing event files"
    )]
    pub input_path: Option<PathBuf>,

    /// Directory receiving successfully loaded files
    ///
    /// Created on first use if it does not exist.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Directory receiving loaded files"
    )]
    pub output_path: Option<PathBuf>,

    /// Directory receiving files that could not be loaded
    ///
    /// Defaults to a `failed` directory inside the input directory.
    #[arg(
        long = "failed",
        value_name = "DIR",
        help = "Directory receiving rejected files"
    )]
    pub failed_path: Option<PathBuf>,

    /// Leave rejected files in the input directory instead of moving them
    #[arg(
        long = "leave-failed",
        help = "Leave rejected files in place",
        conflicts_with = "failed_path"
    )]
    pub leave_failed: bool,

    /// SQLite database file
    #[arg(
        short = 'd',
        long = "database",
        value_name = "FILE",
        help = "SQLite database file"
    )]
    pub database_path: Option<PathBuf>,

    /// Target table name
    #[arg(
        short = 't',
        long = "table",
        value_name = "NAME",
        help = "Table receiving event rows"
    )]
    pub table_name: Option<String>,

    /// Extension of candidate input files
    #[arg(
        long = "extension",
        value_name = "EXT",
        help = "Extension of input files (default: csv)"
    )]
    pub file_extension: Option<String>,

    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// ~/.config/event-loader/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Validate files without inserting or moving anything
    #[arg(
        long = "dry-run",
        help = "Parse and validate files without loading or moving them"
    )]
    pub dry_run: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for the run summary
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the check command
#[derive(Debug, Clone, Parser)]
pub struct CheckArgs {
    /// Event file to validate
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Print every rejected row with its reason
    #[arg(long = "show-skipped", help = "List rejected rows")]
    pub show_skipped: bool,

    /// Enable verbose logging output
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Output format for the report
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the report"
    )]
    pub output_format: OutputFormat,
}

/// Output format options for results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON format for scripting
    Json,
}

impl RunArgs {
    /// Validate the run arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        if let Some(table) = &self.table_name {
            if table.trim().is_empty() {
                return Err(Error::configuration("Table name cannot be empty"));
            }
        }

        Ok(())
    }

    /// Apply explicitly given flags on top of `config`
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(path) = &self.input_path {
            config.input_path = path.clone();
        }
        if let Some(path) = &self.output_path {
            config.output_path = path.clone();
        }
        if let Some(path) = &self.failed_path {
            config.failed_path = Some(path.clone());
            config.failure_policy = FailurePolicy::Quarantine;
        }
        if self.leave_failed {
            config.failure_policy = FailurePolicy::LeaveInPlace;
        }
        if let Some(path) = &self.database_path {
            config.database_path = path.clone();
        }
        if let Some(table) = &self.table_name {
            config.table_name = table.clone();
        }
        if let Some(extension) = &self.file_extension {
            config.file_extension = extension.clone();
        }
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            log_level_for(self.verbose)
        }
    }

    /// Check if we should show progress bars (not in quiet mode or JSON output)
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.output_format == OutputFormat::Human
    }
}

impl CheckArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level_for(self.verbose)
    }
}

fn log_level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
