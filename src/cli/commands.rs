//! Command implementations for the event loader CLI
//!
//! This module contains the command execution logic, progress reporting and
//! result rendering for the CLI interface.

use crate::app::event_log::TracingEventLog;
use crate::app::services::batch_inserter::SqliteStore;
use crate::app::services::csv_parser::{CsvParser, ParseResult};
use crate::app::services::file_processor::{FileOutcome, FileProcessor, RunSummary, read_lines};
use crate::cli::args::{CheckArgs, Commands, OutputFormat, RunArgs};
use crate::config::Config;
use crate::constants::EVENT_LOG_TARGET;
use crate::{Error, Result};
use colored::Colorize;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Dispatch a parsed subcommand
pub fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Run(args) => run_loader(&args),
        Commands::Check(args) => check_file(&args),
    }
}

/// Process the input directory once
///
/// 1. Set up logging and configuration
/// 2. Open the database (in memory for dry runs)
/// 3. Hand the directory to the file processor
/// 4. Report the run summary
fn run_loader(args: &RunArgs) -> Result<()> {
    setup_logging(args.get_log_level(), args.quiet)?;

    info!("Starting event loader");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let config = load_configuration(args)?;
    validate_input_directory(&config)?;

    let store = if args.dry_run {
        info!("Performing dry run - nothing will be inserted or moved");
        SqliteStore::open_in_memory()?
    } else {
        info!("Using database {}", config.database_path.display());
        SqliteStore::open(&config.database_path)?
    };

    let progress = if args.show_progress() {
        create_progress_bar()
    } else {
        ProgressBar::hidden()
    };

    let mut processor = FileProcessor::new(config, store, Arc::new(TracingEventLog))
        .with_dry_run(args.dry_run)
        .with_progress(progress);

    let summary = processor.run()?;

    match args.output_format {
        OutputFormat::Human => print_human_summary(&summary, args.dry_run),
        OutputFormat::Json => print_json(&summary_to_json(&summary))?,
    }

    Ok(())
}

/// Validate one file without touching storage
fn check_file(args: &CheckArgs) -> Result<()> {
    setup_logging(args.get_log_level(), false)?;

    let lines = read_lines(&args.file)?;
    let parser = CsvParser::new(Arc::new(TracingEventLog));

    match parser.parse(&lines) {
        Ok(result) => {
            match args.output_format {
                OutputFormat::Human => print_human_check(&args.file, &result, args.show_skipped),
                OutputFormat::Json => print_json(&check_to_json(&args.file, &result))?,
            }
            Ok(())
        }
        Err(error) => {
            match args.output_format {
                OutputFormat::Human => println!(
                    "{} {}: {}",
                    "Rejected".bright_red().bold(),
                    args.file.display(),
                    error
                ),
                OutputFormat::Json => print_json(&serde_json::json!({
                    "file": args.file,
                    "status": "rejected",
                    "reason": error.to_string(),
                }))?,
            }
            Err(Error::file_rejected(&args.file, error.into()))
        }
    }
}

/// Set up structured logging
///
/// `RUST_LOG` wins when set. Otherwise crate diagnostics use `level` and the
/// operator event log stays at info unless quiet.
fn setup_logging(level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let events_level = if quiet { "error" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "event_loader={},{}={}",
            level, EVENT_LOG_TARGET, events_level
        ))
    });

    let result = if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", level);
    Ok(())
}

/// Load configuration using layered approach (file -> env -> args)
fn load_configuration(args: &RunArgs) -> Result<Config> {
    info!("Loading configuration");

    let default_config_path = if args.config_file.is_none() {
        Config::default_config_path().ok()
    } else {
        None
    };

    let config_file = match &args.config_file {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_ref()
            .filter(|path| path.exists())
            .map(|path| path.as_path()),
    };

    if let Some(config_path) = config_file {
        info!("Using config file: {}", config_path.display());
    } else {
        info!("No config file found, using defaults and environment variables");
    }

    let mut config = Config::load_layered(config_file)?;
    args.apply_overrides(&mut config);
    config.validate()?;

    debug!("Loaded configuration: {:?}", config);
    Ok(config)
}

/// The input directory must exist before anything else happens
fn validate_input_directory(config: &Config) -> Result<()> {
    let input = &config.input_path;

    if !input.exists() {
        return Err(Error::configuration(format!(
            "Input directory does not exist: {}",
            input.display()
        )));
    }

    if !input.is_dir() {
        return Err(Error::configuration(format!(
            "Input path is not a directory: {}",
            input.display()
        )));
    }

    Ok(())
}

fn create_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb
}

fn print_human_summary(summary: &RunSummary, dry_run: bool) {
    if summary.files_found == 0 {
        println!("{}", "No files to process.".yellow());
        return;
    }

    let title = match (dry_run, summary.is_clean()) {
        (true, _) => "Dry run complete".bright_cyan().bold(),
        (false, true) => "Event load complete".bright_green().bold(),
        (false, false) => "Event load complete with errors".bright_yellow().bold(),
    };
    let duration = HumanDuration(Duration::from_millis(summary.processing_time_ms));

    println!();
    println!("{}", title);
    println!("  Files found:           {}", summary.files_found);
    if dry_run {
        println!("  Files validated:       {}", summary.files_validated);
    } else {
        println!("  Files loaded:          {}", summary.files_loaded);
    }
    println!("  Files rejected:        {}", colour_count(summary.files_rejected));
    if summary.files_quarantined > 0 {
        println!("  Files quarantined:     {}", summary.files_quarantined);
    }
    if summary.relocation_failures > 0 {
        println!(
            "  Relocation failures:   {}",
            colour_count(summary.relocation_failures)
        );
    }
    println!("  Rows processed:        {}", summary.rows_processed);
    println!("  Rows inserted:         {}", summary.rows_inserted);
    println!("  Rows skipped:          {}", summary.rows_skipped);
    println!("  Processing time:       {}", duration);

    let rejected: Vec<_> = summary
        .outcomes
        .iter()
        .filter_map(|outcome| match outcome {
            FileOutcome::Rejected { file, reason, .. } => Some((file, reason)),
            _ => None,
        })
        .collect();

    if !rejected.is_empty() {
        println!();
        println!("{}", "Rejected files:".bright_red());
        for (file, reason) in rejected {
            println!("  {} {}", file.display(), format!("({})", reason).bright_black());
        }
    }

    println!();
}

fn colour_count(count: usize) -> String {
    if count > 0 {
        count.to_string().bright_red().to_string()
    } else {
        count.to_string()
    }
}

fn summary_to_json(summary: &RunSummary) -> serde_json::Value {
    serde_json::json!({
        "files_found": summary.files_found,
        "files_loaded": summary.files_loaded,
        "files_validated": summary.files_validated,
        "files_rejected": summary.files_rejected,
        "files_quarantined": summary.files_quarantined,
        "relocation_failures": summary.relocation_failures,
        "rows_processed": summary.rows_processed,
        "rows_inserted": summary.rows_inserted,
        "rows_skipped": summary.rows_skipped,
        "processing_time_seconds": summary.processing_time_ms as f64 / 1000.0,
        "files": summary.outcomes,
    })
}

fn print_human_check(file: &Path, result: &ParseResult, show_skipped: bool) {
    let stats = &result.stats;

    println!("{} {}", "Valid".bright_green().bold(), file.display());
    println!("  Columns:         {}", result.header.names().join(","));
    println!("  Rows processed:  {}", stats.processed);
    println!("  Rows accepted:   {}", stats.valid());
    println!("  Rows skipped:    {}", colour_count(stats.skipped));
    println!("  Success rate:    {:.1}%", stats.success_rate());

    if show_skipped && !stats.skipped_rows.is_empty() {
        println!();
        for row in &stats.skipped_rows {
            println!(
                "  line {}: {} {}",
                row.line_number,
                row.reason,
                format!("[{}]", row.raw).bright_black()
            );
        }
    }
}

fn check_to_json(file: &Path, result: &ParseResult) -> serde_json::Value {
    let stats = &result.stats;

    serde_json::json!({
        "file": file,
        "status": "valid",
        "columns": result.header.names(),
        "rows_processed": stats.processed,
        "rows_accepted": stats.valid(),
        "rows_skipped": stats.skipped,
        "success_rate": stats.success_rate(),
        "skipped_rows": stats.skipped_rows.iter().map(|row| {
            serde_json::json!({
                "line": row.line_number,
                "raw": row.raw,
                "reason": row.reason.to_string(),
            })
        }).collect::<Vec<_>>(),
    })
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::event_log::MemoryEventLog;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn sample_result() -> ParseResult {
        CsvParser::new(Arc::new(MemoryEventLog::new()))
            .parse(&[
                "eventAction,callRef,eventDatetime,eventValue,eventCurrencyCode",
                "foo,1,2018-01-15 10:14:56,1.00,GBP",
                "foo,x,2018-01-15 10:14:56,1.00,GBP",
            ])
            .unwrap()
    }

    #[test]
    fn test_validate_input_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.csv");
        std::fs::write(&file, "x").unwrap();

        let existing = Config {
            input_path: temp_dir.path().to_path_buf(),
            ..Config::default()
        };
        assert!(validate_input_directory(&existing).is_ok());

        let missing = Config {
            input_path: temp_dir.path().join("absent"),
            ..Config::default()
        };
        assert!(validate_input_directory(&missing).is_err());

        let not_dir = Config {
            input_path: file,
            ..Config::default()
        };
        assert!(validate_input_directory(&not_dir).is_err());
    }

    #[test]
    fn test_load_configuration_applies_cli_last() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            "input_path = \"/file/in\"\ntable_name = \"from_file\"\n",
        )
        .unwrap();

        let args = RunArgs {
            config_file: Some(config_path),
            table_name: Some("from_cli".to_string()),
            ..RunArgs::default()
        };

        let config = load_configuration(&args).unwrap();
        assert_eq!(config.table_name, "from_cli");
    }

    #[test]
    fn test_summary_json_shape() {
        let mut summary = RunSummary {
            files_found: 1,
            processing_time_ms: 1500,
            ..RunSummary::default()
        };
        summary.record(FileOutcome::Loaded {
            file: PathBuf::from("in/a.csv"),
            processed: 3,
            skipped: 1,
            inserted: 2,
            relocated: true,
        });

        let json = summary_to_json(&summary);

        assert_eq!(json["files_loaded"], 1);
        assert_eq!(json["rows_inserted"], 2);
        assert_eq!(json["processing_time_seconds"], 1.5);
        assert_eq!(json["files"][0]["status"], "loaded");
        assert_eq!(json["files"][0]["file"], "in/a.csv");
    }

    #[test]
    fn test_check_json_lists_skipped_rows() {
        let json = check_to_json(Path::new("a.csv"), &sample_result());

        assert_eq!(json["status"], "valid");
        assert_eq!(json["rows_processed"], 2);
        assert_eq!(json["rows_accepted"], 1);
        assert_eq!(json["skipped_rows"][0]["line"], 3);
        assert_eq!(json["skipped_rows"][0]["reason"], "missing or invalid call ref");
        assert_eq!(
            json["columns"],
            serde_json::json!([
                "eventAction",
                "callRef",
                "eventDatetime",
                "eventValue",
                "eventCurrencyCode"
            ])
        );
    }
}
