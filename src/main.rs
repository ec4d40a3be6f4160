use anyhow::Context;
use clap::{CommandFactory, Parser};
use event_loader::cli::{args::Args, commands};
use event_loader::constants::exit_codes;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();

    // Without a subcommand, show help instead of guessing
    let Some(command) = args.command else {
        let _ = Args::command().print_help();
        println!();
        return ExitCode::from(exit_codes::SUCCESS);
    };

    match commands::run(command).context("event loader failed") {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            let code = error
                .downcast_ref::<event_loader::Error>()
                .map(event_loader::Error::exit_code)
                .unwrap_or(exit_codes::FAILURE);
            ExitCode::from(code)
        }
    }
}
