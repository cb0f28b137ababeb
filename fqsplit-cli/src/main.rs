//! fqsplit command-line entry point

use clap::Parser;
use fqsplit_cli::error::{is_usage_error, USAGE_EXIT_CODE};
use fqsplit_cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            if is_usage_error(&err) {
                eprintln!(
                    "\nFor more information, try 'fqsplit {} --help'.",
                    cli.command.name()
                );
                ExitCode::from(USAGE_EXIT_CODE)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
