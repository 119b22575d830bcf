//! Application entry point.
//!
//! Parses command-line arguments and delegates execution to [`runner::run`].

use clap::Parser;
use pancake::{cli::Cli, runner};
use std::io;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let max_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    fmt()
        .with_max_level(max_level)
        .with_writer(io::stderr)
        .init();
    let mut stdout = io::stdout().lock();
    match runner::run(&cli, &mut stdout) {
        Ok(summary) => {
            tracing::debug!(
                targets = summary.targets,
                commands = summary.commands,
                "run complete"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            let code = err.exit_code();
            tracing::error!("{:?}", miette::Report::new(err));
            ExitCode::from(code)
        }
    }
}
