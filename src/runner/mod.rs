//! Pipeline execution for a parsed [`Cli`].
//!
//! This module keeps `main` minimal by providing a single entry point that
//! parses the Pancakefile, orders its targets and runs their commands. Each
//! stage completes before the next begins.

mod error;
mod process;

pub use error::{EXIT_USAGE, RunnerError};
pub use process::{DEFAULT_SHELL, ExecError, ExecOptions, Shell, run_commands};

use crate::cli::Cli;
use crate::{manifest, sort};
use std::io::Write;
use tracing::{debug, info};

/// Outcome of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of targets in the execution order.
    pub targets: usize,
    /// Number of commands echoed (and run, unless this was a dry run).
    pub commands: usize,
}

/// Execute the Pancakefile named by `cli`, writing progress text to `out`.
///
/// Unless `cli.quiet` is set, the graph and the execution order are printed
/// first. Every command is echoed immediately before it runs.
///
/// # Errors
///
/// Returns [`RunnerError`] for the first failure of any stage.
///
/// # Examples
/// ```rust,no_run
/// use pancake::{cli::Cli, runner};
///
/// let cli = Cli::new("Pancakefile".into());
/// let mut out = std::io::stdout().lock();
/// let summary = runner::run(&cli, &mut out)?;
/// println!("ran {} commands", summary.commands);
/// # Ok::<(), runner::RunnerError>(())
/// ```
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<RunSummary, RunnerError> {
    let path = cli.manifest_path();
    info!(path = %path.display(), "loading Pancakefile");
    let graph = manifest::from_path(&path)?;
    let order = sort::topological_order(&graph)?;
    debug!(targets = graph.len(), "graph ready");

    if !cli.quiet {
        report(out, &format!("{graph}\n{order}"));
    }

    let options = ExecOptions {
        shell: Shell::from_env(),
        directory: cli.directory.clone(),
        dry_run: cli.dry_run,
    };
    let commands = run_commands(&graph, &order, &options, out)?;
    Ok(RunSummary {
        targets: order.as_slice().len(),
        commands,
    })
}

fn report(out: &mut dyn Write, text: &str) {
    if let Err(err) = writeln!(out, "{text}") {
        debug!("failed to write report: {err}");
    }
}

#[cfg(test)]
mod tests;
