//! Command line interface definition using clap.
//!
//! Pancake takes exactly one positional argument, the Pancakefile to run.
//! Flags tune logging and output but never add positional arguments.

use clap::Parser;
use std::path::PathBuf;

/// Run every command in a Pancakefile, dependencies first.
#[derive(Debug, Clone, Parser, PartialEq, Eq)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the Pancakefile describing targets and commands.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Run as if started in this directory.
    ///
    /// A relative FILE is resolved against this directory and commands run
    /// with it as their working directory.
    #[arg(short = 'C', long, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Enable verbose diagnostic logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the graph, order and commands without running anything.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Do not print the graph and execution order.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Create a configuration for `file` with every flag at its default.
    #[must_use]
    pub const fn new(file: PathBuf) -> Self {
        Self {
            file,
            directory: None,
            verbose: false,
            dry_run: false,
            quiet: false,
        }
    }

    /// Pancakefile path after applying `--directory`.
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        match &self.directory {
            Some(dir) if self.file.is_relative() => dir.join(&self.file),
            _ => self.file.clone(),
        }
    }
}
