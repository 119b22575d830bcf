//! Error types for the runner module.
//!
//! [`RunnerError`] gathers the failures of every pipeline stage so `main` can
//! report them once and pick an exit code.

use super::process::ExecError;
use crate::manifest::ManifestError;
use crate::sort::SortError;
use miette::Diagnostic;
use thiserror::Error;

/// Exit code clap uses for usage errors.
pub const EXIT_USAGE: u8 = 2;

/// Errors raised while running a Pancakefile.
#[derive(Debug, Error, Diagnostic)]
pub enum RunnerError {
    /// Reading or parsing the Pancakefile failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Manifest(#[from] ManifestError),

    /// Ordering the targets failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Sort(#[from] SortError),

    /// A command could not be started or did not succeed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Exec(#[from] ExecError),
}

impl RunnerError {
    /// Process exit code distinguishing each kind of failure.
    ///
    /// Usage errors are reported by clap with [`EXIT_USAGE`] before the runner
    /// starts.
    ///
    /// # Examples
    /// ```rust
    /// use pancake::runner::RunnerError;
    /// use pancake::sort::SortError;
    ///
    /// let err = RunnerError::from(SortError::CycleDetected { cycle: vec![] });
    /// assert_eq!(err.exit_code(), 6);
    /// ```
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Manifest(ManifestError::Read { .. }) => 3,
            Self::Manifest(ManifestError::NoValidTarget { .. }) => 4,
            Self::Sort(SortError::InvalidNode { .. })
            | Self::Exec(ExecError::UnknownTarget { .. }) => 5,
            Self::Sort(SortError::CycleDetected { .. }) => 6,
            Self::Exec(ExecError::Spawn { .. }) => 7,
            Self::Exec(ExecError::CommandFailed { .. }) => 8,
        }
    }
}
