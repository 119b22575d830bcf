//! Test utilities for pancake's integration tests.
//!
//! Helpers here write Pancakefiles and stub shells into temporary directories
//! and serialise changes to process-wide environment variables.

pub mod env_lock;
pub mod exec;

pub use env_lock::EnvLock;
pub use exec::{make_executable, write_shell_stub};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Write `contents` to a file named `Pancakefile` in a fresh temporary
/// directory.
///
/// Returns the directory guard and the file path; the file is removed when the
/// guard drops.
///
/// # Examples
///
/// ```rust
/// let (_dir, path) = test_support::pancakefile("all:\n\techo hi\n").expect("write");
/// assert!(path.ends_with("Pancakefile"));
/// ```
pub fn pancakefile(contents: &str) -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new().context("create temp dir for Pancakefile")?;
    let path = dir.path().join("Pancakefile");
    fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
    Ok((dir, path))
}
