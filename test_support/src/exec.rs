//! Helpers for creating executable stubs in tests.
//!
//! These utilities write tiny shell scripts and mark them executable so tests
//! can stand in for the interpreter pancake spawns. Callers own the containing
//! directory's lifetime to keep the stub on disk.
//!
//! # Examples
//!
//! ```rust
//! use tempfile::TempDir;
//! use test_support::write_shell_stub;
//!
//! let temp = TempDir::new().expect("tempdir");
//! let path = write_shell_stub(temp.path(), "fake-sh", "exit 0").expect("stub");
//! assert!(path.exists());
//! ```

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Write a `/bin/sh` script named `name` inside `root` whose body is `body`.
///
/// The script receives pancake's `-c <command>` arguments as `$1` and `$2`.
pub fn write_shell_stub(root: &Path, name: &str, body: &str) -> Result<PathBuf> {
    let path = root.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n"))
        .with_context(|| format!("write shell stub {name}"))?;
    make_executable(&path)?;
    Ok(path)
}

/// Mark an existing file as executable on Unix; no-op elsewhere.
pub fn make_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        let mut perms = fs::metadata(path)
            .context("stat shell stub")?
            .permissions();
        perms.set_mode(0o755);
        fs::set_permissions(path, perms).context("chmod shell stub")?;
    }

    #[cfg(not(unix))]
    let _ = path;

    Ok(())
}
