//! Serialise environment mutations across tests.
//!
//! The `EnvLock` guard ensures that changes to global state like
//! `PANCAKE_SHELL` are synchronised, preventing interference between
//! concurrently running tests.

use pancake_env::SHELL_ENV;
use std::env;
use std::ffi::{OsStr, OsString};
use std::sync::{Mutex, MutexGuard};
use std::{fmt, fmt::Formatter};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// RAII guard that holds the global environment lock.
///
/// When created with [`EnvLock::with_shell`] the previous `PANCAKE_SHELL`
/// value is restored on drop.
pub struct EnvLock {
    previous_shell: Option<Option<OsString>>,
    _guard: MutexGuard<'static, ()>,
}

impl fmt::Debug for EnvLock {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvLock").finish_non_exhaustive()
    }
}

impl EnvLock {
    /// Acquire the global lock serialising environment mutations.
    pub fn acquire() -> Self {
        let guard = ENV_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Self {
            previous_shell: None,
            _guard: guard,
        }
    }

    /// Acquire the lock and point `PANCAKE_SHELL` at `shell` until the guard
    /// drops.
    pub fn with_shell(shell: impl AsRef<OsStr>) -> Self {
        let mut lock = Self::acquire();
        lock.previous_shell = Some(env::var_os(SHELL_ENV));
        // SAFETY: the global lock serialises every environment mutation made
        // through these helpers.
        unsafe { env::set_var(SHELL_ENV, shell) };
        lock
    }
}

impl Drop for EnvLock {
    fn drop(&mut self) {
        let Some(previous) = self.previous_shell.take() else {
            return;
        };
        // SAFETY: the lock is still held while the value is restored.
        unsafe {
            match previous {
                Some(value) => env::set_var(SHELL_ENV, value),
                None => env::remove_var(SHELL_ENV),
            }
        }
    }
}
