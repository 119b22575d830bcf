#![forbid(unsafe_code)]

//! Environment variable names shared by the pancake library, its tests and the
//! test helpers.

/// Environment variable naming the shell interpreter used to run commands.
///
/// The interpreter is invoked as `<shell> -c "<command>"` (or `/C` for
/// `cmd`-style shells on Windows).
///
/// # Examples
///
/// ```
/// use pancake_env::SHELL_ENV;
/// assert_eq!(SHELL_ENV, "PANCAKE_SHELL");
/// ```
pub const SHELL_ENV: &str = "PANCAKE_SHELL";
