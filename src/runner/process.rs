//! Shell resolution and sequential command execution.
//!
//! Each command is echoed to the output sink, then run through the shell with
//! inherited standard streams. The caller blocks until the child exits; the
//! first failure stops the whole run.

use crate::ast::Graph;
use crate::sort::ExecutionOrder;
use miette::Diagnostic;
use pancake_env::SHELL_ENV;
use std::env;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use thiserror::Error;
use tracing::{debug, info};

/// Default shell interpreter.
#[cfg(not(windows))]
pub const DEFAULT_SHELL: &str = "sh";
/// Default shell interpreter.
#[cfg(windows)]
pub const DEFAULT_SHELL: &str = "cmd";

/// Errors raised while running target commands.
#[derive(Debug, Error, Diagnostic)]
pub enum ExecError {
    /// The operating system could not start the shell.
    #[error("failed to spawn `{command}` for target `{target}`")]
    #[diagnostic(
        code(pancake::exec::spawn),
        help("check the shell interpreter, or set PANCAKE_SHELL to override it")
    )]
    Spawn {
        /// Target owning the command.
        target: String,
        /// Command text.
        command: String,
        /// Underlying spawn failure.
        #[source]
        source: io::Error,
    },

    /// The execution order names a target the graph does not declare.
    #[error("target `{target}` is not declared in the graph")]
    #[diagnostic(
        code(pancake::exec::unknown_target),
        help("run an order computed from the same graph")
    )]
    UnknownTarget {
        /// Name missing from the graph.
        target: String,
    },

    /// The command ran but did not exit successfully.
    #[error("child failed: `{command}` for target `{target}` {}", describe_exit(*code))]
    #[diagnostic(code(pancake::exec::child_failed))]
    CommandFailed {
        /// Target owning the command.
        target: String,
        /// Command text.
        command: String,
        /// Exit code, or `None` when the child was killed by a signal.
        code: Option<i32>,
    },
}

fn describe_exit(code: Option<i32>) -> String {
    code.map_or_else(
        || "was terminated by a signal".to_owned(),
        |code| format!("exited with status {code}"),
    )
}

/// Shell interpreter used to run command text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    program: PathBuf,
}

impl Shell {
    /// Use `program` as the interpreter.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Resolve the interpreter from the environment, falling back to
    /// [`DEFAULT_SHELL`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| env::var_os(key))
    }

    fn from_env_with<F>(mut read_env: F) -> Self
    where
        F: FnMut(&str) -> Option<OsString>,
    {
        read_env(SHELL_ENV)
            .and_then(|value| value.into_string().ok())
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| Self::new(DEFAULT_SHELL), Self::new)
    }

    /// Interpreter program path.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Flag that makes the interpreter run its next argument as a command.
    #[must_use]
    pub fn command_flag(&self) -> &'static str {
        let is_cmd = self
            .program
            .file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| stem.eq_ignore_ascii_case("cmd"));
        if is_cmd { "/C" } else { "-c" }
    }

    /// Build a process that runs `text` through this shell.
    #[must_use]
    pub fn command(&self, text: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg(self.command_flag()).arg(text);
        cmd
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new(DEFAULT_SHELL)
    }
}

/// Settings for [`run_commands`].
#[derive(Debug, Clone, Default)]
pub struct ExecOptions {
    /// Interpreter for every command.
    pub shell: Shell,
    /// Working directory for spawned commands; inherits ours when `None`.
    pub directory: Option<PathBuf>,
    /// Echo commands without spawning them.
    pub dry_run: bool,
}

/// Run every command of every target in `order`, echoing each to `sink`
/// before it starts.
///
/// Returns the number of commands that ran (or would have run, in a dry run).
///
/// # Errors
///
/// Returns [`ExecError::UnknownTarget`] if `order` names a target missing from
/// `graph`, [`ExecError::Spawn`] if a shell cannot be started and
/// [`ExecError::CommandFailed`] on the first command that does not succeed.
/// No further commands run after an error.
pub fn run_commands(
    graph: &Graph,
    order: &ExecutionOrder,
    options: &ExecOptions,
    sink: &mut dyn Write,
) -> Result<usize, ExecError> {
    let mut executed = 0;
    for name in order {
        let target = graph.get(name).ok_or_else(|| ExecError::UnknownTarget {
            target: name.clone(),
        })?;
        for text in &target.commands {
            echo(sink, text);
            executed += 1;
            if options.dry_run {
                continue;
            }
            run_one(name, text, options)?;
        }
    }
    Ok(executed)
}

fn echo(sink: &mut dyn Write, text: &str) {
    if let Err(err) = writeln!(sink, "{text}").and_then(|()| sink.flush()) {
        debug!("failed to echo command to output: {err}");
    }
}

fn run_one(target: &str, text: &str, options: &ExecOptions) -> Result<(), ExecError> {
    let mut cmd = options.shell.command(text);
    if let Some(dir) = &options.directory {
        cmd.current_dir(dir);
    }
    info!(
        target: "pancake::exec",
        shell = %options.shell.program().display(),
        owner = %target,
        "Running command: {text}"
    );
    let status = cmd.status().map_err(|source| ExecError::Spawn {
        target: target.to_owned(),
        command: text.to_owned(),
        source,
    })?;
    check_exit_status(target, text, status)
}

fn check_exit_status(target: &str, text: &str, status: ExitStatus) -> Result<(), ExecError> {
    if status.success() {
        Ok(())
    } else {
        Err(ExecError::CommandFailed {
            target: target.to_owned(),
            command: text.to_owned(),
            code: status.code(),
        })
    }
}
