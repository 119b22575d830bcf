//! Pancakefile parsing.
//!
//! Lines are classified one at a time and folded into a [`Graph`]. The
//! builder remembers the most recently declared target so that following
//! command lines can be attached to it; a command seen before any declaration
//! is an error.
//!
//! ```rust
//! use pancake::manifest;
//!
//! let graph = manifest::from_str("build: compile\n\techo linking\ncompile:\n")?;
//! let build = graph.get("build").expect("declared");
//! assert_eq!(build.dependencies, ["compile"]);
//! assert_eq!(build.commands, ["echo linking"]);
//! assert!(graph.get("compile").is_some_and(|t| t.dependencies.is_empty()));
//! # Ok::<(), pancake::manifest::ManifestError>(())
//! ```

mod classify;
mod error;

pub use classify::{
    COMMAND_PREFIX, DEPENDENCY_TRIM, LINE_TRIM, LineKind, SEPARATOR, classify, trim_line,
};
pub use error::ManifestError;

use crate::ast::Graph;
use miette::{NamedSource, SourceSpan};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Name used in diagnostics when the source did not come from a file.
const INLINE_SOURCE_NAME: &str = "<inline>";

/// Where command lines currently attach.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ParseState {
    NoCurrentTarget,
    HaveCurrentTarget(String),
}

/// Read `path` and parse it into a [`Graph`].
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD rather than
/// rejected, so a Latin-1 line still parses and runs.
///
/// # Errors
///
/// Returns [`ManifestError::Read`] if the file cannot be read and
/// [`ManifestError::NoValidTarget`] if a command precedes every target.
pub fn from_path(path: &Path) -> Result<Graph, ManifestError> {
    let bytes = fs::read(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "read Pancakefile");
    let source = String::from_utf8_lossy(&bytes);
    parse(&path.display().to_string(), &source)
}

/// Parse Pancakefile text that did not come from a file.
///
/// # Errors
///
/// Returns [`ManifestError::NoValidTarget`] if a command precedes every
/// target.
pub fn from_str(source: &str) -> Result<Graph, ManifestError> {
    parse(INLINE_SOURCE_NAME, source)
}

fn parse(name: &str, source: &str) -> Result<Graph, ManifestError> {
    let mut graph = Graph::default();
    let mut state = ParseState::NoCurrentTarget;
    let mut offset = 0;

    for (idx, raw) in source.split_inclusive('\n').enumerate() {
        let span = SourceSpan::from((offset, raw.trim_end_matches(['\n', '\r']).len()));
        offset += raw.len();
        let mut line = raw.to_owned();
        match classify(&line) {
            LineKind::TargetDeclaration => {
                if trim_line(&mut line, LINE_TRIM) > 0 {
                    state = declare_target(&mut graph, &line);
                }
            }
            LineKind::Command => {
                if trim_line(&mut line, LINE_TRIM) == 0 {
                    continue;
                }
                let ParseState::HaveCurrentTarget(current) = &state else {
                    return Err(ManifestError::NoValidTarget {
                        line: idx + 1,
                        src: NamedSource::new(name, source.to_owned()),
                        span,
                    });
                };
                debug!(name = %current, command = %line, "attach command");
                if let Some(target) = graph.get_mut(current) {
                    target.commands.push(line);
                }
            }
            LineKind::Other => {}
        }
    }
    Ok(graph)
}

/// Record a declaration line and return the new parser state.
fn declare_target(graph: &mut Graph, line: &str) -> ParseState {
    let (name, rest) = line.split_once(SEPARATOR).unwrap_or((line, ""));
    let name = name.trim_matches(LINE_TRIM);
    let mut dependency_text = rest.to_owned();
    trim_line(&mut dependency_text, DEPENDENCY_TRIM);

    let target = graph.declare(name);
    target.dependencies.extend(
        dependency_text
            .split(' ')
            .filter(|token| !token.is_empty())
            .map(str::to_owned),
    );
    debug!(
        name = %name,
        dependencies = ?target.dependencies,
        "declare target"
    );
    ParseState::HaveCurrentTarget(name.to_owned())
}
