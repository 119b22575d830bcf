//! Errors raised while reading and parsing a Pancakefile.

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a Pancakefile into a [`Graph`](crate::ast::Graph).
///
/// # Examples
/// ```rust
/// use pancake::manifest::{self, ManifestError};
///
/// let err = manifest::from_str("\techo orphan\n").expect_err("no target");
/// assert!(matches!(err, ManifestError::NoValidTarget { line: 1, .. }));
/// assert_eq!(err.to_string(), "no valid target for command on line 1");
/// ```
#[derive(Debug, Error, Diagnostic)]
pub enum ManifestError {
    /// The file could not be opened or failed part-way through reading.
    #[error("failed to read {}", path.display())]
    #[diagnostic(
        code(pancake::manifest::read),
        help("check that the Pancakefile exists and is readable")
    )]
    Read {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A command line appeared before any target declaration.
    #[error("no valid target for command on line {line}")]
    #[diagnostic(
        code(pancake::manifest::no_valid_target),
        help("declare a target such as `name:` above the first tab-indented command")
    )]
    NoValidTarget {
        /// 1-based line number of the offending command.
        line: usize,
        /// Source text for rendering.
        #[source_code]
        src: NamedSource<String>,
        /// The offending line.
        #[label("command has no target")]
        span: SourceSpan,
    },
}
