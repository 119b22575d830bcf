//! Line classification for Pancakefile sources.
//!
//! A line declares a target when its first `:` appears before its first tab
//! (a line without any tab qualifies as long as it has a colon). A line is a
//! command when it starts with a tab. Anything else is ignored.

/// Separator between a target name and its dependency list.
pub const SEPARATOR: char = ':';

/// Leading character marking a command line.
pub const COMMAND_PREFIX: char = '\t';

/// Characters trimmed from declaration and command lines.
pub const LINE_TRIM: &[char] = &[' ', '\t', '\n', '\r'];

/// Characters trimmed from the dependency text after the separator.
pub const DEPENDENCY_TRIM: &[char] = &[' '];

/// Kind of a raw Pancakefile line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `name: dep dep`
    TargetDeclaration,
    /// A tab-indented shell command.
    Command,
    /// Blank or unrecognised; skipped by the builder.
    Other,
}

/// Classify `line` without modifying it.
///
/// # Examples
///
/// ```rust
/// use pancake::manifest::{LineKind, classify};
///
/// assert_eq!(classify("build: compile"), LineKind::TargetDeclaration);
/// assert_eq!(classify("\techo a:b"), LineKind::Command);
/// assert_eq!(classify("# notes"), LineKind::Other);
/// ```
#[must_use]
pub fn classify(line: &str) -> LineKind {
    if is_target(line) {
        LineKind::TargetDeclaration
    } else if is_command(line) {
        LineKind::Command
    } else {
        LineKind::Other
    }
}

fn is_target(line: &str) -> bool {
    match (line.find(SEPARATOR), line.find(COMMAND_PREFIX)) {
        (Some(colon), Some(tab)) => colon < tab,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

fn is_command(line: &str) -> bool {
    line.starts_with(COMMAND_PREFIX)
}

/// Trim every character in `chars` from both ends of `line` in place and
/// return the remaining length in bytes.
///
/// A zero return marks the line as a no-op for the builder.
pub fn trim_line(line: &mut String, chars: &[char]) -> usize {
    let end = line.trim_end_matches(chars).len();
    line.truncate(end);
    let start = line.len() - line.trim_start_matches(chars).len();
    line.replace_range(..start, "");
    line.len()
}
