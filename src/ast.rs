//! Pancakefile data model.
//!
//! A parsed Pancakefile is a [`Graph`]: a map from target name to the
//! [`Target`] declared under that name. The map keeps declaration order, which
//! is the order targets are rendered in and the order the sorter starts its
//! traversals from.
//!
//! ```rust
//! use pancake::ast::{Graph, Target};
//!
//! let graph: Graph = [
//!     ("build".to_owned(), Target::new(vec!["compile".into()], vec!["echo link".into()])),
//!     ("compile".to_owned(), Target::default()),
//! ]
//! .into_iter()
//! .collect();
//! assert_eq!(graph.names().collect::<Vec<_>>(), ["build", "compile"]);
//! ```

use indexmap::IndexMap;
use std::fmt;

/// A named unit of work: the targets it requires and the commands it runs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Target {
    /// Names of the targets that must run first, in declaration order.
    ///
    /// Duplicates are kept as written.
    pub dependencies: Vec<String>,
    /// Shell commands, in declaration order.
    pub commands: Vec<String>,
}

impl Target {
    /// Create a target from its dependency and command lists.
    #[must_use]
    pub const fn new(dependencies: Vec<String>, commands: Vec<String>) -> Self {
        Self {
            dependencies,
            commands,
        }
    }
}

/// Mapping from target name to [`Target`], in declaration order.
///
/// Only the manifest builder grows a graph in place; everything downstream
/// reads it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Graph {
    targets: IndexMap<String, Target>,
}

impl Graph {
    /// Return the target declared as `name`, creating an empty one if needed.
    pub(crate) fn declare(&mut self, name: &str) -> &mut Target {
        self.targets.entry(name.to_owned()).or_default()
    }

    /// Borrow a declared target mutably.
    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Target> {
        self.targets.get_mut(name)
    }

    /// Look up a declared target.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Target> {
        self.targets.get(name)
    }

    /// Look up a declared target along with the graph's own copy of its name.
    #[must_use]
    pub fn get_key_value(&self, name: &str) -> Option<(&str, &Target)> {
        self.targets
            .get_key_value(name)
            .map(|(key, target)| (key.as_str(), target))
    }

    /// Whether `name` was declared as a target.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.targets.contains_key(name)
    }

    /// Iterate over declared target names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.targets.keys().map(String::as_str)
    }

    /// Iterate over `(name, target)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Target)> {
        self.targets.iter().map(|(name, target)| (name.as_str(), target))
    }

    /// Number of declared targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether no target was declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl FromIterator<(String, Target)> for Graph {
    fn from_iter<I: IntoIterator<Item = (String, Target)>>(iter: I) -> Self {
        Self {
            targets: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, target) in self.iter() {
            writeln!(f, "* Target: {name}")?;
            writeln!(f, "  - Dependencies: {}", NameList(&target.dependencies))?;
            writeln!(f, "  - Commands: {}", NameList(&target.commands))?;
        }
        Ok(())
    }
}

/// Renders a list of strings as `[ a b c ]`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NameList<'a>(pub(crate) &'a [String]);

impl fmt::Display for NameList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[ ")?;
        for item in self.0 {
            write!(f, "{item} ")?;
        }
        f.write_str("]")
    }
}
