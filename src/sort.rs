//! Dependency ordering for a parsed [`Graph`].
//!
//! The sorter walks the graph depth first with an explicit stack, emitting each
//! target once all of its dependencies have been emitted. Nodes are coloured
//! unvisited, in progress or done; reaching an in-progress node through a
//! different target means the graph has a cycle. A target listing itself as a
//! dependency is tolerated and skipped.

use crate::ast::{Graph, NameList};
use miette::Diagnostic;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Errors raised while ordering targets.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum SortError {
    /// A dependency names a target that was never declared.
    #[error("invalid node `{node}` required by `{dependent}`")]
    #[diagnostic(
        code(pancake::sort::invalid_node),
        help("declare the missing target or remove it from the dependency list")
    )]
    InvalidNode {
        /// The undeclared dependency.
        node: String,
        /// The target that listed it.
        dependent: String,
    },

    /// Two or more targets depend on each other.
    #[error("cycle detected: {}", cycle.join(" -> "))]
    #[diagnostic(code(pancake::sort::cycle))]
    CycleDetected {
        /// Targets along the cycle; the first name is repeated at the end.
        cycle: Vec<String>,
    },
}

/// Targets in the order their commands must run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExecutionOrder(Vec<String>);

impl ExecutionOrder {
    /// Borrow the ordered target names.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Position of `name` in the order, if present.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|n| n == name)
    }
}

impl fmt::Display for ExecutionOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&NameList(&self.0), f)
    }
}

impl<'a> IntoIterator for &'a ExecutionOrder {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Mark {
    InProgress,
    Done,
}

struct Frame<'g> {
    node: &'g str,
    dependencies: &'g [String],
    next: usize,
}

/// Order every target in `graph` so that dependencies come first.
///
/// Traversal starts from each target in declaration order, and each target's
/// dependencies are visited in the order they were written, so the result is
/// deterministic for a given graph.
///
/// # Errors
///
/// Returns [`SortError::InvalidNode`] when a dependency was never declared and
/// [`SortError::CycleDetected`] when targets depend on each other.
///
/// # Examples
/// ```rust
/// use pancake::{manifest, sort};
///
/// let graph = manifest::from_str("build: compile\ncompile:\n")?;
/// let order = sort::topological_order(&graph)?;
/// assert_eq!(order.as_slice(), ["compile", "build"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn topological_order(graph: &Graph) -> Result<ExecutionOrder, SortError> {
    let mut marks: HashMap<&str, Mark> = HashMap::with_capacity(graph.len());
    let mut order = Vec::with_capacity(graph.len());

    for (root, target) in graph.iter() {
        if marks.contains_key(root) {
            continue;
        }
        marks.insert(root, Mark::InProgress);
        let mut stack = vec![Frame {
            node: root,
            dependencies: &target.dependencies,
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let node = frame.node;
            let dependencies = frame.dependencies;
            let Some(dep) = dependencies.get(frame.next) else {
                stack.pop();
                marks.insert(node, Mark::Done);
                order.push(node.to_owned());
                continue;
            };
            frame.next += 1;

            if dep == node {
                debug!(name = %node, "ignoring self dependency");
                continue;
            }
            let Some((name, dep_target)) = graph.get_key_value(dep) else {
                return Err(SortError::InvalidNode {
                    node: dep.clone(),
                    dependent: node.to_owned(),
                });
            };
            match marks.get(name) {
                Some(Mark::Done) => {}
                Some(Mark::InProgress) => {
                    return Err(SortError::CycleDetected {
                        cycle: cycle_through(&stack, name),
                    });
                }
                None => {
                    marks.insert(name, Mark::InProgress);
                    stack.push(Frame {
                        node: name,
                        dependencies: &dep_target.dependencies,
                        next: 0,
                    });
                }
            }
        }
    }

    debug!(order = ?order, "computed execution order");
    Ok(ExecutionOrder(order))
}

/// Collect the in-progress path from `start` to the top of the stack.
fn cycle_through(stack: &[Frame<'_>], start: &str) -> Vec<String> {
    let mut cycle: Vec<String> = stack
        .iter()
        .skip_while(|frame| frame.node != start)
        .map(|frame| frame.node.to_owned())
        .collect();
    cycle.push(start.to_owned());
    canonicalize_cycle(cycle)
}

/// Rotate a closed cycle so that it starts at its smallest name.
fn canonicalize_cycle(mut cycle: Vec<String>) -> Vec<String> {
    if cycle.len() < 2 {
        return cycle;
    }
    let len = cycle.len() - 1;
    let start = cycle
        .iter()
        .take(len)
        .enumerate()
        .min_by(|(_, a), (_, b)| a.cmp(b))
        .map_or(0, |(idx, _)| idx);
    let (prefix, suffix) = cycle.split_at_mut(len);
    prefix.rotate_left(start);
    if let (Some(first), Some(slot)) = (prefix.first().cloned(), suffix.first_mut()) {
        *slot = first;
    }
    cycle
}
