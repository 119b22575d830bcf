//! Ordering properties checked through the public parsing and sorting API.

use pancake::ast::Graph;
use pancake::{manifest, sort};
use rstest::rstest;

fn parse(source: &str) -> Graph {
    manifest::from_str(source).expect("parse")
}

/// Every target appears once, after all of its dependencies.
fn assert_valid_order(graph: &Graph) {
    let order = sort::topological_order(graph).expect("order");
    assert_eq!(order.as_slice().len(), graph.len());
    for (name, target) in graph.iter() {
        let at = order.position(name).expect("target present");
        assert_eq!(
            order.as_slice().iter().filter(|n| n.as_str() == name).count(),
            1,
            "{name} should appear exactly once"
        );
        for dep in &target.dependencies {
            if dep == name {
                continue;
            }
            let dep_at = order.position(dep).expect("dependency present");
            assert!(dep_at < at, "{dep} must precede {name} in {order}");
        }
    }
}

#[rstest]
#[case("build: compile\n\techo linking\n\ncompile:\n\techo compiling\n")]
#[case("a: b c\nb: c\nc:\n")]
#[case("c:\nb: c\na: b c\n")]
#[case("all: x y z\nx: y\ny: z\nz:\nlone:\n")]
#[case("top: l r\nl: base\nr: base base\nbase:\n")]
#[case("a: a b\nb: b\n")]
fn acyclic_graphs_sort_validly(#[case] source: &str) {
    assert_valid_order(&parse(source));
}

#[rstest]
fn wide_generated_graph_sorts_validly() {
    let mut source = String::from("all:");
    for i in 0..200 {
        source.push_str(&format!(" t{i}"));
    }
    source.push('\n');
    for i in 0..200 {
        source.push_str(&format!("t{i}:"));
        for j in (0..i).step_by(7) {
            source.push_str(&format!(" t{j}"));
        }
        source.push('\n');
    }
    assert_valid_order(&parse(&source));
}

#[rstest]
fn scenario_order_and_commands() {
    let graph = parse("build: compile\n\techo linking\n\ncompile:\n\techo compiling\n");
    let order = sort::topological_order(&graph).expect("order");
    let commands: Vec<&str> = order
        .as_slice()
        .iter()
        .filter_map(|name| graph.get(name))
        .flat_map(|target| target.commands.iter().map(String::as_str))
        .collect();
    assert_eq!(order.as_slice(), ["compile", "build"]);
    assert_eq!(commands, ["echo compiling", "echo linking"]);
}

#[rstest]
fn repeated_sorts_agree() {
    let graph = parse("d: b c\nc: a\nb: a\na:\ne: d\n");
    let first = sort::topological_order(&graph).expect("order");
    let second = sort::topological_order(&graph).expect("order");
    assert_eq!(first, second);
}

#[rstest]
fn undeclared_dependency_is_reported() {
    let graph = parse("a: b\n");
    let err = sort::topological_order(&graph).expect_err("invalid node");
    assert_eq!(
        err,
        sort::SortError::InvalidNode {
            node: "b".into(),
            dependent: "a".into()
        }
    );
}

#[rstest]
fn long_cycle_is_reported_in_canonical_form() {
    let graph = parse("root: d\nd: e\ne: c\nc: d\n");
    let err = sort::topological_order(&graph).expect_err("cycle");
    assert_eq!(err.to_string(), "cycle detected: c -> d -> e -> c");
}
