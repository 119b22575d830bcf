//! Tests for the runner pipeline and command execution.

use super::*;
use crate::ast::Graph;
use rstest::{fixture, rstest};
use std::fs;
use tempfile::TempDir;

#[fixture]
fn workdir() -> TempDir {
    TempDir::new().expect("temp dir")
}

fn options_in(dir: &TempDir) -> ExecOptions {
    ExecOptions {
        shell: Shell::default(),
        directory: Some(dir.path().to_path_buf()),
        dry_run: false,
    }
}

fn plan(source: &str) -> (Graph, sort::ExecutionOrder) {
    let graph = manifest::from_str(source).expect("parse");
    let order = sort::topological_order(&graph).expect("order");
    (graph, order)
}

#[cfg(unix)]
#[rstest]
fn runs_commands_in_dependency_order(workdir: TempDir) {
    let (graph, order) = plan(
        "build: compile\n\techo linking >> log\n\ncompile:\n\techo compiling >> log\n",
    );
    let mut out = Vec::new();
    let count = run_commands(&graph, &order, &options_in(&workdir), &mut out).expect("run");

    assert_eq!(count, 2);
    let echoed = String::from_utf8(out).expect("utf8");
    assert_eq!(echoed, "echo compiling >> log\necho linking >> log\n");
    let log = fs::read_to_string(workdir.path().join("log")).expect("log");
    assert_eq!(log, "compiling\nlinking\n");
}

#[cfg(unix)]
#[rstest]
fn failure_stops_remaining_commands(workdir: TempDir) {
    let (graph, order) = plan(
        "all: first\n\ttouch after\nfirst:\n\ttouch before\n\texit 3\n\ttouch skipped\n",
    );
    let mut out = Vec::new();
    let err = run_commands(&graph, &order, &options_in(&workdir), &mut out)
        .expect_err("command failure");

    assert!(
        matches!(
            &err,
            ExecError::CommandFailed { target, command, code: Some(3) }
                if target == "first" && command == "exit 3"
        ),
        "unexpected error: {err:?}"
    );
    assert!(workdir.path().join("before").exists());
    assert!(!workdir.path().join("skipped").exists());
    assert!(!workdir.path().join("after").exists());
    let echoed = String::from_utf8(out).expect("utf8");
    assert_eq!(echoed, "touch before\nexit 3\n");
}

#[cfg(unix)]
#[rstest]
fn signal_termination_has_no_exit_code(workdir: TempDir) {
    let (graph, order) = plan("a:\n\tkill -9 $$\n");
    let err = run_commands(&graph, &order, &options_in(&workdir), &mut Vec::new())
        .expect_err("killed");
    assert!(matches!(err, ExecError::CommandFailed { code: None, .. }));
}

#[rstest]
fn missing_shell_is_spawn_error(workdir: TempDir) {
    let (graph, order) = plan("a:\n\techo hi\n");
    let options = ExecOptions {
        shell: Shell::new(workdir.path().join("no-such-shell")),
        ..options_in(&workdir)
    };
    let err = run_commands(&graph, &order, &options, &mut Vec::new()).expect_err("spawn");
    assert!(matches!(err, ExecError::Spawn { .. }));
}

#[rstest]
fn order_from_another_graph_is_rejected(workdir: TempDir) {
    let (_, order) = plan("a: b\n\ttouch a\nb:\n\ttouch b\n");
    let (graph, _) = plan("a:\n\ttouch a\n");
    let mut out = Vec::new();
    let err = run_commands(&graph, &order, &options_in(&workdir), &mut out)
        .expect_err("unknown target");

    assert!(
        matches!(&err, ExecError::UnknownTarget { target } if target == "b"),
        "unexpected error: {err:?}"
    );
    assert_eq!(RunnerError::from(err).exit_code(), 5);
    assert!(out.is_empty());
    assert!(!workdir.path().join("a").exists());
}

#[rstest]
fn dry_run_echoes_without_spawning(workdir: TempDir) {
    let (graph, order) = plan("a: b\n\ttouch a\nb:\n\ttouch b\n");
    let options = ExecOptions {
        dry_run: true,
        ..options_in(&workdir)
    };
    let mut out = Vec::new();
    let count = run_commands(&graph, &order, &options, &mut out).expect("dry run");

    assert_eq!(count, 2);
    assert_eq!(String::from_utf8(out).expect("utf8"), "touch b\ntouch a\n");
    assert!(!workdir.path().join("a").exists());
    assert!(!workdir.path().join("b").exists());
}

#[rstest]
fn targets_without_commands_run_nothing(workdir: TempDir) {
    let (graph, order) = plan("a: a\n");
    let mut out = Vec::new();
    let count = run_commands(&graph, &order, &options_in(&workdir), &mut out).expect("run");
    assert_eq!(count, 0);
    assert!(out.is_empty());
}

#[rstest]
fn run_prints_graph_and_order_before_commands(workdir: TempDir) {
    let path = workdir.path().join("Pancakefile");
    fs::write(&path, "build: compile\n\techo linking\n\ncompile:\n\techo compiling\n")
        .expect("write Pancakefile");
    let mut cli = Cli::new(path);
    cli.dry_run = true;

    let mut out = Vec::new();
    let summary = run(&cli, &mut out).expect("run");

    assert_eq!(
        summary,
        RunSummary {
            targets: 2,
            commands: 2
        }
    );
    let expected = concat!(
        "* Target: build\n",
        "  - Dependencies: [ compile ]\n",
        "  - Commands: [ echo linking ]\n",
        "* Target: compile\n",
        "  - Dependencies: [ ]\n",
        "  - Commands: [ echo compiling ]\n",
        "\n",
        "[ compile build ]\n",
        "echo compiling\n",
        "echo linking\n",
    );
    assert_eq!(String::from_utf8(out).expect("utf8"), expected);
}

#[rstest]
fn quiet_run_only_echoes_commands(workdir: TempDir) {
    let path = workdir.path().join("Pancakefile");
    fs::write(&path, "a:\n\techo hi\n").expect("write Pancakefile");
    let mut cli = Cli::new(path);
    cli.dry_run = true;
    cli.quiet = true;

    let mut out = Vec::new();
    run(&cli, &mut out).expect("run");
    assert_eq!(String::from_utf8(out).expect("utf8"), "echo hi\n");
}

#[rstest]
#[case("\techo orphan\n", 4)]
#[case("a: missing\n", 5)]
#[case("a: b\nb: a\n", 6)]
fn run_maps_failures_to_exit_codes(
    workdir: TempDir,
    #[case] source: &str,
    #[case] expected: u8,
) {
    let path = workdir.path().join("Pancakefile");
    fs::write(&path, source).expect("write Pancakefile");
    let err = run(&Cli::new(path), &mut Vec::new()).expect_err("failure");
    assert_eq!(err.exit_code(), expected);
}

#[rstest]
fn run_reports_missing_file(workdir: TempDir) {
    let err = run(&Cli::new(workdir.path().join("absent")), &mut Vec::new())
        .expect_err("missing file");
    assert!(matches!(err, RunnerError::Manifest(_)));
    assert_eq!(err.exit_code(), 3);
}
