//! Pancake core library.
//!
//! Pancake reads a Pancakefile of targets, each with dependencies and
//! tab-indented shell commands, and runs every command with dependencies
//! first. The pipeline is [`manifest`] → [`sort`] → [`runner`], and each stage
//! finishes before the next starts.

pub mod ast;
pub mod cli;
pub mod manifest;
pub mod runner;
pub mod sort;
