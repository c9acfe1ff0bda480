//! shellcomp CLI
//!
//! This crate provides the command-line interface for shellcomp including:
//! - generate: Write a bash, zsh or fish completion script
//! - markdown: Write a markdown reference page
//! - check: Validate a description file
//! - completion: Completion script for shellcomp itself (hidden)

pub mod commands;

pub use commands::{Cli, Commands};
