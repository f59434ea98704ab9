//! CLI Adapter
//!
//! Command-line interface for the scanner binary.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::CliApp;
