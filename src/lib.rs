//! `sprintboard` - Sprint board issue tracker CLI
//!
//! This crate provides the `sb` binary on top of `sprintboard-lib`.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - Layered YAML/env configuration
//! - [`format`] - Output formatting (text, JSON)
//! - [`logging`] - `tracing` subscriber setup

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod format;
pub mod logging;

/// Run the CLI application.
///
/// This is the main entry point called from `main()`.
///
/// # Errors
///
/// Returns an error if configuration fails or command execution fails.
pub fn run() -> anyhow::Result<()> {
    cli::run()
}
