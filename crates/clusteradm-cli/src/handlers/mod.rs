//! Command handlers.
//!
//! Handlers are thin wrappers that:
//! 1. Turn CLI input into workflow requests
//! 2. Call the composed services from `CliContext`
//! 3. Format output for the terminal
//!
//! Failures are returned as `CliError` inside `anyhow::Error` so the binary
//! can recover the exit code.

pub mod profiling;
pub mod registry;
