//! Command-line adapter for clusteradm.
//!
//! Parses arguments, wires the infrastructure in [`bootstrap`], and routes
//! each command to its handler.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings (used by integration tests)
#[cfg(test)]
use axum as _;
#[cfg(test)]
use serde_json as _;
#[cfg(test)]
use tempfile as _;

// Used by the binary only
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap, bootstrap_with_output};
pub use commands::{Commands, RegistryCommand};
pub use error::CliError;
pub use parser::Cli;
