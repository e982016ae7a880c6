//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for cluster administration tasks.
///
/// Global options configure the connection to the API server; they are
/// ignored by commands that never reach it.
#[derive(Parser)]
#[command(name = "clusteradm")]
#[command(about = "Manage registry credentials and collect profiles")]
#[command(version)]
pub struct Cli {
    /// Kubernetes API server URL
    #[arg(long = "api-server", env = "CLUSTERADM_API_SERVER", global = true)]
    pub api_server: Option<String>,

    /// Bearer token for the API server
    #[arg(
        long = "token",
        env = "CLUSTERADM_TOKEN",
        hide_env_values = true,
        global = true
    )]
    pub token: Option<String>,

    /// Skip verification of the API server certificate
    #[arg(long = "insecure-skip-tls-verify", global = true)]
    pub insecure_skip_tls_verify: bool,

    /// Timeout in seconds for each API server request
    #[arg(long = "request-timeout", default_value_t = 30, global = true)]
    pub request_timeout: u64,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}
