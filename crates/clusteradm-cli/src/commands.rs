//! Main commands enum and subcommands.

use std::path::PathBuf;

use clap::Subcommand;

use clusteradm_profiling::DEFAULT_HOST;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage private registry credentials of the default ServiceAccount
    Registry {
        #[command(subcommand)]
        command: RegistryCommand,
    },

    /// Download a profile from a local debug endpoint
    Profiling {
        /// Local port the profile endpoint listens on
        #[arg(long)]
        port: u16,
        /// Profile kind: heap, profile, block, trace, mutex, goroutine,
        /// threadcreate or allocs
        #[arg(long)]
        kind: String,
        /// Output file (defaults to <kind>.pprof, or trace.out for traces)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Sampling duration for the profile and trace kinds
        #[arg(long)]
        seconds: Option<u32>,
        /// Host the endpoint is reached on
        #[arg(long, default_value = DEFAULT_HOST)]
        host: String,
    },
}

/// Registry credential subcommands.
///
/// Options are optional at parse time; missing values are reported by the
/// workflow with the exact option to supply.
#[derive(Subcommand)]
pub enum RegistryCommand {
    /// Store credentials and attach them to the default ServiceAccount
    Add {
        /// Registry server address
        #[arg(long)]
        server: Option<String>,
        /// Registry user name
        #[arg(long)]
        username: Option<String>,
        /// Registry password or token
        #[arg(long)]
        password: Option<String>,
        /// Contact email stored with the credentials
        #[arg(long)]
        email: Option<String>,
    },

    /// Detach and delete every credential for a server and user
    Remove {
        /// Registry server address
        #[arg(long)]
        server: Option<String>,
        /// Registry user name
        #[arg(long)]
        username: Option<String>,
    },

    /// List stored registry credentials
    List,
}
