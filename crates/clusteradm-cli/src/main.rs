//! CLI entry point - the composition root.
//!
//! Loads `.env`, installs logging, bootstraps the context, and dispatches
//! to handlers. Failures exit with the code their `CliError` maps to.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use clusteradm_cli::{Cli, CliConfig, CliError, Commands, RegistryCommand, bootstrap, handlers};
use clusteradm_registry::{AddRegistry, RemoveRegistry};

/// Install the stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::from_cli(&cli);
    let ctx = bootstrap(&config)?;

    match cli.command {
        Commands::Registry { command } => match command {
            RegistryCommand::Add {
                server,
                username,
                password,
                email,
            } => {
                let request = AddRegistry {
                    server: server.unwrap_or_default(),
                    username: username.unwrap_or_default(),
                    password: password.unwrap_or_default(),
                    email,
                };
                handlers::registry::add(&ctx, request).await?;
            }
            RegistryCommand::Remove { server, username } => {
                let request = RemoveRegistry {
                    server: server.unwrap_or_default(),
                    username: username.unwrap_or_default(),
                };
                handlers::registry::remove(&ctx, request).await?;
            }
            RegistryCommand::List => {
                handlers::registry::list(&ctx).await?;
            }
        },
        Commands::Profiling {
            port,
            kind,
            output,
            seconds,
            host,
        } => {
            let args = handlers::profiling::ProfilingArgs {
                port,
                kind,
                output,
                seconds,
                host,
            };
            handlers::profiling::execute(&ctx, args).await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    // Load environment variables before clap reads them
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
        eprintln!("Error: {err:#}");
        std::process::exit(code);
    }
}
