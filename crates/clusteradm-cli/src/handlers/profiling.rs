//! Profiling command handler.
//!
//! Wires a readiness probe and Ctrl-C to the downloader's gates and saves
//! the profile to a file.

use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, warn};

use clusteradm_profiling::{DownloadError, GatedDownloader, ProfileKind, probe_readiness};

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Arguments for the profiling command.
#[derive(Debug, Clone)]
pub struct ProfilingArgs {
    /// Local port of the profile endpoint.
    pub port: u16,
    /// Profile kind name as given on the command line.
    pub kind: String,
    /// Output file; derived from the kind when absent.
    pub output: Option<PathBuf>,
    /// Sampling duration for the kinds that take one.
    pub seconds: Option<u32>,
    /// Host the endpoint is reached on.
    pub host: String,
}

/// Execute the profiling command.
///
/// The output file is created before the download starts and removed
/// again if the download fails.
pub async fn execute(ctx: &CliContext, args: ProfilingArgs) -> Result<()> {
    let kind = ProfileKind::from_name(&args.kind);
    if kind == ProfileKind::Unknown {
        return Err(CliError::Usage(format!(
            "{}: '{}'",
            DownloadError::UnsupportedKind,
            args.kind
        ))
        .into());
    }

    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(kind.default_file_name()));

    // The endpoint is local; environment proxies never apply
    let client = reqwest::Client::builder()
        .no_proxy()
        .build()
        .map_err(|e| CliError::General(e.to_string()))?;
    let downloader = GatedDownloader::with_client(client, args.port)
        .with_host(args.host.clone())
        .with_seconds(args.seconds);

    let mut file = tokio::fs::File::create(&path)
        .await
        .map_err(CliError::from)?;

    let interrupt = tokio::spawn({
        let stop = downloader.stop_trigger();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                debug!("Interrupted, stopping download");
                stop.signal();
            }
        }
    });
    let probe = tokio::spawn({
        let (ready, stop) = (downloader.ready_trigger(), downloader.stop_trigger());
        let host = args.host;
        let port = args.port;
        async move { probe_readiness(&host, port, &ready, &stop).await }
    });

    let result = downloader.download(kind, &mut file).await;
    drop(file);
    interrupt.abort();
    probe.abort();

    if let Err(err) = result {
        if let Err(e) = tokio::fs::remove_file(&path).await {
            warn!(path = %path.display(), error = %e, "Failed to remove incomplete profile");
        }
        return Err(CliError::from(err).into());
    }

    ctx.output()
        .line(&format!("Saved {kind} profile to {}", path.display()));
    Ok(())
}
