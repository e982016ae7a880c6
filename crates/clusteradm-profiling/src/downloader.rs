//! Readiness-gated profile download.
//!
//! A [`GatedDownloader`] waits for whichever of its two gates fires first.
//! The ready gate lets a single GET go out to the local endpoint; the stop
//! gate aborts before the request, or cancels it while the body is still
//! streaming.
//!
//! # Cancellation
//!
//! Both waits are `tokio::select!` races with the stop gate polled first,
//! so a stop that is already signaled always wins. Cancelling drops the
//! in-flight response, which closes its connection.

use futures_util::StreamExt;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use clusteradm_core::Gate;

use crate::error::DownloadError;
use crate::kind::ProfileKind;

/// Host the profile endpoint is reached on.
pub const DEFAULT_HOST: &str = "localhost";

/// Downloads one profile once the local endpoint is ready.
#[derive(Debug, Clone)]
pub struct GatedDownloader {
    ready: Gate,
    stop: Gate,
    client: reqwest::Client,
    host: String,
    local_port: u16,
    seconds: Option<u32>,
}

impl GatedDownloader {
    /// Create a downloader for `localhost:<local_port>` with pending gates.
    ///
    /// The default client has no request timeout; a download only ends
    /// through completion, failure, or the stop gate.
    pub fn new(local_port: u16) -> Self {
        Self::with_client(reqwest::Client::new(), local_port)
    }

    /// Create a downloader with a caller-provided HTTP client.
    pub fn with_client(client: reqwest::Client, local_port: u16) -> Self {
        Self {
            ready: Gate::new(),
            stop: Gate::new(),
            client,
            host: DEFAULT_HOST.to_string(),
            local_port,
            seconds: None,
        }
    }

    /// Override the host the endpoint is reached on.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sampling duration for the kinds that take one.
    #[must_use]
    pub const fn with_seconds(mut self, seconds: Option<u32>) -> Self {
        self.seconds = seconds;
        self
    }

    /// Handle that fires the ready gate.
    pub fn ready_trigger(&self) -> Gate {
        self.ready.clone()
    }

    /// Handle that fires the stop gate.
    pub fn stop_trigger(&self) -> Gate {
        self.stop.clone()
    }

    /// Fire the ready gate.
    pub fn signal_ready(&self) {
        self.ready.signal();
    }

    /// Fire the stop gate.
    pub fn signal_stop(&self) {
        self.stop.signal();
    }

    /// Full URL of the endpoint for `kind`, or `None` for `Unknown`.
    pub fn url_for(&self, kind: ProfileKind) -> Option<String> {
        let path = kind.path()?;
        let mut url = format!("http://{}:{}{path}", self.host, self.local_port);
        if let Some(seconds) = self.seconds.filter(|_| kind.supports_duration()) {
            url.push_str(&format!("?seconds={seconds}"));
        }
        Some(url)
    }

    /// Download the `kind` profile into `sink`.
    ///
    /// Waits for the ready or stop gate, then streams the response body
    /// chunk by chunk. Succeeds only after the body ended and the sink was
    /// flushed. On failure the sink may hold a partial body.
    pub async fn download<W>(&self, kind: ProfileKind, sink: &mut W) -> Result<(), DownloadError>
    where
        W: AsyncWrite + Unpin + Send + ?Sized,
    {
        let url = self.url_for(kind).ok_or(DownloadError::UnsupportedKind)?;

        tokio::select! {
            biased;

            () = self.stop.signaled() => {
                debug!(%kind, "Stopped before the endpoint became ready");
                return Err(DownloadError::Aborted);
            }

            () = self.ready.signaled() => {}
        }

        debug!(%url, "Endpoint ready, requesting profile");

        tokio::select! {
            biased;

            () = self.stop.signaled() => {
                info!(%kind, "Profile download canceled");
                Err(DownloadError::Canceled)
            }

            result = self.fetch(&url, sink) => {
                let written = result?;
                debug!(%kind, bytes = written, "Profile downloaded");
                Ok(())
            }
        }
    }

    async fn fetch<W>(&self, url: &str, sink: &mut W) -> Result<u64, DownloadError>
    where
        W: AsyncWrite + Unpin + Send + ?Sized,
    {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(DownloadError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        let mut written = 0u64;
        let mut body = response.bytes_stream();
        while let Some(chunk) = body.next().await {
            let chunk = chunk?;
            sink.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        sink.flush().await?;
        Ok(written)
    }
}
