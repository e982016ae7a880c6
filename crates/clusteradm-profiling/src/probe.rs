//! Readiness probe that fires one of the downloader's gates.

use tokio::net::TcpStream;
use tracing::{debug, warn};

use clusteradm_core::Gate;

/// Connect once to `host:port` and fire `ready` on success or `stop` on
/// failure.
///
/// Returns whether the endpoint accepted the connection.
pub async fn probe_readiness(host: &str, port: u16, ready: &Gate, stop: &Gate) -> bool {
    match TcpStream::connect((host, port)).await {
        Ok(_) => {
            debug!(host, port, "Profile endpoint is accepting connections");
            ready.signal();
            true
        }
        Err(e) => {
            warn!(host, port, error = %e, "Profile endpoint is not reachable");
            stop.signal();
            false
        }
    }
}
