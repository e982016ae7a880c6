//! Kubernetes API adapter for clusteradm.
//!
//! [`KubeApiClient`] talks to the API server over REST and implements the
//! core store ports. Errors are reported as [`ClusterApiError`] only while
//! building the client; store calls return core errors.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod error;
mod port;
mod wire;

// ============================================================================
// Public API
// ============================================================================

pub use client::KubeApiClient;
pub use config::{ClusterClientConfig, DEFAULT_API_SERVER};
pub use error::{ApiResult, ClusterApiError};

// Silence unused dev-dependency warnings
#[cfg(test)]
use axum as _;
#[cfg(test)]
use tokio as _;
