//! Profile downloads from a local debug endpoint.
//!
//! The [`GatedDownloader`] holds off until its ready gate fires and stays
//! cancellable through its stop gate for the whole transfer. A
//! [`probe_readiness`] call is the usual way to fire one of the two.

#![deny(unused_crate_dependencies)]

mod downloader;
mod error;
mod kind;
mod probe;

pub use downloader::{DEFAULT_HOST, GatedDownloader};
pub use error::DownloadError;
pub use kind::ProfileKind;
pub use probe::probe_readiness;

#[cfg(test)]
use axum as _;
