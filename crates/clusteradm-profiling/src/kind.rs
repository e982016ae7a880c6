//! Profile kinds and their debug endpoints.

use std::fmt;
use std::str::FromStr;

/// Path prefix shared by every profile endpoint.
const ENDPOINT_PREFIX: &str = "/debug/pprof/";

/// The profiles a server exposes under `/debug/pprof/`.
///
/// Parsing never fails: unrecognized names map to [`ProfileKind::Unknown`],
/// which the downloader rejects before touching the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProfileKind {
    /// Sentinel for anything not in the table.
    #[default]
    Unknown,
    Heap,
    /// CPU profile.
    Profile,
    Block,
    /// Execution trace.
    Trace,
    Mutex,
    Goroutine,
    ThreadCreate,
    Allocs,
}

impl ProfileKind {
    /// Every supported kind, in table order.
    pub const ALL: [Self; 8] = [
        Self::Heap,
        Self::Profile,
        Self::Block,
        Self::Trace,
        Self::Mutex,
        Self::Goroutine,
        Self::ThreadCreate,
        Self::Allocs,
    ];

    /// Parse a kind name; unrecognized names yield `Unknown`.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| kind.endpoint_name() == Some(name))
            .unwrap_or_default()
    }

    /// The endpoint name, or `None` for `Unknown`.
    pub const fn endpoint_name(self) -> Option<&'static str> {
        match self {
            Self::Unknown => None,
            Self::Heap => Some("heap"),
            Self::Profile => Some("profile"),
            Self::Block => Some("block"),
            Self::Trace => Some("trace"),
            Self::Mutex => Some("mutex"),
            Self::Goroutine => Some("goroutine"),
            Self::ThreadCreate => Some("threadcreate"),
            Self::Allocs => Some("allocs"),
        }
    }

    /// Request path of the endpoint, e.g. `/debug/pprof/heap`.
    pub fn path(self) -> Option<String> {
        self.endpoint_name()
            .map(|name| format!("{ENDPOINT_PREFIX}{name}"))
    }

    /// Whether the endpoint samples over a duration (`?seconds=N`).
    pub const fn supports_duration(self) -> bool {
        matches!(self, Self::Profile | Self::Trace)
    }

    /// Default file name for a saved profile of this kind.
    pub fn default_file_name(self) -> String {
        match self {
            Self::Trace => "trace.out".to_string(),
            other => format!("{other}.pprof"),
        }
    }
}

impl FromStr for ProfileKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint_name().unwrap_or("unknown"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_round_trips_through_its_name() {
        for kind in ProfileKind::ALL {
            assert_eq!(ProfileKind::from_name(&kind.to_string()), kind);
        }
    }

    #[test]
    fn unrecognized_name_is_unknown() {
        assert_eq!(ProfileKind::from_name("cpu"), ProfileKind::Unknown);
        assert_eq!(ProfileKind::from_name("HEAP"), ProfileKind::Unknown);
        assert_eq!(ProfileKind::from_name(""), ProfileKind::Unknown);
        assert_eq!(ProfileKind::Unknown.path(), None);
    }

    #[test]
    fn paths() {
        assert_eq!(ProfileKind::Heap.path().as_deref(), Some("/debug/pprof/heap"));
        assert_eq!(
            ProfileKind::ThreadCreate.path().as_deref(),
            Some("/debug/pprof/threadcreate")
        );
    }

    #[test]
    fn only_sampling_kinds_take_a_duration() {
        let sampling: Vec<_> = ProfileKind::ALL
            .into_iter()
            .filter(|k| k.supports_duration())
            .collect();
        assert_eq!(sampling, vec![ProfileKind::Profile, ProfileKind::Trace]);
    }

    #[test]
    fn default_file_names() {
        assert_eq!(ProfileKind::Heap.default_file_name(), "heap.pprof");
        assert_eq!(ProfileKind::Trace.default_file_name(), "trace.out");
    }
}
