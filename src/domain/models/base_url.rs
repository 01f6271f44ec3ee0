//! Address of a node HTTP daemon.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Location of a node's HTTP API: `{ hostname, port, scheme }`.
///
/// Equality is structural. No further structure (paths, credentials) is
/// carried; API paths are appended by the HTTP client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseUrl {
    /// Host name or IP address
    pub hostname: String,
    /// TCP port
    pub port: u16,
    /// URL scheme, `http` or `https`
    pub scheme: String,
}

impl BaseUrl {
    pub fn new(hostname: impl Into<String>, port: u16, scheme: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            port,
            scheme: scheme.into(),
        }
    }

    /// Render as `scheme://hostname:port`.
    pub fn url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.hostname, self.port)
    }

    /// Whether the hostname refers to the local machine.
    pub fn is_local(&self) -> bool {
        is_loopback(&self.hostname)
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url())
    }
}

pub(crate) fn is_loopback(hostname: &str) -> bool {
    matches!(hostname, "localhost" | "127.0.0.1" | "0.0.0.0" | "::1" | "[::1]")
        || hostname.ends_with(".localhost")
}
