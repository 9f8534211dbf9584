//! Resolved diagnostic target

use serde::{Deserialize, Serialize};

/// A validated target: normalized URL plus the bare hostname it points at.
///
/// The hostname resolved when the target was validated; it may stop
/// resolving before a later probe runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTarget {
    normalized_url: String,
    hostname: String,
}

impl ResolvedTarget {
    pub(crate) fn new(normalized_url: String, hostname: String) -> Self {
        Self {
            normalized_url,
            hostname,
        }
    }

    pub fn normalized_url(&self) -> &str {
        &self.normalized_url
    }

    /// Hostname without port or IPv6 brackets
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Whether the normalized URL uses https
    pub fn is_secure(&self) -> bool {
        self.normalized_url.starts_with("https://")
    }
}
