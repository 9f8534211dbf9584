//! Type definitions and aliases

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// The seven website probes, in the order they execute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProbeKind {
    Ping,
    Latency,
    Dns,
    Http,
    Ssl,
    Whois,
    Traceroute,
}

impl ProbeKind {
    /// Fixed execution order for a diagnostic run
    pub const ORDERED: [ProbeKind; 7] = [
        ProbeKind::Ping,
        ProbeKind::Latency,
        ProbeKind::Dns,
        ProbeKind::Http,
        ProbeKind::Ssl,
        ProbeKind::Whois,
        ProbeKind::Traceroute,
    ];

    /// Section title shown above the probe's report
    pub fn title(&self) -> &'static str {
        match self {
            ProbeKind::Ping => "PING",
            ProbeKind::Latency => "LATENCY",
            ProbeKind::Dns => "DNS",
            ProbeKind::Http => "HTTP STATUS & HEADERS",
            ProbeKind::Ssl => "SSL/TLS CERTIFICATE",
            ProbeKind::Whois => "WHOIS",
            ProbeKind::Traceroute => "TRACEROUTE",
        }
    }

    /// Short lowercase name, matching the CLI flag
    pub fn flag(&self) -> &'static str {
        match self {
            ProbeKind::Ping => "ping",
            ProbeKind::Latency => "latency",
            ProbeKind::Dns => "dns",
            ProbeKind::Http => "http",
            ProbeKind::Ssl => "ssl",
            ProbeKind::Whois => "whois",
            ProbeKind::Traceroute => "trace",
        }
    }
}

/// Outcome tag carried by every probe report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbeStatus {
    /// The probe produced its report
    Succeeded,
    /// The probe hit an error and printed a warning instead
    Failed,
}

impl ProbeStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeStatus::Succeeded)
    }
}

/// Operating system family, used to pick external command flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    Other,
}

impl Platform {
    /// Platform this binary was compiled for
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::Other
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Platform::Windows => "Windows",
            Platform::MacOs => "macOS",
            Platform::Linux => "Linux",
            Platform::Other => "Unknown",
        }
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, Platform::Windows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_order_is_fixed() {
        assert_eq!(ProbeKind::ORDERED.first(), Some(&ProbeKind::Ping));
        assert_eq!(ProbeKind::ORDERED.last(), Some(&ProbeKind::Traceroute));
        let ssl_pos = ProbeKind::ORDERED.iter().position(|k| *k == ProbeKind::Ssl);
        let http_pos = ProbeKind::ORDERED.iter().position(|k| *k == ProbeKind::Http);
        assert!(http_pos < ssl_pos);
    }

    #[test]
    fn test_probe_flags() {
        let flags: Vec<&str> = ProbeKind::ORDERED.iter().map(|k| k.flag()).collect();
        assert_eq!(flags, ["ping", "latency", "dns", "http", "ssl", "whois", "trace"]);
    }

    #[test]
    fn test_platform_name() {
        let platform = Platform::current();
        assert!(!platform.name().is_empty());
        assert_eq!(Platform::Windows.is_windows(), true);
        assert_eq!(Platform::Linux.is_windows(), false);
    }
}
