//! Diagnostic request and check selection

use crate::models::Config;
use crate::types::ProbeKind;
use std::time::Duration;

/// Which probes the user asked for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckSelection {
    pub ping: bool,
    pub latency: bool,
    pub dns: bool,
    pub http: bool,
    pub ssl: bool,
    pub whois: bool,
    pub trace: bool,
    pub full: bool,
}

impl CheckSelection {
    /// Selection equivalent to `--full`
    pub fn full() -> Self {
        Self {
            full: true,
            ..Self::default()
        }
    }

    /// Selection with exactly one probe flag set
    pub fn only(kind: ProbeKind) -> Self {
        let mut selection = Self::default();
        selection.set(kind, true);
        selection
    }

    pub fn set(&mut self, kind: ProbeKind, enabled: bool) {
        match kind {
            ProbeKind::Ping => self.ping = enabled,
            ProbeKind::Latency => self.latency = enabled,
            ProbeKind::Dns => self.dns = enabled,
            ProbeKind::Http => self.http = enabled,
            ProbeKind::Ssl => self.ssl = enabled,
            ProbeKind::Whois => self.whois = enabled,
            ProbeKind::Traceroute => self.trace = enabled,
        }
    }

    /// Whether the individual flag for `kind` was given
    pub fn is_set(&self, kind: ProbeKind) -> bool {
        match kind {
            ProbeKind::Ping => self.ping,
            ProbeKind::Latency => self.latency,
            ProbeKind::Dns => self.dns,
            ProbeKind::Http => self.http,
            ProbeKind::Ssl => self.ssl,
            ProbeKind::Whois => self.whois,
            ProbeKind::Traceroute => self.trace,
        }
    }

    /// `full`, or no individual flag at all
    pub fn run_all(&self) -> bool {
        self.full || !ProbeKind::ORDERED.iter().any(|kind| self.is_set(*kind))
    }

    /// Whether `kind` belongs to the effective check set.
    ///
    /// SSL only joins a run-all pass when the target URL is https; an explicit
    /// `--ssl` always runs it.
    pub fn should_run(&self, kind: ProbeKind, secure_target: bool) -> bool {
        match kind {
            ProbeKind::Ssl => self.ssl || (self.run_all() && secure_target),
            other => self.run_all() || self.is_set(other),
        }
    }

    /// Effective check set in execution order
    pub fn effective(&self, secure_target: bool) -> Vec<ProbeKind> {
        ProbeKind::ORDERED
            .iter()
            .copied()
            .filter(|kind| self.should_run(*kind, secure_target))
            .collect()
    }
}

/// A fully defaulted diagnostic request for one target
#[derive(Debug, Clone)]
pub struct DiagnosticRequest {
    target: String,
    checks: CheckSelection,
    timeout: Duration,
    ping_count: u32,
    latency_samples: u32,
}

impl DiagnosticRequest {
    /// Build a request with default timeout and counts
    pub fn new<S: Into<String>>(target: S, checks: CheckSelection) -> Self {
        Self {
            target: target.into(),
            checks,
            timeout: crate::defaults::DEFAULT_TIMEOUT,
            ping_count: crate::defaults::DEFAULT_PING_COUNT,
            latency_samples: crate::defaults::DEFAULT_LATENCY_SAMPLES,
        }
    }

    /// Build a request from loaded configuration
    pub fn from_config<S: Into<String>>(target: S, checks: CheckSelection, config: &Config) -> Self {
        Self::new(target, checks)
            .with_timeout_secs(config.timeout_seconds)
            .with_ping_count(config.ping_count)
            .with_latency_samples(config.latency_samples)
    }

    /// Timeout in seconds; zero or negative keeps the default
    pub fn with_timeout_secs(mut self, seconds: i64) -> Self {
        self.timeout = if seconds <= 0 {
            crate::defaults::DEFAULT_TIMEOUT
        } else {
            Duration::from_secs(seconds as u64)
        };
        self
    }

    /// Timeout as a Duration; zero keeps the default
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = if timeout.is_zero() {
            crate::defaults::DEFAULT_TIMEOUT
        } else {
            timeout
        };
        self
    }

    /// Ping count; zero or negative keeps the default
    pub fn with_ping_count(mut self, count: i64) -> Self {
        self.ping_count = if count <= 0 {
            crate::defaults::DEFAULT_PING_COUNT
        } else {
            u32::try_from(count).unwrap_or(u32::MAX)
        };
        self
    }

    /// Latency attempts; zero keeps the default
    pub fn with_latency_samples(mut self, samples: u32) -> Self {
        self.latency_samples = if samples == 0 {
            crate::defaults::DEFAULT_LATENCY_SAMPLES
        } else {
            samples
        };
        self
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn checks(&self) -> &CheckSelection {
        &self.checks
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn ping_count(&self) -> u32 {
        self.ping_count
    }

    pub fn latency_samples(&self) -> u32 {
        self.latency_samples
    }
}
