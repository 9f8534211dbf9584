//! sysinformer
//!
//! Website diagnostics from the command line. A target (hostname, IP or URL)
//! is validated and resolved once, then a selectable set of probes runs
//! against it in a fixed order: ping, HTTP latency, DNS records, HTTP status
//! and headers, TLS certificate, WHOIS and traceroute.

pub mod cli;
pub mod client;
pub mod config;
pub mod diagnostics;
pub mod dns;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod probes;
pub mod process;
pub mod sampler;
pub mod types;
pub mod validator;

// Re-export commonly used types
pub use diagnostics::WebDiagnostics;
pub use error::{AppError, Result};
pub use models::{CheckSelection, Config, DiagnosticRequest, ProbeReport, ReportBlock, ResolvedTarget};
pub use output::{ColoredFormatter, ConsoleSink, MemorySink, OutputFormatter, PlainFormatter, ReportSink};
pub use sampler::{HostSample, SampleOutcome};
pub use types::{Platform, ProbeKind, ProbeStatus};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    pub const DEFAULT_PING_COUNT: u32 = 4;
    pub const DEFAULT_LATENCY_SAMPLES: u32 = 3;
    pub const DEFAULT_ENABLE_COLOR: bool = true;

    /// Traceroute never gets less than this, whatever the request timeout
    pub const TRACEROUTE_MIN_TIMEOUT: Duration = Duration::from_secs(30);

    /// Rows kept from parsed WHOIS output
    pub const WHOIS_MAX_ROWS: usize = 25;
    /// Header values longer than this are cut and suffixed with "..."
    pub const HEADER_DISPLAY_WIDTH: usize = 120;
    /// Subject alternative names listed before "+N more"
    pub const SAN_DISPLAY_LIMIT: usize = 5;

    pub const SAMPLER_TIMEOUT: Duration = Duration::from_secs(3);
    pub const SAMPLER_CONCURRENCY: usize = 5;
    pub const DEFAULT_SAMPLE_HOSTS: &[&str] = &[
        "github.com",
        "google.com",
        "cloudflare.com",
        "amazon.com",
        "microsoft.com",
    ];

    pub const USER_AGENT: &str = concat!("sysinformer/", env!("CARGO_PKG_VERSION"));
}
