//! Command-line interface definition and argument parsing

use crate::{
    models::CheckSelection,
    types::ProbeKind,
};
use clap::{Args, Parser, Subcommand};

pub mod help;

pub use help::HelpSystem;

/// Website and connection diagnostics
#[derive(Parser, Debug, Clone)]
#[command(
    name = "sysinformer",
    version = crate::VERSION,
    long_version = LONG_VERSION,
    about = "Website diagnostics: ping, latency, DNS, HTTP, TLS, WHOIS and traceroute",
    long_about = "Runs a selectable set of network probes against one website and prints \
                  a report per probe. Use 'latency' for a quick check of your own \
                  connection against well-known hosts.",
    after_help = "Use --help-topic <TOPIC> for detailed help on: probes, config, examples, requirements"
)]
pub struct Cli {
    /// Force colored output
    #[arg(long, global = true)]
    pub color: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log progress to stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Log debug details to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Show detailed help for a topic
    #[arg(long, value_name = "TOPIC")]
    pub help_topic: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nbuilt:  ",
    env!("BUILD_TIME"),
    "\ncommit: ",
    env!("GIT_COMMIT")
);

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Diagnose a website (hostname, IP or URL)
    Web(WebArgs),
    /// Measure latency to a set of well-known hosts
    Latency(LatencyArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct WebArgs {
    /// Target hostname, IP address or URL
    pub target: Option<String>,

    /// Run the ping probe
    #[arg(long)]
    pub ping: bool,

    /// Time a few sequential HTTP GETs
    #[arg(long)]
    pub latency: bool,

    /// Look up A/AAAA, MX, NS and TXT records
    #[arg(long)]
    pub dns: bool,

    /// Show the HTTP status and response headers
    #[arg(long)]
    pub http: bool,

    /// Inspect the TLS certificate
    #[arg(long)]
    pub ssl: bool,

    /// Query WHOIS registration data
    #[arg(long)]
    pub whois: bool,

    /// Run traceroute
    #[arg(long)]
    pub trace: bool,

    /// Run every probe (same as giving no probe flags)
    #[arg(long)]
    pub full: bool,

    /// Per-probe timeout in seconds [default: 10]
    #[arg(long, value_name = "SECS", allow_negative_numbers = true)]
    pub timeout: Option<i64>,

    /// Number of ping packets [default: 4]
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub count: Option<i64>,
}

impl WebArgs {
    /// Probe flags as a selection
    pub fn checks(&self) -> CheckSelection {
        let mut selection = CheckSelection {
            full: self.full,
            ..CheckSelection::default()
        };
        for (kind, enabled) in [
            (ProbeKind::Ping, self.ping),
            (ProbeKind::Latency, self.latency),
            (ProbeKind::Dns, self.dns),
            (ProbeKind::Http, self.http),
            (ProbeKind::Ssl, self.ssl),
            (ProbeKind::Whois, self.whois),
            (ProbeKind::Traceroute, self.trace),
        ] {
            selection.set(kind, enabled);
        }
        selection
    }

    /// Target with surrounding whitespace removed, if any was given
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

#[derive(Args, Debug, Clone)]
pub struct LatencyArgs {
    /// Host to sample; repeat for several (defaults to a built-in list)
    #[arg(long = "host", value_name = "HOST")]
    pub hosts: Vec<String>,

    /// Per-host timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = crate::defaults::SAMPLER_TIMEOUT.as_secs())]
    pub timeout: u64,
}

impl LatencyArgs {
    /// Hosts to sample, falling back to the built-in list
    pub fn hosts(&self) -> Vec<String> {
        if self.hosts.is_empty() {
            crate::defaults::DEFAULT_SAMPLE_HOSTS
                .iter()
                .map(|host| host.to_string())
                .collect()
        } else {
            self.hosts.clone()
        }
    }

    pub fn timeout(&self) -> std::time::Duration {
        if self.timeout == 0 {
            crate::defaults::SAMPLER_TIMEOUT
        } else {
            std::time::Duration::from_secs(self.timeout)
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate argument combinations clap cannot express
    pub fn validate(&self) -> Result<(), String> {
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }

        if let Some(Commands::Web(args)) = &self.command {
            if args.target().is_none() {
                return Err("Missing target. Usage: sysinformer web <TARGET> [PROBE FLAGS]".to_string());
            }
        }

        Ok(())
    }

    /// Whether to use colors, given the configured default
    pub fn use_colors(&self, configured: bool) -> bool {
        if self.no_color {
            false
        } else if self.color {
            true
        } else {
            configured && crate::output::ColoredFormatter::supports_color()
        }
    }

    pub fn should_show_topic_help(&self) -> bool {
        self.help_topic.is_some()
    }

    /// Render the requested help topic
    pub fn display_help(&self) -> String {
        let help_system = HelpSystem::new();
        let use_colors = self.use_colors(crate::defaults::DEFAULT_ENABLE_COLOR);

        match &self.help_topic {
            Some(topic) => help_system
                .display_topic_help(topic, use_colors)
                .unwrap_or_else(|| {
                    format!(
                        "Unknown help topic: '{}'\n\nAvailable topics: {}\n",
                        topic,
                        HelpSystem::TOPICS.join(", ")
                    )
                }),
            None => help_system.display_main_help(use_colors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_defaults() {
        let cli = Cli::parse_from(["sysinformer", "web", "example.com"]);
        let Some(Commands::Web(args)) = cli.command else {
            panic!("expected web subcommand");
        };
        assert_eq!(args.target(), Some("example.com"));
        assert_eq!(args.timeout, None);
        assert_eq!(args.count, None);
        assert!(args.checks().run_all());
    }

    #[test]
    fn test_probe_flags_map_to_selection() {
        let cli = Cli::parse_from(["sysinformer", "web", "example.com", "--dns", "--trace"]);
        let Some(Commands::Web(args)) = cli.command else {
            panic!("expected web subcommand");
        };
        let checks = args.checks();
        assert!(checks.dns);
        assert!(checks.trace);
        assert!(!checks.ping);
        assert_eq!(checks.effective(true), vec![ProbeKind::Dns, ProbeKind::Traceroute]);
    }

    #[test]
    fn test_negative_timeout_is_accepted() {
        let cli = Cli::parse_from(["sysinformer", "web", "example.com", "--timeout", "-1", "--count", "0"]);
        let Some(Commands::Web(args)) = cli.command else {
            panic!("expected web subcommand");
        };
        assert_eq!(args.timeout, Some(-1));
        assert_eq!(args.count, Some(0));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["sysinformer", "web", "example.com", "--no-color", "--debug"]);
        assert!(cli.no_color);
        assert!(cli.debug);
        assert!(!cli.use_colors(true));
    }

    #[test]
    fn test_latency_hosts() {
        let cli = Cli::parse_from(["sysinformer", "latency"]);
        let Some(Commands::Latency(args)) = cli.command else {
            panic!("expected latency subcommand");
        };
        assert_eq!(args.hosts().len(), crate::defaults::DEFAULT_SAMPLE_HOSTS.len());
        assert_eq!(args.timeout(), std::time::Duration::from_secs(3));

        let cli = Cli::parse_from(["sysinformer", "latency", "--host", "a.test", "--host", "b.test", "--timeout", "1"]);
        let Some(Commands::Latency(args)) = cli.command else {
            panic!("expected latency subcommand");
        };
        assert_eq!(args.hosts(), vec!["a.test", "b.test"]);
        assert_eq!(args.timeout(), std::time::Duration::from_secs(1));
    }

    #[test]
    fn test_cli_validation() {
        let conflict = Cli::parse_from(["sysinformer", "--color", "--no-color", "latency"]);
        assert!(conflict.validate().unwrap_err().contains("--color and --no-color"));

        let missing = Cli::parse_from(["sysinformer", "web"]);
        assert!(missing.validate().unwrap_err().contains("Missing target"));

        let blank = Cli::parse_from(["sysinformer", "web", "   "]);
        assert!(blank.validate().is_err());

        let ok = Cli::parse_from(["sysinformer", "web", "example.com"]);
        assert!(ok.validate().is_ok());

        let bare = Cli::parse_from(["sysinformer"]);
        assert!(bare.validate().is_ok());
        assert!(bare.command.is_none());
    }

    #[test]
    fn test_help_topics() {
        for topic in HelpSystem::TOPICS {
            let cli = Cli::parse_from(["sysinformer", "--no-color", "--help-topic", topic]);
            assert!(cli.should_show_topic_help());
            let help = cli.display_help();
            assert!(!help.is_empty());
            assert!(!help.contains("Unknown help topic"));
        }

        let cli = Cli::parse_from(["sysinformer", "--no-color", "--help-topic", "PROBES"]);
        assert!(cli.display_help().contains("--trace"));

        let cli = Cli::parse_from(["sysinformer", "--no-color", "--help-topic", "bogus"]);
        let help = cli.display_help();
        assert!(help.contains("Unknown help topic"));
        assert!(help.contains("bogus"));
        assert!(help.contains("Available topics:"));
    }
}
