//! Topic help pages for `--help-topic`
//!
//! clap renders the flag reference; these pages cover what the probes do,
//! how configuration layers, worked examples and the external tools some
//! probes depend on.

use crate::{config::EnvManager, types::Platform};
use colored::*;

/// Help pages for the CLI
pub struct HelpSystem {
    platform: Platform,
}

impl Default for HelpSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpSystem {
    /// Topics accepted by `--help-topic`
    pub const TOPICS: [&'static str; 4] = ["probes", "config", "examples", "requirements"];

    pub fn new() -> Self {
        Self {
            platform: Platform::current(),
        }
    }

    /// Overview with pointers to every topic
    pub fn display_main_help(&self, use_colors: bool) -> String {
        let mut help = String::new();
        help.push_str(&self.format_header(use_colors));
        help.push('\n');
        help.push_str(&self.format_usage_section(use_colors));
        help.push('\n');
        help.push_str(&self.format_footer(use_colors));
        help
    }

    /// Page for one topic, case-insensitive; `None` for unknown topics
    pub fn display_topic_help(&self, topic: &str, use_colors: bool) -> Option<String> {
        match topic.trim().to_lowercase().as_str() {
            "probes" | "probe" | "checks" => Some(self.format_probes_help(use_colors)),
            "config" | "configuration" | "env" => Some(self.format_configuration_help(use_colors)),
            "examples" | "example" => Some(self.format_examples_section(use_colors)),
            "requirements" | "tools" => Some(self.format_requirements_help(use_colors)),
            _ => None,
        }
    }

    fn heading(&self, text: &str, use_colors: bool) -> String {
        if use_colors {
            text.bright_green().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, use_colors: bool) -> String {
        let title = "sysinformer";
        let subtitle = "Website diagnostics from the command line";
        let version = crate::VERSION;

        if use_colors {
            format!(
                "{}\n{}\nVersion: {} | Platform: {}\n",
                title.bright_cyan().bold(),
                subtitle.bright_blue(),
                version.green(),
                self.platform.name().yellow()
            )
        } else {
            format!(
                "{}\n{}\nVersion: {} | Platform: {}\n",
                title,
                subtitle,
                version,
                self.platform.name()
            )
        }
    }

    fn format_usage_section(&self, use_colors: bool) -> String {
        let patterns = [
            "sysinformer web <TARGET> [PROBE FLAGS] [--timeout <SECS>] [--count <N>]",
            "sysinformer latency [--host <HOST>]... [--timeout <SECS>]",
            "sysinformer --help-topic <TOPIC>",
        ];

        let mut usage = format!("{}\n", self.heading("USAGE:", use_colors));
        for pattern in patterns {
            if use_colors {
                usage.push_str(&format!("  {}\n", pattern.bright_white()));
            } else {
                usage.push_str(&format!("  {}\n", pattern));
            }
        }
        usage
    }

    fn format_footer(&self, use_colors: bool) -> String {
        let mut footer = format!("{}\n", self.heading("HELP TOPICS:", use_colors));
        let topics = [
            ("probes", "What each probe does and how to select them"),
            ("config", "Environment variables, .env files and precedence"),
            ("examples", "Common invocations"),
            ("requirements", "External tools used by ping, whois and traceroute"),
        ];
        for (topic, description) in topics {
            let command = format!("--help-topic {}", topic);
            if use_colors {
                footer.push_str(&format!("  {:<28} {}\n", command.bright_yellow(), description));
            } else {
                footer.push_str(&format!("  {:<28} {}\n", command, description));
            }
        }
        footer
    }

    fn format_probes_help(&self, use_colors: bool) -> String {
        let probes = [
            OptionHelp {
                long: "ping",
                description: "Send ICMP echo requests (--count, default 4) and show the summary lines",
            },
            OptionHelp {
                long: "latency",
                description: "Time three sequential HTTP GETs and report the average",
            },
            OptionHelp {
                long: "dns",
                description: "Resolve A/AAAA, MX, NS and TXT records",
            },
            OptionHelp {
                long: "http",
                description: "Show the final HTTP status and sorted response headers",
            },
            OptionHelp {
                long: "ssl",
                description: "Inspect the server certificate (runs with --full only for https targets)",
            },
            OptionHelp {
                long: "whois",
                description: "Query registration data for the target host",
            },
            OptionHelp {
                long: "trace",
                description: "Run traceroute (tracert on Windows), given at least 30 seconds",
            },
            OptionHelp {
                long: "full",
                description: "Run every probe; also the behavior when no probe flag is given",
            },
        ];

        let mut help = format!("{}\n\n", self.heading("PROBES:", use_colors));
        help.push_str("Probes always run in this order, one at a time. A failing probe prints a\n");
        help.push_str("warning in its own section and the run continues with the next one.\n\n");
        for probe in probes {
            help.push_str(&probe.format(use_colors));
            help.push('\n');
        }
        help.push_str("\nEvery probe is bounded by --timeout (seconds, default 10). Zero or\n");
        help.push_str("negative values fall back to the default.\n");
        help
    }

    fn format_configuration_help(&self, use_colors: bool) -> String {
        let mut help = format!("{}\n\n", self.heading("CONFIGURATION REFERENCE:", use_colors));

        help.push_str("PRIORITY (highest to lowest):\n");
        help.push_str("1. Command-line flags\n");
        help.push_str("2. Environment variables\n");
        help.push_str("3. .env file in the current directory\n");
        help.push_str("4. Built-in defaults\n\n");

        help.push_str("VARIABLES:\n");
        let variables = EnvManager::get_supported_env_vars();
        for (name, description, example) in variables {
            if use_colors {
                help.push_str(&format!(
                    "  {}\n    {} (default: {})\n",
                    name.bright_yellow().bold(),
                    description,
                    example.bright_blue()
                ));
            } else {
                help.push_str(&format!("  {}\n    {} (default: {})\n", name, description, example));
            }
        }

        help.push_str("\nColors are also disabled by NO_COLOR or TERM=dumb and forced by FORCE_COLOR.\n");
        help.push_str("Logs go to stderr; --verbose raises the level to info, --debug to debug.\n");
        help
    }

    fn format_examples_section(&self, use_colors: bool) -> String {
        let examples = [
            ExampleHelp {
                title: "Full diagnostic",
                command: "sysinformer web https://example.com",
                description: "Run every probe against example.com",
            },
            ExampleHelp {
                title: "Selected probes",
                command: "sysinformer web example.com --dns --http",
                description: "Only DNS records and HTTP headers (the scheme defaults to http)",
            },
            ExampleHelp {
                title: "Slow links",
                command: "sysinformer web example.com --ping --count 10 --timeout 30",
                description: "Ten ping packets with a 30 second budget per probe",
            },
            ExampleHelp {
                title: "Connection health check",
                command: "sysinformer latency",
                description: "Latency to a handful of well-known hosts",
            },
            ExampleHelp {
                title: "Custom hosts, machine-readable logs",
                command: "SYSINFORMER_LOG_FORMAT=json sysinformer --verbose latency --host github.com --host gitlab.com",
                description: "Sample two hosts and log progress as JSON on stderr",
            },
        ];

        let mut output = format!("{}\n", self.heading("EXAMPLES:", use_colors));
        for example in examples {
            output.push_str(&example.format(use_colors));
            output.push('\n');
        }
        output
    }

    fn format_requirements_help(&self, use_colors: bool) -> String {
        let mut help = format!("{}\n\n", self.heading("EXTERNAL TOOLS:", use_colors));
        help.push_str("The ping, whois and traceroute probes run system commands. A missing\n");
        help.push_str("command only fails its own probe.\n\n");

        let traceroute = if self.platform.is_windows() { "tracert" } else { "traceroute" };
        let tools = [
            ("ping", "Shipped with every supported platform"),
            ("whois", "Install from your package manager if missing"),
            (traceroute, "Often not installed by default on Linux and macOS"),
        ];
        for (tool, note) in tools {
            if use_colors {
                help.push_str(&format!("  {:<12} {}\n", tool.bright_cyan(), note));
            } else {
                help.push_str(&format!("  {:<12} {}\n", tool, note));
            }
        }

        help.push_str(&format!("\nInstall hints for {}:\n", self.platform.name()));
        match self.platform {
            Platform::MacOs => help.push_str("  brew install traceroute whois\n"),
            Platform::Linux => help.push_str("  apt install traceroute whois   (or dnf/pacman equivalents)\n"),
            Platform::Windows => help.push_str("  tracert ships with Windows; whois is available from Sysinternals\n"),
            Platform::Other => help.push_str("  use your system package manager\n"),
        }
        help
    }
}

/// One probe flag line
struct OptionHelp {
    long: &'static str,
    description: &'static str,
}

impl OptionHelp {
    fn format(&self, use_colors: bool) -> String {
        let flag = format!("--{}", self.long);
        if use_colors {
            format!("  {:<12} {}", flag.bright_cyan(), self.description)
        } else {
            format!("  {:<12} {}", flag, self.description)
        }
    }
}

struct ExampleHelp {
    title: &'static str,
    command: &'static str,
    description: &'static str,
}

impl ExampleHelp {
    fn format(&self, use_colors: bool) -> String {
        if use_colors {
            format!(
                "  {}:\n    {}\n    {}\n",
                self.title.bright_yellow().bold(),
                self.command.bright_white(),
                self.description.bright_blue().italic()
            )
        } else {
            format!("  {}:\n    {}\n    {}\n", self.title, self.command, self.description)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_help_lists_topics() {
        let help = HelpSystem::new().display_main_help(false);
        assert!(help.contains("USAGE:"));
        for topic in HelpSystem::TOPICS {
            assert!(help.contains(&format!("--help-topic {}", topic)));
        }
    }

    #[test]
    fn test_topic_lookup_is_case_insensitive() {
        let help_system = HelpSystem::new();
        let lower = help_system.display_topic_help("config", false).unwrap();
        let upper = help_system.display_topic_help("CONFIG", false).unwrap();
        assert_eq!(lower, upper);
        assert!(lower.contains(crate::models::config::env_keys::TIMEOUT));
        assert!(help_system.display_topic_help("nonsense", false).is_none());
    }

    #[test]
    fn test_probes_page_mentions_every_flag() {
        let help = HelpSystem::new().display_topic_help("probes", false).unwrap();
        for flag in ["--ping", "--latency", "--dns", "--http", "--ssl", "--whois", "--trace", "--full"] {
            assert!(help.contains(flag), "missing {}", flag);
        }
    }

    #[test]
    fn test_requirements_page_for_macos() {
        let help_system = HelpSystem {
            platform: Platform::MacOs,
        };
        let help = help_system.display_topic_help("requirements", false).unwrap();
        assert!(help.contains("brew install traceroute"));
    }
}
