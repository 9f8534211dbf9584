//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::{Cli, Commands},
    config::env::{EnvManager, ENV_FILE},
    error::Result,
    logging::LogLevel,
    models::Config,
};
use std::path::PathBuf;

/// Combines defaults, the .env file, environment variables and CLI flags
pub struct ConfigParser {
    cli: Cli,
    env_file: Option<PathBuf>,
}

impl ConfigParser {
    /// Parser reading `.env` from the working directory
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            env_file: Some(PathBuf::from(ENV_FILE)),
        }
    }

    /// Parser with an explicit .env path, or none at all
    pub fn with_env_file(cli: Cli, env_file: Option<PathBuf>) -> Self {
        Self { cli, env_file }
    }

    /// Parse and build the complete configuration
    pub fn parse(&self) -> Result<Config> {
        let mut config = Config::default();

        if let Some(path) = &self.env_file {
            EnvManager::load_env_file(path)?;
        }

        config.merge_from_env()?;
        self.apply_cli_overrides(&mut config);

        Ok(config)
    }

    fn apply_cli_overrides(&self, config: &mut Config) {
        if let Some(Commands::Web(args)) = &self.cli.command {
            if let Some(timeout) = args.timeout {
                config.timeout_seconds = timeout;
            }
            if let Some(count) = args.count {
                config.ping_count = count;
            }
        }

        if self.cli.no_color {
            config.enable_color = false;
        } else if self.cli.color {
            config.enable_color = true;
        }

        // Flags only ever make logging louder
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;
        if config.debug {
            config.log_level = config.log_level.min(LogLevel::Debug);
        } else if config.verbose {
            config.log_level = config.log_level.min(LogLevel::Info);
        }
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Config> {
    ConfigParser::new(cli).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::ENV_LOCK;
    use crate::error::AppError;
    use crate::logging::LogFormat;
    use crate::models::config::env_keys;
    use clap::Parser;

    fn clear_env() {
        for key in env_keys::ALL {
            std::env::remove_var(key);
        }
    }

    fn parse(args: &[&str]) -> Result<Config> {
        let cli = Cli::parse_from(args);
        ConfigParser::with_env_file(cli, None).parse()
    }

    #[test]
    fn test_defaults_without_overrides() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let config = parse(&["sysinformer", "web", "example.com"]).unwrap();
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.ping_count, 4);
        assert_eq!(config.log_level, LogLevel::Warn);
        assert!(!config.verbose);
    }

    #[test]
    fn test_cli_overrides() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let config = parse(&[
            "sysinformer", "--no-color", "--verbose", "web", "example.com", "--timeout", "5", "--count", "2",
        ])
        .unwrap();
        assert_eq!(config.timeout_seconds, 5);
        assert_eq!(config.ping_count, 2);
        assert!(!config.enable_color);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_cli_overrides_env_vars() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        std::env::set_var(env_keys::TIMEOUT, "20");
        std::env::set_var(env_keys::LOG_FORMAT, "json");

        let from_env = parse(&["sysinformer", "web", "example.com"]).unwrap();
        assert_eq!(from_env.timeout_seconds, 20);
        assert_eq!(from_env.log_format, LogFormat::Json);

        let from_cli = parse(&["sysinformer", "web", "example.com", "--timeout", "3"]).unwrap();
        assert_eq!(from_cli.timeout_seconds, 3);

        clear_env();
    }

    #[test]
    fn test_debug_never_lowers_trace() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        std::env::set_var(env_keys::LOG_LEVEL, "trace");

        let config = parse(&["sysinformer", "--debug", "latency"]).unwrap();
        assert_eq!(config.log_level, LogLevel::Trace);
        assert!(config.debug);

        clear_env();
    }

    #[test]
    fn test_malformed_env_is_config_error() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        std::env::set_var(env_keys::PING_COUNT, "lots");

        let err = parse(&["sysinformer", "web", "example.com"]).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert_eq!(err.exit_code(), 1);

        clear_env();
    }

    #[test]
    fn test_large_timeout_and_count_parse() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        std::env::set_var(env_keys::TIMEOUT, "7200");

        let config = parse(&["sysinformer", "web", "example.com", "--count", "2000"]).unwrap();
        assert_eq!(config.timeout_seconds, 7200);
        assert_eq!(config.ping_count, 2000);

        clear_env();
    }
}
