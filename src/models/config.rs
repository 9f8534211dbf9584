//! Configuration data model

use crate::logging::{LogFormat, LogLevel};
use crate::types::{AppError, Result};

/// Environment variable names understood by [`Config::merge_from_env`]
pub mod env_keys {
    pub const TIMEOUT: &str = "SYSINFORMER_TIMEOUT";
    pub const PING_COUNT: &str = "SYSINFORMER_PING_COUNT";
    pub const LATENCY_SAMPLES: &str = "SYSINFORMER_LATENCY_SAMPLES";
    pub const COLOR: &str = "SYSINFORMER_COLOR";
    pub const LOG_LEVEL: &str = "SYSINFORMER_LOG_LEVEL";
    pub const LOG_FORMAT: &str = "SYSINFORMER_LOG_FORMAT";

    pub const ALL: [&str; 6] = [TIMEOUT, PING_COUNT, LATENCY_SAMPLES, COLOR, LOG_LEVEL, LOG_FORMAT];
}

/// Main application configuration
///
/// Timeout and ping count stay signed here: zero or negative values are legal
/// input and fall back to defaults when a [`crate::models::DiagnosticRequest`]
/// is built from them.
#[derive(Debug, Clone)]
pub struct Config {
    /// Per-probe timeout in seconds
    pub timeout_seconds: i64,

    /// ICMP echo requests sent by the ping probe
    pub ping_count: i64,

    /// Sequential GETs issued by the latency probe
    pub latency_samples: u32,

    /// Enable colored terminal output
    pub enable_color: bool,

    /// Minimum level written by the logger
    pub log_level: LogLevel,

    /// Log line format
    pub log_format: LogFormat,

    /// Enable verbose output
    pub verbose: bool,

    /// Enable debug output
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout_seconds: crate::defaults::DEFAULT_TIMEOUT.as_secs() as i64,
            ping_count: crate::defaults::DEFAULT_PING_COUNT as i64,
            latency_samples: crate::defaults::DEFAULT_LATENCY_SAMPLES,
            enable_color: crate::defaults::DEFAULT_ENABLE_COLOR,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Console,
            verbose: false,
            debug: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Ok(timeout) = std::env::var(env_keys::TIMEOUT) {
            self.timeout_seconds = timeout.trim().parse().map_err(|e| {
                AppError::config(format!("Invalid {} value '{}': {}", env_keys::TIMEOUT, timeout, e))
            })?;
        }

        if let Ok(count) = std::env::var(env_keys::PING_COUNT) {
            self.ping_count = count.trim().parse().map_err(|e| {
                AppError::config(format!("Invalid {} value '{}': {}", env_keys::PING_COUNT, count, e))
            })?;
        }

        if let Ok(samples) = std::env::var(env_keys::LATENCY_SAMPLES) {
            self.latency_samples = samples.trim().parse().map_err(|e| {
                AppError::config(format!(
                    "Invalid {} value '{}': {}",
                    env_keys::LATENCY_SAMPLES,
                    samples,
                    e
                ))
            })?;
        }

        if let Ok(color) = std::env::var(env_keys::COLOR) {
            self.enable_color = color.trim().parse().map_err(|e| {
                AppError::config(format!("Invalid {} value '{}': {}", env_keys::COLOR, color, e))
            })?;
        }

        if let Ok(level) = std::env::var(env_keys::LOG_LEVEL) {
            self.log_level = level
                .parse()
                .map_err(|e: AppError| AppError::config(format!("{}: {}", env_keys::LOG_LEVEL, e)))?;
        }

        if let Ok(format) = std::env::var(env_keys::LOG_FORMAT) {
            self.log_format = format
                .parse()
                .map_err(|e: AppError| AppError::config(format!("{}: {}", env_keys::LOG_FORMAT, e)))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.ping_count, 4);
        assert_eq!(config.latency_samples, 3);
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_large_values_are_accepted() {
        let mut config = Config::default();
        config.timeout_seconds = 7200;
        config.ping_count = 2000;
        config.latency_samples = 500;

        let request = crate::models::DiagnosticRequest::from_config(
            "example.com",
            crate::models::CheckSelection::default(),
            &config,
        );
        assert_eq!(request.timeout(), Duration::from_secs(7200));
        assert_eq!(request.ping_count(), 2000);
        assert_eq!(request.latency_samples(), 500);
    }

    #[test]
    fn test_non_positive_values_fall_back_in_request() {
        let mut config = Config::default();
        config.timeout_seconds = -5;
        config.ping_count = 0;

        let request = crate::models::DiagnosticRequest::from_config(
            "example.com",
            crate::models::CheckSelection::default(),
            &config,
        );
        assert_eq!(request.timeout(), Duration::from_secs(10));
        assert_eq!(request.ping_count(), 4);
    }
}
