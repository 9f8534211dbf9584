//! Environment variable handling and .env file loading

use crate::error::{AppError, Result};
use crate::models::config::env_keys;
use std::path::Path;

/// Default .env location, relative to the working directory
pub const ENV_FILE: &str = ".env";

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load `path` into the process environment if the file exists.
    ///
    /// Variables already set in the environment keep their values. Returns
    /// whether a file was loaded.
    pub fn load_env_file(path: &Path) -> Result<bool> {
        if !path.exists() {
            return Ok(false);
        }

        dotenv::from_path(path).map_err(|e| {
            AppError::config(format!("Failed to load {}: {}", path.display(), e))
        })?;
        Ok(true)
    }

    /// Supported variables as (name, description, default)
    pub fn get_supported_env_vars() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            (env_keys::TIMEOUT, "Per-probe timeout in seconds", "10"),
            (env_keys::PING_COUNT, "Ping packets per run", "4"),
            (env_keys::LATENCY_SAMPLES, "HTTP GETs timed by the latency probe", "3"),
            (env_keys::COLOR, "Enable colored output (true/false)", "true"),
            (env_keys::LOG_LEVEL, "trace, debug, info, warn, error or fatal", "warn"),
            (env_keys::LOG_FORMAT, "console, json or compact", "console"),
        ]
    }
}
