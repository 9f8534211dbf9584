//! Configuration management module
//!
//! Layers, lowest to highest: built-in defaults, `.env` in the working
//! directory, process environment, command-line flags.

pub mod env;
pub mod parser;

pub use env::EnvManager;
pub use parser::{load_config, ConfigParser};

pub use crate::models::Config;
