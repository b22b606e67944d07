//! Configuration management for clipfetch
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use clipfetch::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Downloads go to: {}", config.downloads.dir.display());
//! ```
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `CLIPFETCH__<section>__<key>`
//!
//! Examples:
//! - `CLIPFETCH__SERVER__BIND_ADDR=0.0.0.0:9000`
//! - `CLIPFETCH__DOWNLOADS__DIR=/srv/downloads`
//! - `CLIPFETCH__TOOLS__TIMEOUT_SECS=600`
//!
//! The plain `DOWNLOAD_DIR` variable is also honoured and wins over everything else.
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/clipfetch.toml`.
//! This can be overridden using the `CLIPFETCH_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

pub use models::{Config, DownloadsConfig, ServerConfig, ToolConfig, ToolsConfig};
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is malformed or
    /// validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    ///
    /// Useful for testing with custom configuration files.
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }
}
