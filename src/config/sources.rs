use super::models::Config;
use config::{ConfigError, Environment, File};
use std::env;
use std::path::PathBuf;

const CONFIG_ENV_VAR: &str = "CLIPFETCH_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/clipfetch.toml";
const ENV_PREFIX: &str = "CLIPFETCH";
const ENV_SEPARATOR: &str = "__";
const LEGACY_DOWNLOAD_DIR_VAR: &str = "DOWNLOAD_DIR";

/// Load configuration from multiple sources with priority:
/// 1. Defaults (embedded in structs)
/// 2. TOML file (if exists)
/// 3. Environment variables from .env file (via dotenvy)
/// 4. System environment variables
/// 5. Legacy `DOWNLOAD_DIR` (highest priority)
pub fn load() -> Result<Config, ConfigError> {
    // Load .env file if it exists (ignore errors if file doesn't exist)
    let _ = dotenvy::dotenv();

    let config_path = env::var(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

    let mut config = load_from_sources(config_path)?;
    apply_legacy_overrides(&mut config, |key| env::var(key).ok());

    Ok(config)
}

/// Honour the plain `DOWNLOAD_DIR` variable older deployments set
fn apply_legacy_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = lookup(LEGACY_DOWNLOAD_DIR_VAR).filter(|dir| !dir.is_empty()) {
        tracing::debug!(dir = %dir, "Using download directory from {}", LEGACY_DOWNLOAD_DIR_VAR);
        config.downloads.dir = PathBuf::from(dir);
    }
}

/// Load configuration from a specific path and environment
/// Useful for testing with custom config files
pub fn load_from_sources(config_path: PathBuf) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();

    if config_path.exists() {
        tracing::info!("Loading configuration from: {}", config_path.display());
        builder = builder.add_source(File::from(config_path).required(false));
    } else {
        tracing::warn!(
            "Configuration file not found at {}, using defaults and environment overrides",
            config_path.display()
        );
    }

    // CLIPFETCH__DOWNLOADS__DIR -> downloads.dir
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .try_parsing(true),
    );

    let config = builder.build()?;
    config.try_deserialize()
}
