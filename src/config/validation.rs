use super::models::{Config, ToolConfig};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Tool '{tool}' has an empty program path")]
    EmptyProgram { tool: String },

    #[error("tools.timeout_secs must be positive")]
    InvalidTimeout,

    #[error("server.max_form_bytes must be positive")]
    InvalidFormLimit,

    #[error("downloads.dir must not be empty")]
    EmptyDownloadDir,
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_server(config)?;
    validate_downloads(config)?;
    validate_tools(config)?;
    Ok(())
}

fn validate_server(config: &Config) -> Result<(), ValidationError> {
    if config.server.max_form_bytes == 0 {
        return Err(ValidationError::InvalidFormLimit);
    }

    Ok(())
}

fn validate_downloads(config: &Config) -> Result<(), ValidationError> {
    if config.downloads.dir.as_os_str().is_empty() {
        return Err(ValidationError::EmptyDownloadDir);
    }

    Ok(())
}

/// Ensure every tool has a program and the timeout, if any, is usable
fn validate_tools(config: &Config) -> Result<(), ValidationError> {
    validate_program("yt_dlp", &config.tools.yt_dlp)?;
    validate_program("gallery_dl", &config.tools.gallery_dl)?;

    if config.tools.timeout_secs == Some(0) {
        return Err(ValidationError::InvalidTimeout);
    }

    Ok(())
}

fn validate_program(name: &str, tool: &ToolConfig) -> Result<(), ValidationError> {
    if tool.program.trim().is_empty() {
        return Err(ValidationError::EmptyProgram {
            tool: name.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_valid_config() {
        let config = Config::default();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_empty_program() {
        let mut config = Config::default();
        config.tools.gallery_dl.program = "  ".to_string();

        let result = validate(&config);
        assert!(matches!(
            result,
            Err(ValidationError::EmptyProgram { ref tool }) if tool == "gallery_dl"
        ));
    }

    #[test]
    fn test_zero_timeout() {
        let mut config = Config::default();
        config.tools.timeout_secs = Some(0);

        let result = validate(&config);
        assert!(matches!(result, Err(ValidationError::InvalidTimeout)));
    }

    #[test]
    fn test_zero_form_limit() {
        let mut config = Config::default();
        config.server.max_form_bytes = 0;

        let result = validate(&config);
        assert!(matches!(result, Err(ValidationError::InvalidFormLimit)));
    }

    #[test]
    fn test_empty_download_dir() {
        let mut config = Config::default();
        config.downloads.dir = PathBuf::new();

        let result = validate(&config);
        assert!(matches!(result, Err(ValidationError::EmptyDownloadDir)));
    }
}
