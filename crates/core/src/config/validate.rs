use super::{types::Config, ConfigError};

/// Checks invariants that serde defaults alone cannot enforce.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.playlist.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "playlist.path must not be empty".to_string(),
        ));
    }

    if config.download.destination.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "download.destination must not be empty".to_string(),
        ));
    }

    if config.fetcher.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "fetcher.timeout_secs must be greater than zero".to_string(),
        ));
    }

    Ok(())
}
