use crate::config::types::{ApiConfig, Config, InputsConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_api_config(&config.api)?;
    validate_inputs_config(&config.inputs)?;
    Ok(())
}

/// Validates endpoint and pagination settings
fn validate_api_config(config: &ApiConfig) -> Result<(), ConfigError> {
    let endpoint = Url::parse(&config.endpoint)
        .map_err(|e| ConfigError::Validation(format!("Invalid endpoint: {}", e)))?;

    if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "endpoint must use HTTP or HTTPS, got '{}'",
            endpoint.scheme()
        )));
    }

    if config.page_size < 1 || config.page_size > 100 {
        return Err(ConfigError::Validation(format!(
            "page_size must be between 1 and 100, got {}",
            config.page_size
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates input document locations
fn validate_inputs_config(config: &InputsConfig) -> Result<(), ConfigError> {
    if config.headers_path.is_empty() {
        return Err(ConfigError::Validation(
            "headers_path cannot be empty".to_string(),
        ));
    }

    if config.payload_path.is_empty() {
        return Err(ConfigError::Validation(
            "payload_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
