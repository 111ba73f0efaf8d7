use crate::config::types::Config;
use crate::config::validation::validate;
use crate::request::RequestPayload;
use crate::ConfigError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use review_harvest::config::load_config;
///
/// let config = load_config(Path::new("review-harvest.toml")).unwrap();
/// println!("Page size: {}", config.api.page_size);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Reads a JSON document from disk
fn read_json(path: &Path) -> Result<Value, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Json {
        path: path.display().to_string(),
        source,
    })
}

/// Loads the static request headers document
///
/// The document must be a JSON object whose values are all strings.
pub fn load_headers(path: &Path) -> Result<HeaderMap, ConfigError> {
    headers_from_json(&read_json(path)?)
}

/// Converts a JSON object of string values into a header map
pub fn headers_from_json(document: &Value) -> Result<HeaderMap, ConfigError> {
    let object = document.as_object().ok_or_else(|| {
        ConfigError::Validation("headers document must be a JSON object".to_string())
    })?;

    let mut headers = HeaderMap::with_capacity(object.len());
    for (name, value) in object {
        let value = value.as_str().ok_or_else(|| {
            ConfigError::Validation(format!("header '{}' must be a string value", name))
        })?;

        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ConfigError::InvalidHeader(format!("'{}': {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| ConfigError::InvalidHeader(format!("'{}': {}", name, e)))?;

        headers.insert(name, value);
    }

    Ok(headers)
}

/// Loads the request payload template
pub fn load_payload_template(path: &Path) -> Result<RequestPayload, ConfigError> {
    RequestPayload::from_template(read_json(path)?)
}
