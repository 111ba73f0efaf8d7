use serde::Deserialize;
use std::time::Duration;

/// Default reviews endpoint
pub const DEFAULT_ENDPOINT: &str =
    "https://apionline.homedepot.com/federation-gateway/graphql?opname=reviews";

/// Main configuration structure for Review-Harvest
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub inputs: InputsConfig,
}

/// Reviews endpoint and pagination behavior
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// GraphQL endpoint receiving the reviews POST
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Pagination stride added to `startIndex` after each page
    #[serde(rename = "page-size", default = "default_page_size")]
    pub page_size: u32,

    /// Fixed pause after each page (milliseconds)
    #[serde(rename = "request-delay-ms", default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            page_size: default_page_size(),
            request_delay_ms: default_request_delay_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Locations of the static request documents
#[derive(Debug, Clone, Deserialize)]
pub struct InputsConfig {
    /// JSON object of static request headers
    #[serde(rename = "headers-path", default = "default_headers_path")]
    pub headers_path: String,

    /// JSON payload template
    #[serde(rename = "payload-path", default = "default_payload_path")]
    pub payload_path: String,
}

impl Default for InputsConfig {
    fn default() -> Self {
        Self {
            headers_path: default_headers_path(),
            payload_path: default_payload_path(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_page_size() -> u32 {
    10
}

fn default_request_delay_ms() -> u64 {
    3000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_headers_path() -> String {
    "review_scraper/review_headers.json".to_string()
}

fn default_payload_path() -> String {
    "review_scraper/review_payload.json".to_string()
}
