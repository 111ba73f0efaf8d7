//! Review-Harvest: a paginated product review exporter
//!
//! This crate fetches product reviews from a retailer's GraphQL reviews
//! endpoint, flattens every review into a fixed set of columns, and writes
//! the collected rows to a single-sheet xlsx workbook.

pub mod config;
pub mod extract;
pub mod fetch;
pub mod output;
pub mod request;

use thiserror::Error;

/// Main error type for Review-Harvest operations
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Upstream request failed with HTTP {status} from {url}")]
    UpstreamRequest { status: u16, url: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed response body: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to parse JSON document {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid request header: {0}")]
    InvalidHeader(String),
}

impl From<zip::result::ZipError> for ReviewError {
    fn from(err: zip::result::ZipError) -> Self {
        ReviewError::Serialization(err.to_string())
    }
}

/// Result type alias for Review-Harvest operations
pub type Result<T> = std::result::Result<T, ReviewError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use extract::{clean_markup, normalize_review, ReviewRow};
pub use fetch::{fetch_reviews, ReviewClient};
pub use output::{export_xlsx, output_file_name, XLSX_MIME_TYPE};
pub use request::{RequestContext, RequestPayload, StarFilter};
