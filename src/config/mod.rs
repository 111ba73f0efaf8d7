//! Configuration module for Review-Harvest
//!
//! This module handles loading, parsing, and validating the TOML
//! configuration file, plus the static JSON documents every run needs
//! (request headers and the payload template).
//!
//! # Example
//!
//! ```no_run
//! use review_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("review-harvest.toml")).unwrap();
//! println!("Requests go to: {}", config.api.endpoint);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ApiConfig, Config, InputsConfig, DEFAULT_ENDPOINT};

// Re-export parser functions
pub use parser::{headers_from_json, load_config, load_headers, load_payload_template};
