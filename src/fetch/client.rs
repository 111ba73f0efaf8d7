//! HTTP client for the reviews endpoint
//!
//! This module handles the single request type the harvester sends:
//! - Building the HTTP client with timeouts and compression
//! - POSTing one page's payload with the static and derived headers
//! - Classifying non-success responses as upstream failures

use crate::config::ApiConfig;
use crate::request::RequestPayload;
use crate::{ReviewError, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Header carrying the product's canonical path
pub const CURRENT_URL_HEADER: &str = "x-current-url";

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use review_harvest::config::ApiConfig;
/// use review_harvest::fetch::build_http_client;
///
/// let client = build_http_client(&ApiConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &ApiConfig) -> std::result::Result<Client, reqwest::Error> {
    let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(config.timeout())
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Reviews endpoint client
///
/// Holds the static request headers and the pagination settings used by
/// [`fetch_reviews`](crate::fetch::fetch_reviews).
#[derive(Debug, Clone)]
pub struct ReviewClient {
    http: Client,
    endpoint: String,
    headers: HeaderMap,
    page_size: u32,
    request_delay: Duration,
}

impl ReviewClient {
    /// Creates a client for the configured endpoint
    ///
    /// # Arguments
    ///
    /// * `config` - Endpoint, stride, delay and timeout settings
    /// * `headers` - Static headers sent with every request
    pub fn new(config: &ApiConfig, headers: HeaderMap) -> Result<Self> {
        Ok(Self {
            http: build_http_client(config)?,
            endpoint: config.endpoint.clone(),
            headers,
            page_size: config.page_size,
            request_delay: config.request_delay(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Pagination stride between consecutive pages
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Fixed pause after each page
    pub fn request_delay(&self) -> Duration {
        self.request_delay
    }

    /// POSTs one page's payload and returns the decoded response body
    ///
    /// # Errors
    ///
    /// * `ReviewError::UpstreamRequest` - the endpoint answered with a non-success status
    /// * `ReviewError::Http` - the request could not be sent or the body not read
    /// * `ReviewError::MalformedResponse` - the body is not JSON
    pub async fn post_page(&self, current_url: &HeaderValue, payload: &RequestPayload) -> Result<Value> {
        let mut headers = self.headers.clone();
        headers.insert(CURRENT_URL_HEADER, current_url.clone());

        let response = self
            .http
            .post(&self.endpoint)
            .headers(headers)
            .json(payload.as_json())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReviewError::UpstreamRequest {
                status: status.as_u16(),
                url: self.endpoint.clone(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
