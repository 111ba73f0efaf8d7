//! Fetch module for paging through the reviews endpoint
//!
//! This module contains the network side of the harvester:
//! - HTTP client construction and the per-page POST
//! - The pagination loop that gathers normalized rows

mod client;
mod driver;

pub use client::{build_http_client, ReviewClient, CURRENT_URL_HEADER};
pub use driver::{fetch_reviews, FIRST_START_INDEX};
