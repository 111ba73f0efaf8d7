//! Review extraction module
//!
//! This module flattens raw review JSON into export rows:
//! - Tolerant path lookup into loosely-typed documents
//! - Markup stripping for responder text
//! - The per-review field mapping

mod cleaner;
mod lookup;
mod review;

pub use cleaner::clean_markup;
pub use lookup::{lookup, Step};
pub use review::{normalize_review, CellValue, ReviewRow, COLUMNS};

use serde_json::Value;

const RESULTS: &[Step<'static>] = &[
    Step::Key("data"),
    Step::Key("reviews"),
    Step::Key("Results"),
];

/// Normalizes every review in one reviews response body
///
/// A body without `data.reviews.Results`, or where it is not an array,
/// contributes no rows.
pub fn extract_page(body: &Value) -> Vec<ReviewRow> {
    lookup(body, RESULTS)
        .and_then(Value::as_array)
        .map(|results| results.iter().map(normalize_review).collect())
        .unwrap_or_default()
}
