use crate::ReviewError;
use url::Url;

/// Path segment that precedes the canonical product path
const PRODUCT_MARKER: &str = "p";

/// Identifies the product whose reviews are requested
///
/// Derived once from the product page URL and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    item_id: String,
    current_url: String,
}

impl RequestContext {
    /// Derives the request context from a product page URL
    ///
    /// The item identifier is the trailing path segment, which must be
    /// entirely numeric. The canonical path fragment is everything after
    /// the `/p/` marker segment and is sent as the `X-Current-Url` header.
    ///
    /// # Examples
    ///
    /// ```
    /// use review_harvest::request::RequestContext;
    ///
    /// let context = RequestContext::from_product_url("https://example.com/p/widget-123/456").unwrap();
    /// assert_eq!(context.item_id(), "456");
    /// assert_eq!(context.current_url(), "widget-123/456");
    /// ```
    pub fn from_product_url(product_url: &str) -> Result<Self, ReviewError> {
        let url = Url::parse(product_url.trim()).map_err(|e| {
            ReviewError::InvalidInput(format!("cannot parse product URL '{}': {}", product_url, e))
        })?;

        let segments: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.collect())
            .unwrap_or_default();

        let item_id = segments
            .last()
            .filter(|segment| is_numeric(segment))
            .ok_or_else(|| {
                ReviewError::InvalidInput(format!(
                    "product URL '{}' does not end with a numeric item id",
                    product_url
                ))
            })?;

        let marker = segments
            .iter()
            .position(|segment| *segment == PRODUCT_MARKER)
            .filter(|index| index + 1 < segments.len())
            .ok_or_else(|| {
                ReviewError::InvalidInput(format!(
                    "product URL '{}' has no '/{}/' path",
                    product_url, PRODUCT_MARKER
                ))
            })?;

        Ok(Self {
            item_id: (*item_id).to_string(),
            current_url: segments[marker + 1..].join("/"),
        })
    }

    /// Numeric item identifier, kept as text as the API expects
    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    /// Canonical path fragment for the `X-Current-Url` header
    pub fn current_url(&self) -> &str {
        &self.current_url
    }
}

fn is_numeric(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}
