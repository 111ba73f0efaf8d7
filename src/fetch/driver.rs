use crate::extract::{extract_page, ReviewRow};
use crate::fetch::client::ReviewClient;
use crate::request::{RequestContext, RequestPayload, StarFilter};
use crate::{ReviewError, Result};
use reqwest::header::HeaderValue;

/// `startIndex` of the first page
pub const FIRST_START_INDEX: u32 = 1;

/// Fetches `pages` consecutive pages of reviews for one product
///
/// # Request Flow
///
/// 1. Derive the item id and canonical path from `product_url`
/// 2. Target the payload template at the item and star filter
/// 3. For each page, in order:
///    - POST the payload with `startIndex` = 1, 1 + stride, 1 + 2·stride, …
///    - Normalize every review in `data.reviews.Results`
///    - Pause for the client's fixed request delay
///
/// Requests are strictly sequential. The first failure ends the run and
/// the rows gathered so far are discarded.
///
/// # Errors
///
/// * `ReviewError::InvalidInput` - the URL has no numeric trailing segment or no `/p/` path
/// * `ReviewError::UpstreamRequest` - a page answered with a non-success status
/// * `ReviewError::Http` / `ReviewError::MalformedResponse` - transport or body failures
pub async fn fetch_reviews(
    client: &ReviewClient,
    product_url: &str,
    pages: u32,
    template: &RequestPayload,
    stars: &StarFilter,
) -> Result<Vec<ReviewRow>> {
    let context = RequestContext::from_product_url(product_url)?;
    let current_url = HeaderValue::from_str(context.current_url()).map_err(|e| {
        ReviewError::InvalidInput(format!(
            "product path '{}' is not a valid header value: {}",
            context.current_url(),
            e
        ))
    })?;

    tracing::info!(
        "Fetching {} page(s) for item {} (stars: {:?})",
        pages,
        context.item_id(),
        stars.as_slice()
    );

    let base = template.for_item(&context, stars);
    let mut rows = Vec::new();
    let mut start_index = FIRST_START_INDEX;

    for page in 1..=pages {
        let payload = base.with_start_index(start_index);
        tracing::debug!("Requesting page {} (startIndex {})", page, start_index);

        let body = match client.post_page(&current_url, &payload).await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(
                    "Page {} failed, discarding {} collected review(s): {}",
                    page,
                    rows.len(),
                    e
                );
                return Err(e);
            }
        };

        let page_rows = extract_page(&body);
        tracing::info!("Page {}: {} review(s)", page, page_rows.len());
        rows.extend(page_rows);

        start_index = start_index.saturating_add(client.page_size());
        tokio::time::sleep(client.request_delay()).await;
    }

    tracing::info!("Collected {} review(s) for item {}", rows.len(), context.item_id());
    Ok(rows)
}
