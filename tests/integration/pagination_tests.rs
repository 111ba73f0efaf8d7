//! Pagination driver tests against a mock reviews endpoint

use review_harvest::config::{headers_from_json, ApiConfig};
use review_harvest::extract::CellValue;
use review_harvest::fetch::{fetch_reviews, ReviewClient};
use review_harvest::request::{RequestPayload, StarFilter};
use review_harvest::ReviewError;
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GRAPHQL_PATH: &str = "/federation-gateway/graphql";
const PRODUCT_URL: &str = "https://example.com/p/widget-123/456";

/// Creates a client aimed at the mock server with no inter-page delay
fn create_test_client(server: &MockServer, delay_ms: u64) -> ReviewClient {
    let config = ApiConfig {
        endpoint: format!("{}{}?opname=reviews", server.uri(), GRAPHQL_PATH),
        page_size: 10,
        request_delay_ms: delay_ms,
        timeout_secs: 5,
    };
    let headers = headers_from_json(&json!({
        "x-experience-name": "general-merchandise",
        "apollographql-client-name": "general-merchandise"
    }))
    .expect("Failed to build headers");

    ReviewClient::new(&config, headers).expect("Failed to build client")
}

fn create_template() -> RequestPayload {
    RequestPayload::from_template(json!({
        "operationName": "reviews",
        "variables": {
            "itemId": "",
            "startIndex": 0,
            "pagesize": "10",
            "filters": {"starRatings": null, "isVerifiedPurchase": false}
        },
        "query": "query reviews($itemId: String!) { reviews(itemId: $itemId) { Results } }"
    }))
    .expect("Failed to build template")
}

/// A reviews response body holding `count` reviews
fn reviews_body(count: usize) -> Value {
    let results: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "ProductId": "456",
                "Rating": 1 + (i % 5),
                "Title": format!("Review {}", i),
                "IsRecommended": i % 2 == 0,
                "ClientResponses": [{"Response": "<p>Thank  you</p>", "Department": "Care"}]
            })
        })
        .collect();

    json!({"data": {"reviews": {"Results": results, "TotalResults": 500}}})
}

/// Bodies of every request the server has seen, in arrival order
async fn received_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .expect("Request recording disabled")
        .iter()
        .map(|request| serde_json::from_slice(&request.body).expect("Body is not JSON"))
        .collect()
}

#[tokio::test]
async fn test_single_page_request_shape() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(header("x-current-url", "widget-123/456"))
        .and(header("x-experience-name", "general-merchandise"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reviews_body(3)))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server, 0);
    let stars = StarFilter::new([5, 4]).unwrap();

    let rows = fetch_reviews(&client, PRODUCT_URL, 1, &create_template(), &stars)
        .await
        .expect("Fetch failed");

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].title, Some(CellValue::Text("Review 0".to_string())));
    assert_eq!(
        rows[0].client_response,
        Some(CellValue::Text("Thank you".to_string()))
    );

    let bodies = received_bodies(&server).await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["variables"]["startIndex"], 1);
    assert_eq!(bodies[0]["variables"]["itemId"], "456");
    assert_eq!(bodies[0]["variables"]["filters"]["starRatings"], json!([5, 4]));
    assert_eq!(bodies[0]["variables"]["filters"]["isVerifiedPurchase"], false);
    assert_eq!(bodies[0]["operationName"], "reviews");
}

#[tokio::test]
async fn test_rows_and_offsets_across_pages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(reviews_body(4)))
        .expect(3)
        .mount(&server)
        .await;

    let client = create_test_client(&server, 0);

    let rows = fetch_reviews(&client, PRODUCT_URL, 3, &create_template(), &StarFilter::all())
        .await
        .expect("Fetch failed");

    assert_eq!(rows.len(), 12);

    let offsets: Vec<u64> = received_bodies(&server)
        .await
        .iter()
        .map(|body| body["variables"]["startIndex"].as_u64().unwrap())
        .collect();
    assert_eq!(offsets, vec![1, 11, 21]);
}

#[tokio::test]
async fn test_rows_keep_response_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(reviews_body(2)))
        .mount(&server)
        .await;

    let client = create_test_client(&server, 0);

    let rows = fetch_reviews(&client, PRODUCT_URL, 2, &create_template(), &StarFilter::all())
        .await
        .expect("Fetch failed");

    let titles: Vec<String> = rows
        .iter()
        .map(|row| row.title.as_ref().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Review 0", "Review 1", "Review 0", "Review 1"]);
}

#[tokio::test]
async fn test_failure_mid_pagination_aborts() {
    let server = MockServer::start().await;

    // First page succeeds, every later page fails
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(reviews_body(5)))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = create_test_client(&server, 0);

    let result = fetch_reviews(&client, PRODUCT_URL, 4, &create_template(), &StarFilter::all()).await;

    match result {
        Err(ReviewError::UpstreamRequest { status, .. }) => assert_eq!(status, 503),
        other => panic!("Expected upstream failure, got {:?}", other),
    }

    // No request after the failing one
    assert_eq!(received_bodies(&server).await.len(), 2);
}

#[tokio::test]
async fn test_failure_on_first_page() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server, 0);

    let result = fetch_reviews(&client, PRODUCT_URL, 3, &create_template(), &StarFilter::all()).await;
    assert!(matches!(
        result,
        Err(ReviewError::UpstreamRequest { status: 403, .. })
    ));
}

#[tokio::test]
async fn test_invalid_url_sends_nothing() {
    let server = MockServer::start().await;
    let client = create_test_client(&server, 0);

    for url in [
        "https://example.com/p/widget-123/abc",
        "https://example.com/p/widget-123/456/",
        "widget-123",
    ] {
        let result = fetch_reviews(&client, url, 2, &create_template(), &StarFilter::all()).await;
        assert!(
            matches!(result, Err(ReviewError::InvalidInput(_))),
            "Expected invalid input for {}",
            url
        );
    }

    assert!(received_bodies(&server).await.is_empty());
}

#[tokio::test]
async fn test_missing_results_yield_no_rows() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"reviews": null}})))
        .expect(2)
        .mount(&server)
        .await;

    let client = create_test_client(&server, 0);

    let rows = fetch_reviews(&client, PRODUCT_URL, 2, &create_template(), &StarFilter::all())
        .await
        .expect("Fetch failed");
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_non_json_body_is_malformed_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>blocked</html>"))
        .mount(&server)
        .await;

    let client = create_test_client(&server, 0);

    let result = fetch_reviews(&client, PRODUCT_URL, 1, &create_template(), &StarFilter::all()).await;
    assert!(matches!(result, Err(ReviewError::MalformedResponse(_))));
}

#[tokio::test]
async fn test_fixed_delay_between_pages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(reviews_body(1)))
        .mount(&server)
        .await;

    let client = create_test_client(&server, 50);

    let started = Instant::now();
    let rows = fetch_reviews(&client, PRODUCT_URL, 2, &create_template(), &StarFilter::all())
        .await
        .expect("Fetch failed");

    assert_eq!(rows.len(), 2);
    assert!(started.elapsed() >= Duration::from_millis(100));
}
