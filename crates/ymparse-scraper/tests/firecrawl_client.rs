//! Integration tests for `FirecrawlClient` using wiremock HTTP mocks.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ymparse_scraper::{ExtractionError, FirecrawlClient};

const PRODUCT_URL: &str = "https://market.yandex.ru/product--wireless-mouse/1001";

fn test_client(base_url: &str) -> FirecrawlClient {
    FirecrawlClient::with_base_url("test-key", 5, 3000, base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn scrape_page_sends_expected_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_json(json!({
            "url": PRODUCT_URL,
            "formats": ["markdown", "html"],
            "onlyMainContent": true,
            "waitFor": 3000
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "markdown": "# Mouse", "html": "", "metadata": {} }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = test_client(&server.uri())
        .scrape_page(PRODUCT_URL)
        .await
        .expect("should scrape");

    assert_eq!(page.markdown, "# Mouse");
}

#[tokio::test]
async fn scrape_page_accepts_top_level_shape() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "markdown": "# Keyboard",
            "html": "<img src=\"/k.png\">",
            "metadata": { "title": "Keyboard", "ogImage": ["https://img.example/k.jpg"] }
        })))
        .mount(&server)
        .await;

    let page = test_client(&server.uri())
        .scrape_page(PRODUCT_URL)
        .await
        .expect("should scrape");

    assert_eq!(page.metadata.title.as_deref(), Some("Keyboard"));
    assert_eq!(
        page.metadata.og_image.as_deref(),
        Some("https://img.example/k.jpg")
    );
}

#[tokio::test]
async fn non_success_status_surfaces_upstream_error_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .respond_with(
            ResponseTemplate::new(402).set_body_json(json!({
                "success": false,
                "error": "Insufficient credits"
            })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .scrape_page(PRODUCT_URL)
        .await
        .expect_err("should fail");

    assert!(
        matches!(err, ExtractionError::Provider { status: Some(402), ref message, .. } if message == "Insufficient credits"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn service_unavailable_uses_fallback_message_and_no_retry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream overloaded"))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .scrape_page(PRODUCT_URL)
        .await
        .expect_err("should fail");

    assert!(matches!(err, ExtractionError::Provider { status: Some(503), .. }));
    assert_eq!(err.user_message(), "Не удалось получить данные страницы");
}

#[tokio::test]
async fn success_false_with_ok_status_is_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "Request timed out"
        })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .scrape_page(PRODUCT_URL)
        .await
        .expect_err("should fail");

    assert_eq!(err.user_message(), "Request timed out");
}

#[tokio::test]
async fn non_json_success_body_is_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .scrape_page(PRODUCT_URL)
        .await
        .expect_err("should fail");

    assert!(matches!(err, ExtractionError::Provider { status: Some(200), .. }));
}

#[tokio::test]
async fn unreachable_provider_is_provider_error() {
    // Port 9 (discard) on localhost is expected to refuse connections.
    let err = test_client("http://127.0.0.1:9")
        .scrape_page(PRODUCT_URL)
        .await
        .expect_err("should fail");

    assert!(matches!(err, ExtractionError::Provider { .. }));
    assert!(!err.is_client_error());
}
