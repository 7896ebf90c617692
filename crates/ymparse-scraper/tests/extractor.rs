//! End-to-end tests for `ProductExtractor` backed by a wiremock Firecrawl.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ymparse_scraper::extract::{MAX_PLAUSIBLE_PRICE, MIN_PLAUSIBLE_PRICE};
use ymparse_scraper::{ExtractionError, FirecrawlClient, ProductExtractor};

const PRODUCT_URL: &str = "https://market.yandex.ru/product--wireless-mouse/1001";

fn extractor_for(server: &MockServer) -> ProductExtractor<FirecrawlClient> {
    let client = FirecrawlClient::with_base_url("test-key", 5, 3000, &server.uri())
        .expect("client construction should not fail");
    ProductExtractor::new(Some(client), "market.yandex")
}

async fn mount_page(server: &MockServer, markdown: &str, metadata: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "markdown": markdown, "html": "", "metadata": metadata }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn happy_path_produces_expected_record() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "Цена: 2 490 ₽",
        json!({
            "title": "Wireless Mouse — купить в интернет-магазине ABC",
            "ogImage": "https://img.example/x.jpg"
        }),
    )
    .await;

    let record = extractor_for(&server)
        .extract(PRODUCT_URL)
        .await
        .expect("should extract");

    assert_eq!(
        serde_json::to_value(&record).unwrap(),
        json!({
            "title": "Wireless Mouse",
            "price": 2490,
            "image": "https://img.example/x.jpg",
            "quarterPrice": 623
        })
    );
}

#[tokio::test]
async fn no_price_still_succeeds_with_null_fields() {
    let server = MockServer::start().await;
    mount_page(&server, "# Коврик для мыши\nОписание без цены", json!({})).await;

    let record = extractor_for(&server)
        .extract(PRODUCT_URL)
        .await
        .expect("should extract");

    assert_eq!(record.title(), "Коврик для мыши");
    assert_eq!(record.price(), None);
    assert_eq!(record.quarter_price(), None);
}

#[tokio::test]
async fn unsupported_domain_makes_zero_provider_calls() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = extractor_for(&server)
        .extract("https://www.ozon.ru/product/wireless-mouse-1001/")
        .await
        .expect_err("should fail");

    assert!(matches!(err, ExtractionError::Validation(_)));
    assert!(err.is_client_error());
}

#[tokio::test]
async fn missing_title_is_not_found() {
    let server = MockServer::start().await;
    mount_page(&server, "Только цена: 2 490 ₽", json!({})).await;

    let err = extractor_for(&server)
        .extract(PRODUCT_URL)
        .await
        .expect_err("should fail");

    assert!(matches!(err, ExtractionError::NotFound(_)));
}

#[tokio::test]
async fn price_band_edges_are_accepted_and_outside_values_rejected() {
    for (markdown, expected) in [
        (format!("# A\n{MIN_PLAUSIBLE_PRICE} ₽"), Some(MIN_PLAUSIBLE_PRICE)),
        (format!("# A\n{MAX_PLAUSIBLE_PRICE} ₽"), Some(MAX_PLAUSIBLE_PRICE)),
        (format!("# A\n{} ₽", MIN_PLAUSIBLE_PRICE - 1), None),
        (format!("# A\n{} ₽", MAX_PLAUSIBLE_PRICE + 1), None),
    ] {
        let server = MockServer::start().await;
        mount_page(&server, &markdown, json!({})).await;

        let record = extractor_for(&server)
            .extract(PRODUCT_URL)
            .await
            .expect("should extract");

        assert_eq!(record.price(), expected, "markdown: {markdown:?}");
        assert_eq!(
            record.quarter_price(),
            expected.map(|p| p.div_ceil(4)),
            "markdown: {markdown:?}"
        );
    }
}

#[tokio::test]
async fn repeated_calls_with_same_response_are_byte_identical() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "# Клавиатура механическая\n\n~~5 990 ₽~~ 4 990 ₽",
        json!({ "image": "https://avatars.mds.yandex.net/get-mpic/1/k/orig" }),
    )
    .await;
    let extractor = extractor_for(&server);

    let first = serde_json::to_vec(&extractor.extract(PRODUCT_URL).await.unwrap()).unwrap();
    let second = serde_json::to_vec(&extractor.extract(PRODUCT_URL).await.unwrap()).unwrap();

    assert_eq!(first, second);
}
