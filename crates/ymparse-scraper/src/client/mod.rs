//! HTTP client for the Firecrawl `v1/scrape` endpoint.

mod response;

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::json;

use crate::error::ExtractionError;
use crate::types::ScrapedPage;

use response::{page_from_body, provider_error};

const DEFAULT_BASE_URL: &str = "https://api.firecrawl.dev/";
const SCRAPE_PATH: &str = "v1/scrape";

/// Source of rendered page content.
///
/// [`crate::ProductExtractor`] depends on this seam rather than on
/// [`FirecrawlClient`] directly.
pub trait PageProvider {
    /// Fetches one rendered page. Implementations make at most one outbound
    /// call and never retry.
    fn scrape(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<ScrapedPage, ExtractionError>> + Send;
}

/// Client for the Firecrawl scraping API.
///
/// Use [`FirecrawlClient::new`] for production or
/// [`FirecrawlClient::with_base_url`] to point at a mock server in tests.
pub struct FirecrawlClient {
    client: Client,
    api_key: String,
    scrape_url: Url,
    wait_for_ms: u64,
}

impl FirecrawlClient {
    /// Creates a client pointed at the production Firecrawl API.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::Provider`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, wait_for_ms: u64) -> Result<Self, ExtractionError> {
        Self::with_base_url(api_key, timeout_secs, wait_for_ms, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::Provider`] if the `reqwest::Client` cannot
    /// be constructed, or [`ExtractionError::Configuration`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        wait_for_ms: u64,
        base_url: &str,
    ) -> Result<Self, ExtractionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("ymparse/0.1 (product-extraction)")
            .build()?;

        // Exactly one trailing slash so `join` appends rather than replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let scrape_url = Url::parse(&normalised)
            .and_then(|base| base.join(SCRAPE_PATH))
            .map_err(|e| {
                ExtractionError::Configuration(format!(
                    "некорректный адрес Firecrawl '{base_url}': {e}"
                ))
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            scrape_url,
            wait_for_ms,
        })
    }

    #[must_use]
    pub fn wait_for_ms(&self) -> u64 {
        self.wait_for_ms
    }

    /// Requests markdown and HTML renderings of `url`, main content only,
    /// after the fixed render wait.
    ///
    /// # Errors
    ///
    /// - [`ExtractionError::Provider`] on network failure or timeout, on any
    ///   non-2xx status, when the body is not JSON, or when the body reports
    ///   `"success": false`.
    pub async fn scrape_page(&self, url: &str) -> Result<ScrapedPage, ExtractionError> {
        let request_body = json!({
            "url": url,
            "formats": ["markdown", "html"],
            "onlyMainContent": true,
            "waitFor": self.wait_for_ms,
        });

        tracing::debug!(url, wait_for_ms = self.wait_for_ms, "requesting Firecrawl scrape");

        let response = self
            .client
            .post(self.scrape_url.clone())
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(provider_error(Some(status.as_u16()), &body));
        }

        let value: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            ExtractionError::provider_fallback(
                Some(status.as_u16()),
                format!("provider returned non-JSON body: {e}"),
            )
        })?;

        page_from_body(value)
    }
}

impl PageProvider for FirecrawlClient {
    async fn scrape(&self, url: &str) -> Result<ScrapedPage, ExtractionError> {
        self.scrape_page(url).await
    }
}
