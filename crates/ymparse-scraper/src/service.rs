use ymparse_core::AppConfig;

use crate::client::{FirecrawlClient, PageProvider};
use crate::error::ExtractionError;
use crate::extract::extract_product;
use crate::types::ProductRecord;
use crate::validate::validate_product_url;

const MISSING_KEY_MESSAGE: &str = "API ключ Firecrawl не настроен";

/// URL-in, product-out extraction service.
///
/// Holds no mutable state; one instance can serve concurrent requests.
/// `provider` is `None` when no credential is configured, in which case
/// every valid request fails with [`ExtractionError::Configuration`].
pub struct ProductExtractor<P> {
    provider: Option<P>,
    market_domain: String,
}

impl<P: PageProvider> ProductExtractor<P> {
    #[must_use]
    pub fn new(provider: Option<P>, market_domain: impl Into<String>) -> Self {
        Self {
            provider,
            market_domain: market_domain.into(),
        }
    }

    #[must_use]
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Validates `url`, fetches it through the provider once, and extracts
    /// a [`ProductRecord`].
    ///
    /// # Errors
    ///
    /// - [`ExtractionError::Validation`] for a blank or unsupported URL; the
    ///   provider is not called.
    /// - [`ExtractionError::Configuration`] when no provider is configured;
    ///   the provider is not called.
    /// - [`ExtractionError::Provider`] when the fetch fails.
    /// - [`ExtractionError::NotFound`] when no title can be extracted.
    pub async fn extract(&self, url: &str) -> Result<ProductRecord, ExtractionError> {
        let page_url = validate_product_url(url, &self.market_domain)?;

        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| ExtractionError::Configuration(MISSING_KEY_MESSAGE.to_string()))?;

        let page = provider.scrape(page_url.as_str()).await?;
        tracing::debug!(
            url = %page_url,
            markdown_len = page.markdown.len(),
            html_len = page.html.len(),
            "page fetched"
        );

        let record = extract_product(&page, &page_url)?;
        tracing::info!(
            url = %page_url,
            price = record.price(),
            has_image = record.image().is_some(),
            "product extracted"
        );
        Ok(record)
    }
}

impl ProductExtractor<FirecrawlClient> {
    /// Builds the production extractor from application config.
    ///
    /// A missing `FIRECRAWL_API_KEY` is not an error here; it surfaces per
    /// request from [`ProductExtractor::extract`].
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError`] if the HTTP client cannot be built or the
    /// configured base URL is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, ExtractionError> {
        let provider = match config.firecrawl_api_key.as_deref() {
            Some(key) => Some(FirecrawlClient::with_base_url(
                key,
                config.firecrawl_timeout_secs,
                config.firecrawl_wait_for_ms,
                &config.firecrawl_base_url,
            )?),
            None => {
                tracing::warn!(
                    "FIRECRAWL_API_KEY not set; parse requests will fail until configured"
                );
                None
            }
        };
        Ok(Self::new(provider, config.market_domain.clone()))
    }
}
