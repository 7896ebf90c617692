//! Origin check that runs before any paid provider call.

use reqwest::Url;

use crate::error::ExtractionError;

const MISSING_URL_MESSAGE: &str = "URL не указан";
const MALFORMED_URL_MESSAGE: &str = "Некорректная ссылка на товар";
const UNSUPPORTED_DOMAIN_MESSAGE: &str = "Поддерживаются только ссылки на Яндекс Маркет";

/// Validates a product URL against the supported marketplace.
///
/// The host must contain `market_domain` as a case-sensitive substring, so
/// `market.yandex.ru` and `market.yandex.kz` both pass for `market.yandex`.
///
/// # Errors
///
/// Returns [`ExtractionError::Validation`] if the URL is blank, is not an
/// absolute `http`/`https` URL, or its host lacks the marker.
pub fn validate_product_url(url: &str, market_domain: &str) -> Result<Url, ExtractionError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(ExtractionError::Validation(MISSING_URL_MESSAGE.to_string()));
    }

    let parsed = Url::parse(trimmed)
        .map_err(|_| ExtractionError::Validation(MALFORMED_URL_MESSAGE.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ExtractionError::Validation(MALFORMED_URL_MESSAGE.to_string()));
    }

    match parsed.host_str() {
        Some(host) if host.contains(market_domain) => Ok(parsed),
        _ => Err(ExtractionError::Validation(
            UNSUPPORTED_DOMAIN_MESSAGE.to_string(),
        )),
    }
}
