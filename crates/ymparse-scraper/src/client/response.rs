//! Normalization of Firecrawl response bodies.
//!
//! The provider returns page fields either at the top level or nested under
//! `data`. [`page_from_body`] is the only place that shape is inspected.

use serde_json::Value;

use crate::error::ExtractionError;
use crate::types::ScrapedPage;

/// Upper bound on upstream body text kept for logs.
const MAX_DETAIL_CHARS: usize = 2_000;

/// Converts a successful-status JSON body into a [`ScrapedPage`].
///
/// # Errors
///
/// Returns [`ExtractionError::Provider`] when the body reports
/// `"success": false` or does not describe a page object.
pub(super) fn page_from_body(body: Value) -> Result<ScrapedPage, ExtractionError> {
    if body.get("success").and_then(Value::as_bool) == Some(false) {
        return Err(provider_error(None, &body.to_string()));
    }

    let payload = match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(data @ Value::Object(_)) => data,
            _ => Value::Object(map),
        },
        _ => {
            return Err(ExtractionError::provider_fallback(
                None,
                "provider payload is not an object",
            ))
        }
    };

    serde_json::from_value(payload).map_err(|e| {
        ExtractionError::provider_fallback(None, format!("unexpected provider payload: {e}"))
    })
}

/// Builds a provider error, preferring the upstream `error` string as the
/// caller-facing message.
pub(super) fn provider_error(status: Option<u16>, body: &str) -> ExtractionError {
    let upstream_message = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        v.get("error")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned)
    });

    let detail: String = body.chars().take(MAX_DETAIL_CHARS).collect();

    match upstream_message {
        Some(message) => ExtractionError::Provider {
            status,
            message,
            detail: Some(detail),
        },
        None => ExtractionError::provider_fallback(status, detail),
    }
}
