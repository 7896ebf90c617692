use thiserror::Error;

/// Fallback shown to callers when the provider gives no usable message.
pub(crate) const PROVIDER_FALLBACK_MESSAGE: &str = "Не удалось получить данные страницы";

/// Errors returned by the extraction pipeline.
///
/// `Display` is for logs. Callers facing end users should use
/// [`ExtractionError::user_message`].
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The URL is missing, malformed, or not on the supported marketplace.
    /// Raised before any provider call.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The provider credential is not configured.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The scraping provider failed, timed out, or returned an error payload.
    #[error("provider error (status {status:?}): {message}")]
    Provider {
        status: Option<u16>,
        message: String,
        /// Upstream body or transport error text, for logs only.
        detail: Option<String>,
    },

    /// The page was fetched but no product title could be derived.
    #[error("not found: {0}")]
    NotFound(String),
}

impl ExtractionError {
    pub(crate) fn provider_fallback(status: Option<u16>, detail: impl Into<String>) -> Self {
        Self::Provider {
            status,
            message: PROVIDER_FALLBACK_MESSAGE.to_string(),
            detail: Some(detail.into()),
        }
    }

    /// Short localized message safe to return to the caller.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Validation(msg)
            | Self::Configuration(msg)
            | Self::NotFound(msg)
            | Self::Provider { message: msg, .. } => msg,
        }
    }

    /// Pipeline stage that failed, used as a structured log field.
    #[must_use]
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validate",
            Self::Configuration(_) => "configure",
            Self::Provider { .. } => "fetch",
            Self::NotFound(_) => "extract",
        }
    }

    /// `true` for failures the caller can correct by changing the input.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound(_))
    }
}

impl From<reqwest::Error> for ExtractionError {
    fn from(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16());
        Self::provider_fallback(status, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_returns_localized_text() {
        let err = ExtractionError::Configuration("API ключ Firecrawl не настроен".to_string());
        assert_eq!(err.user_message(), "API ключ Firecrawl не настроен");
        assert_eq!(err.stage(), "configure");
        assert!(!err.is_client_error());
    }

    #[test]
    fn provider_fallback_keeps_detail_out_of_user_message() {
        let err = ExtractionError::provider_fallback(Some(503), "upstream body");
        assert_eq!(err.user_message(), PROVIDER_FALLBACK_MESSAGE);
        assert!(matches!(
            err,
            ExtractionError::Provider { status: Some(503), detail: Some(ref d), .. } if d == "upstream body"
        ));
    }

    #[test]
    fn validation_and_not_found_are_client_errors() {
        assert!(ExtractionError::Validation("x".into()).is_client_error());
        assert!(ExtractionError::NotFound("x".into()).is_client_error());
    }
}
