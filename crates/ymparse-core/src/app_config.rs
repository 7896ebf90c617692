use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Firecrawl credential. Absence is reported per request, not at startup.
    pub firecrawl_api_key: Option<String>,
    pub firecrawl_base_url: String,
    /// Fixed delay the provider waits for client-side rendering before capture.
    pub firecrawl_wait_for_ms: u64,
    pub firecrawl_timeout_secs: u64,
    /// Substring the product URL host must contain.
    pub market_domain: String,
    pub rate_limit_max_requests: usize,
    pub rate_limit_window_secs: u64,
}

impl AppConfig {
    #[must_use]
    pub fn has_provider_key(&self) -> bool {
        self.firecrawl_api_key.is_some()
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "firecrawl_api_key",
                &self.firecrawl_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("firecrawl_base_url", &self.firecrawl_base_url)
            .field("firecrawl_wait_for_ms", &self.firecrawl_wait_for_ms)
            .field("firecrawl_timeout_secs", &self.firecrawl_timeout_secs)
            .field("market_domain", &self.market_domain)
            .field("rate_limit_max_requests", &self.rate_limit_max_requests)
            .field("rate_limit_window_secs", &self.rate_limit_window_secs)
            .finish()
    }
}
