//! Configuration for the PubMed galaxy service.

use std::time::Duration;

/// E-utilities API constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for the NCBI E-utilities.
    pub const EUTILS_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

    /// Value sent as the `tool` parameter on every request.
    pub const TOOL_NAME: &str = "pubmed-galaxy";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Minimum interval between requests without an API key (~3 req/s).
    pub const RATE_LIMIT_INTERVAL: Duration = Duration::from_millis(334);

    /// Minimum interval between requests with an API key (10 req/s).
    pub const RATE_LIMIT_INTERVAL_WITH_KEY: Duration = Duration::from_millis(100);

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// Fan-out caps for related records.
pub mod limits {
    /// Citing PMIDs kept from an elink response.
    pub const CITING: usize = 20;

    /// Referenced PMIDs kept from an elink response.
    pub const REFERENCES: usize = 20;

    /// Similar-article PMIDs kept from an elink response.
    pub const SIMILAR: usize = 10;

    /// Citing papers enriched with full metadata.
    pub const ENRICH_CITING: usize = 5;

    /// Referenced papers enriched with full metadata.
    pub const ENRICH_REFERENCES: usize = 5;

    /// Similar papers enriched with full metadata.
    pub const ENRICH_SIMILAR: usize = 3;

    /// Total citations at which a researcher's star reaches full intensity.
    pub const FULL_INTENSITY_CITATIONS: f64 = 100.0;
}

/// E-utilities link names requested from elink.
pub mod links {
    /// Papers citing the record.
    pub const CITED_IN: &str = "pubmed_pubmed_citedin";

    /// Papers the record references.
    pub const REFERENCES: &str = "pubmed_pubmed_refs";

    /// Similar articles.
    pub const SIMILAR: &str = "pubmed_pubmed";
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// NCBI API key (optional).
    pub api_key: Option<String>,

    /// Contact email sent to NCBI (optional).
    pub email: Option<String>,

    /// Tool name sent to NCBI.
    pub tool: String,

    /// Base URL for the E-utilities (for testing with mock servers).
    pub eutils_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Minimum interval between outbound requests. Zero disables gating.
    pub rate_limit_interval: Duration,

    /// Retries for transient failures. Zero disables retrying.
    pub max_retries: u32,
}

impl Config {
    /// Create a new configuration.
    ///
    /// The rate limit interval depends on API key presence:
    /// - Without key: 334ms (3 req/s)
    /// - With key: 100ms (10 req/s)
    #[must_use]
    pub fn new(api_key: Option<String>, email: Option<String>) -> Self {
        let rate_limit_interval = if api_key.is_some() {
            api::RATE_LIMIT_INTERVAL_WITH_KEY
        } else {
            api::RATE_LIMIT_INTERVAL
        };

        Self {
            api_key,
            email,
            tool: api::TOOL_NAME.to_string(),
            eutils_url: api::EUTILS_BASE_URL.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            rate_limit_interval,
            max_retries: 0,
        }
    }

    /// Create a test configuration pointing at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            api_key: None,
            email: None,
            tool: api::TOOL_NAME.to_string(),
            eutils_url: base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            rate_limit_interval: Duration::ZERO,
            max_retries: 0,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads a `.env` file first when one exists.
    ///
    /// # Errors
    ///
    /// Returns error if `PUBMED_RATE_LIMIT_MS` is not a number.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let api_key = std::env::var("NCBI_API_KEY").ok().filter(|k| !k.is_empty());
        let email = std::env::var("NCBI_EMAIL").ok().filter(|e| !e.is_empty());
        let mut config = Self::new(api_key, email);

        if let Ok(url) = std::env::var("EUTILS_BASE_URL") {
            config = config.with_eutils_url(url);
        }

        if let Ok(ms) = std::env::var("PUBMED_RATE_LIMIT_MS") {
            config.rate_limit_interval = Duration::from_millis(ms.trim().parse()?);
        }

        Ok(config)
    }

    /// Override the E-utilities base URL.
    #[must_use]
    pub fn with_eutils_url(mut self, url: impl Into<String>) -> Self {
        self.eutils_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Check if an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Etiquette parameters appended to every E-utilities request.
    #[must_use]
    pub fn etiquette_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("tool".to_string(), self.tool.clone())];
        if let Some(ref email) = self.email {
            params.push(("email".to_string(), email.clone()));
        }
        if let Some(ref key) = self.api_key {
            params.push(("api_key".to_string(), key.clone()));
        }
        params
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None, None)
    }
}
