//! NCBI E-utilities client.
//!
//! Provides async HTTP client with:
//! - Connection pooling via reqwest
//! - Minimum-interval rate limiting (3 req/s, 10 req/s with an API key)
//! - Optional retry middleware with exponential backoff
//! - NCBI etiquette parameters (`tool`, `email`, `api_key`) on every request
//!
//! Each call is issued fresh; nothing is cached between calls.

mod middleware;
pub mod parse;

pub use middleware::{IntervalLimiter, RateLimitMiddleware};

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

use crate::citations::{CitationSource, PlaceholderCitations};
use crate::config::{Config, api, links};
use crate::error::{ClientError, ClientResult};
use crate::models::{Paper, RelatedPapers};
use crate::network::RecordSource;
use parse::{LinkResponse, SearchResponse};

/// PubMed E-utilities client.
#[derive(Clone)]
pub struct PubMedClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// Gate shared by every clone of this client.
    limiter: Arc<IntervalLimiter>,

    /// Supplies citation counts for parsed papers.
    citations: Arc<dyn CitationSource>,

    /// E-utilities base URL.
    eutils_url: String,

    /// `tool` / `email` / `api_key` query parameters.
    etiquette: Vec<(String, String)>,

    /// API key presence (the key itself is only kept in `etiquette`).
    has_api_key: bool,
}

impl PubMedClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        url::Url::parse(&config.eutils_url)?;

        let client = Client::builder()
            .user_agent(format!("{}/{}", config.tool, env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        let limiter = Arc::new(IntervalLimiter::new(config.rate_limit_interval));

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_millis(500), Duration::from_secs(10))
            .build_with_max_retries(config.max_retries);

        // Retry wraps the limiter so each attempt is gated.
        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .with(RateLimitMiddleware::new(Arc::clone(&limiter)))
            .build();

        Ok(Self {
            client,
            limiter,
            citations: Arc::new(PlaceholderCitations),
            eutils_url: config.eutils_url.trim_end_matches('/').to_string(),
            etiquette: config.etiquette_params(),
            has_api_key: config.api_key.is_some(),
        })
    }

    /// Replace the citation source used for parsed papers.
    #[must_use]
    pub fn with_citations(mut self, citations: Arc<dyn CitationSource>) -> Self {
        self.citations = citations;
        self
    }

    /// Check if an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.has_api_key
    }

    /// Minimum spacing between requests.
    #[must_use]
    pub fn rate_limit_interval(&self) -> Duration {
        self.limiter.interval()
    }

    /// Search PubMed, returning up to `retmax` PMIDs.
    ///
    /// # Errors
    ///
    /// Returns error on transport, status, or JSON failure.
    pub async fn search(&self, term: &str, retmax: u32) -> ClientResult<Vec<String>> {
        let url = format!("{}/esearch.fcgi", self.eutils_url);
        let params = vec![
            ("db".to_string(), "pubmed".to_string()),
            ("term".to_string(), term.to_string()),
            ("retmode".to_string(), "json".to_string()),
            ("retmax".to_string(), retmax.to_string()),
        ];

        let body = self.get_text(&url, &params).await?;
        let response: SearchResponse = serde_json::from_str(&body)?;

        if let Some(error) = response.esearchresult.error {
            tracing::debug!(term, %error, "esearch reported an error");
        }

        Ok(response.esearchresult.idlist)
    }

    /// Fetch and parse one record, with citation counts filled in.
    ///
    /// # Errors
    ///
    /// Returns error on transport or status failure, or when the payload has no article.
    pub async fn fetch_record(&self, pmid: &str) -> ClientResult<Paper> {
        let url = format!("{}/efetch.fcgi", self.eutils_url);
        let params = vec![
            ("db".to_string(), "pubmed".to_string()),
            ("id".to_string(), pmid.to_string()),
            ("retmode".to_string(), "xml".to_string()),
        ];

        let xml = self.get_text(&url, &params).await?;
        let paper = parse::parse_efetch(&xml, pmid)?;

        Ok(self.citations.annotate(paper))
    }

    /// Fetch cited-by, reference, and similar-article links for one record.
    ///
    /// # Errors
    ///
    /// Returns error on transport, status, or JSON failure.
    pub async fn fetch_links(&self, pmid: &str) -> ClientResult<RelatedPapers> {
        let url = format!("{}/elink.fcgi", self.eutils_url);
        let params = vec![
            ("dbfrom".to_string(), "pubmed".to_string()),
            ("db".to_string(), "pubmed".to_string()),
            ("id".to_string(), pmid.to_string()),
            ("retmode".to_string(), "json".to_string()),
            (
                "linkname".to_string(),
                [links::CITED_IN, links::REFERENCES, links::SIMILAR].join(","),
            ),
        ];

        let body = self.get_text(&url, &params).await?;
        let response: LinkResponse = serde_json::from_str(&body)?;

        Ok(response.into_related())
    }

    /// Make a GET request and return the body text.
    async fn get_text(&self, url: &str, params: &[(String, String)]) -> ClientResult<String> {
        let response = self.client.get(url).query(params).query(&self.etiquette).send().await?;
        let response = self.handle_response(response).await?;
        Ok(response.text().await?)
    }

    /// Handle API response status codes.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(1);

                Err(ClientError::rate_limited(retry_after))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }
}

#[async_trait::async_trait]
impl RecordSource for PubMedClient {
    async fn resolve_doi(&self, doi: &str) -> Option<String> {
        match self.search(doi, 1).await {
            Ok(ids) => {
                let pmid = ids.into_iter().next();
                if pmid.is_none() {
                    tracing::info!(doi, "No PMID found for DOI");
                }
                pmid
            }
            Err(e) => {
                log_swallowed("esearch", doi, &e);
                None
            }
        }
    }

    async fn fetch_paper(&self, pmid: &str) -> Option<Paper> {
        self.fetch_record(pmid)
            .await
            .inspect_err(|e| log_swallowed("efetch", pmid, e))
            .ok()
    }

    async fn fetch_related(&self, pmid: &str) -> RelatedPapers {
        self.fetch_links(pmid)
            .await
            .inspect_err(|e| log_swallowed("elink", pmid, e))
            .unwrap_or_default()
    }
}

/// Log a failure that the record source turns into absence.
///
/// Transient upstream trouble (429, 5xx) is a warning; anything else is an error.
fn log_swallowed(endpoint: &'static str, id: &str, error: &ClientError) {
    if error.is_retryable() {
        tracing::warn!(endpoint, id, error = %error, "Transient E-utilities failure");
    } else {
        tracing::error!(endpoint, id, error = %error, "E-utilities request failed");
    }
}

impl std::fmt::Debug for PubMedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PubMedClient")
            .field("eutils_url", &self.eutils_url)
            .field("has_api_key", &self.has_api_key())
            .field("rate_limit_interval", &self.limiter.interval())
            .finish()
    }
}
