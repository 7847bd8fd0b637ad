//! NewsAPI client with exponential backoff retry logic.
//!
//! This module owns the upstream HTTP contract: query parameters, the
//! response envelope, and provider error surfacing. The normalization core
//! never sees any of it; endpoints hand back a [`FeedPage`] of already
//! filtered and normalized articles.
//!
//! # Architecture
//!
//! The module uses a trait-based design for flexibility:
//! - [`FetchAsync`]: core trait defining one async page fetch
//! - [`HttpFetcher`]: the `reqwest`-backed implementation
//! - [`RetryFetch`]: decorator that adds retry logic to any `FetchAsync`
//!   implementation
//!
//! # Retry Strategy
//!
//! - Maximum 3 retry attempts
//! - Exponential backoff starting at 500ms
//! - Maximum delay capped at 10 seconds
//! - Random jitter (0-250ms) added to prevent thundering herd
//! - Only transport/decode failures are retried; a [`ProviderError`]
//!   (invalid key, exhausted quota) fails immediately, since re-sending the
//!   same request cannot change the provider's answer

use rand::{rng, Rng};
use serde::Deserialize;
use std::error::Error;
use std::fmt;
use std::time::{Duration as StdDuration, Instant};
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use crate::config::Config;
use crate::models::{FeedPage, RawArticle};
use crate::normalize::normalize_page;
use crate::utils::truncate_for_log;

/// Response envelope returned by every NewsAPI endpoint.
///
/// On success `status` is `"ok"` and `articles`/`totalResults` are present;
/// on failure `status` is `"error"` and `code`/`message` describe why.
#[derive(Debug, Deserialize)]
pub struct ProviderEnvelope {
    pub status: String,
    #[serde(rename = "totalResults")]
    pub total_results: Option<u64>,
    pub articles: Option<Vec<RawArticle>>,
    pub code: Option<String>,
    pub message: Option<String>,
}

/// A non-ok response envelope from the provider, e.g. an invalid API key or
/// an exhausted rate limit.
#[derive(Debug)]
pub struct ProviderError {
    pub code: Option<String>,
    pub message: Option<String>,
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "provider error {}: {}",
            self.code.as_deref().unwrap_or("unknown"),
            self.message.as_deref().unwrap_or("no message")
        )
    }
}

impl Error for ProviderError {}

/// Trait for one async page fetch against the provider.
///
/// Implementors take a fully built request URL and return the decoded
/// envelope. The abstraction exists so decorators (like retry logic) can wrap
/// any fetcher.
pub trait FetchAsync {
    type Response;

    /// Fetch and decode one page.
    async fn fetch(&self, url: &Url) -> Result<Self::Response, Box<dyn Error>>;
}

/// `reqwest`-backed [`FetchAsync`] implementation.
///
/// Sends the API key via the `X-Api-Key` header rather than a query
/// parameter so it never appears in logged URLs. A non-ok envelope is
/// converted to a [`ProviderError`] here, so callers and decorators see a
/// single error channel.
#[derive(Debug)]
pub struct HttpFetcher<'a> {
    pub http: &'a reqwest::Client,
    pub api_key: &'a str,
}

impl FetchAsync for HttpFetcher<'_> {
    type Response = ProviderEnvelope;

    #[instrument(level = "info", skip_all, fields(path = %url.path()))]
    async fn fetch(&self, url: &Url) -> Result<Self::Response, Box<dyn Error>> {
        let t0 = Instant::now();
        let response = self
            .http
            .get(url.clone())
            .header("X-Api-Key", self.api_key)
            .send()
            .await?;
        let envelope: ProviderEnvelope = response.json().await?;
        let dt = t0.elapsed();

        if envelope.status != "ok" {
            warn!(
                elapsed_ms = dt.as_millis() as u128,
                code = envelope.code.as_deref().unwrap_or("unknown"),
                message = %truncate_for_log(envelope.message.as_deref().unwrap_or(""), 200),
                "Provider returned non-ok status"
            );
            return Err(Box::new(ProviderError {
                code: envelope.code,
                message: envelope.message,
            }));
        }

        debug!(
            elapsed_ms = dt.as_millis() as u128,
            total_results = envelope.total_results.unwrap_or(0),
            "Fetched page"
        );
        Ok(envelope)
    }
}

/// Wrapper that adds exponential backoff retry logic to any [`FetchAsync`]
/// implementation.
///
/// # Backoff Strategy
///
/// The delay between retries follows this formula:
/// ```text
/// delay = min(base_delay * 2^(attempt-1), max_delay) + random_jitter(0..250ms)
/// ```
pub struct RetryFetch<T> {
    inner: T,
    max_retries: usize,
    base_delay: StdDuration,
    max_delay: StdDuration,
}

impl<T> RetryFetch<T>
where
    T: FetchAsync,
{
    pub fn new(inner: T, max_retries: usize, base_delay: StdDuration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            max_delay: StdDuration::from_secs(10),
        }
    }
}

impl<T> fmt::Debug for RetryFetch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryFetch")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .finish()
    }
}

impl<T> FetchAsync for RetryFetch<T>
where
    T: FetchAsync + fmt::Debug,
{
    type Response = T::Response;

    #[instrument(level = "info", skip_all)]
    async fn fetch(&self, url: &Url) -> Result<Self::Response, Box<dyn Error>> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            let attempt_t0 = Instant::now();
            match self.inner.fetch(url).await {
                Ok(resp) => {
                    return Ok(resp);
                }
                Err(e) => {
                    // Provider-level rejections are not transient.
                    if e.downcast_ref::<ProviderError>().is_some() {
                        error!(error = %e, "Provider rejected the request; not retrying");
                        return Err(e);
                    }

                    attempt += 1;
                    let attempt_dt = attempt_t0.elapsed();
                    let total_dt = total_t0.elapsed();

                    if attempt > self.max_retries {
                        error!(
                            attempt,
                            max = self.max_retries,
                            elapsed_ms_attempt = attempt_dt.as_millis() as u128,
                            elapsed_ms_total = total_dt.as_millis() as u128,
                            error = %e,
                            "fetch() exhausted retries"
                        );
                        return Err(e);
                    }

                    // backoff calc
                    let mut delay = self.base_delay.saturating_mul(1 << (attempt - 1));
                    if delay > self.max_delay {
                        delay = self.max_delay;
                    }
                    let jitter_ms: u64 = rng().random_range(0..=250);
                    let delay = delay + StdDuration::from_millis(jitter_ms);

                    warn!(
                        attempt,
                        max = self.max_retries,
                        elapsed_ms_attempt = attempt_dt.as_millis() as u128,
                        elapsed_ms_total = total_dt.as_millis() as u128,
                        ?delay,
                        error = %e,
                        "fetch() attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

/// High-level NewsAPI client exposing the two feed endpoints.
pub struct NewsClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    page_size: u32,
}

impl NewsClient {
    pub fn new(config: &Config, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_size: config.page_size,
        }
    }

    fn endpoint(&self, path: &str, page: u32) -> Result<Url, Box<dyn Error>> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, path))?;
        url.query_pairs_mut()
            .append_pair("pageSize", &self.page_size.to_string())
            .append_pair("page", &page.to_string());
        Ok(url)
    }

    /// Fetch one page of top headlines, optionally narrowed to a provider
    /// category and country.
    #[instrument(level = "info", skip(self))]
    pub async fn top_headlines(
        &self,
        category: Option<&str>,
        country: Option<&str>,
        page: u32,
    ) -> Result<FeedPage, Box<dyn Error>> {
        let mut url = self.endpoint("top-headlines", page)?;
        if let Some(category) = category {
            url.query_pairs_mut()
                .append_pair("category", &category.to_lowercase());
        }
        if let Some(country) = country {
            url.query_pairs_mut().append_pair("country", country);
        }
        self.fetch_page(url).await
    }

    /// Search articles by keyword, newest first.
    #[instrument(level = "info", skip(self))]
    pub async fn search(&self, query: &str, page: u32) -> Result<FeedPage, Box<dyn Error>> {
        let mut url = self.endpoint("everything", page)?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("sortBy", "publishedAt");
        self.fetch_page(url).await
    }

    /// Fetch with retries, then run the filter/normalize pipeline over the
    /// decoded page. `totalResults` is passed through unchanged.
    async fn fetch_page(&self, url: Url) -> Result<FeedPage, Box<dyn Error>> {
        let fetcher = HttpFetcher {
            http: &self.http,
            api_key: &self.api_key,
        };
        let api = RetryFetch::new(fetcher, 3, StdDuration::from_millis(500));
        let envelope = api.fetch(&url).await?;

        let raw = envelope.articles.unwrap_or_default();
        let page = FeedPage {
            total_results: envelope.total_results.unwrap_or(0),
            articles: normalize_page(raw),
        };
        info!(
            total_results = page.total_results,
            articles = page.articles.len(),
            "Page ready"
        );
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Stub fetcher that always fails, counting how often it was called.
    #[derive(Debug)]
    struct FailingFetcher {
        calls: Cell<usize>,
        provider_level: bool,
    }

    impl FetchAsync for FailingFetcher {
        type Response = ();

        async fn fetch(&self, _url: &Url) -> Result<Self::Response, Box<dyn Error>> {
            self.calls.set(self.calls.get() + 1);
            if self.provider_level {
                Err(Box::new(ProviderError {
                    code: Some("apiKeyInvalid".to_string()),
                    message: Some("Your API key is invalid.".to_string()),
                }))
            } else {
                Err("connection reset".into())
            }
        }
    }

    #[tokio::test]
    async fn test_retry_fails_fast_on_provider_error() {
        let fetcher = FailingFetcher {
            calls: Cell::new(0),
            provider_level: true,
        };
        let api = RetryFetch::new(fetcher, 3, StdDuration::from_millis(1));
        let url = Url::parse("https://example.test/v2/top-headlines").unwrap();

        let err = api.fetch(&url).await.unwrap_err();
        assert!(err.downcast_ref::<ProviderError>().is_some());
        assert_eq!(api.inner.calls.get(), 1, "provider rejection must not be retried");
    }

    #[tokio::test]
    async fn test_retry_exhausts_on_transport_error() {
        let fetcher = FailingFetcher {
            calls: Cell::new(0),
            provider_level: false,
        };
        let api = RetryFetch::new(fetcher, 3, StdDuration::from_millis(1));
        let url = Url::parse("https://example.test/v2/top-headlines").unwrap();

        assert!(api.fetch(&url).await.is_err());
        // Initial attempt plus three retries.
        assert_eq!(api.inner.calls.get(), 4);
    }

    #[test]
    fn test_envelope_decodes_ok_response() {
        let json = r#"{
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {"source": {"id": null, "name": "Reuters"}, "title": "A", "urlToImage": "https://x/a.jpg"},
                {"source": {"id": null, "name": "AP"}, "title": "B", "urlToImage": "https://x/b.jpg"}
            ]
        }"#;

        let envelope: ProviderEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.status, "ok");
        assert_eq!(envelope.total_results, Some(2));
        assert_eq!(envelope.articles.unwrap().len(), 2);
    }

    #[test]
    fn test_envelope_decodes_error_response() {
        let json = r#"{"status": "error", "code": "apiKeyInvalid", "message": "Your API key is invalid."}"#;
        let envelope: ProviderEnvelope = serde_json::from_str(json).unwrap();

        assert_eq!(envelope.status, "error");
        let err = ProviderError {
            code: envelope.code,
            message: envelope.message,
        };
        assert_eq!(
            err.to_string(),
            "provider error apiKeyInvalid: Your API key is invalid."
        );
    }

    #[test]
    fn test_endpoint_url_carries_paging() {
        let client = NewsClient::new(&Config::default(), "key".to_string());
        let url = client.endpoint("top-headlines", 3).unwrap();
        assert_eq!(url.path(), "/v2/top-headlines");
        assert!(url.query().unwrap().contains("pageSize=30"));
        assert!(url.query().unwrap().contains("page=3"));
    }

    #[test]
    fn test_search_query_is_encoded() {
        let client = NewsClient::new(&Config::default(), "key".to_string());
        let mut url = client.endpoint("everything", 1).unwrap();
        url.query_pairs_mut()
            .append_pair("q", "rate hike")
            .append_pair("sortBy", "publishedAt");
        assert!(url.query().unwrap().contains("q=rate+hike"));
        assert!(url.query().unwrap().contains("sortBy=publishedAt"));
    }
}
