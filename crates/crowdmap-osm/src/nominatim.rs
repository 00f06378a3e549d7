//! Client for the Nominatim geocoding API.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::OsmError;
use crate::retry::retry_with_backoff;
use crate::types::NominatimResult;
use crate::OsmClientConfig;

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Client for Nominatim free-text location search.
///
/// Use [`NominatimClient::new`] for the public instance or
/// [`NominatimClient::with_base_url`] to point at a mock server in tests.
/// Nominatim's usage policy requires an identifying User-Agent; it is set
/// on every request from the supplied config.
pub struct NominatimClient {
    client: Client,
    search_url: Url,
    max_retries: u32,
    retry_backoff_base_ms: u64,
}

impl NominatimClient {
    /// Creates a client pointed at the public Nominatim instance.
    ///
    /// # Errors
    ///
    /// Returns [`OsmError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(config: &OsmClientConfig) -> Result<Self, OsmError> {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`OsmError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`OsmError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(config: &OsmClientConfig, base_url: &str) -> Result<Self, OsmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.clone())
            .build()?;

        // Normalise the trailing slash so `join` appends rather than replaces
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let search_url = Url::parse(&normalised)
            .and_then(|base| base.join("search"))
            .map_err(|e| OsmError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            search_url,
            max_retries: config.max_retries,
            retry_backoff_base_ms: config.retry_backoff_base_ms,
        })
    }

    /// Searches for locations matching `query`, returning at most `limit` hits.
    ///
    /// # Errors
    ///
    /// - [`OsmError::UnexpectedStatus`] for non-2xx responses that survive retry.
    /// - [`OsmError::Http`] on network failure.
    /// - [`OsmError::Deserialize`] if the response is not the expected JSON array.
    pub async fn search(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<NominatimResult>, OsmError> {
        let url = self.build_search_url(query, limit);
        retry_with_backoff(self.max_retries, self.retry_backoff_base_ms, || {
            self.request(url.clone())
        })
        .await
    }

    fn build_search_url(&self, query: &str, limit: u32) -> Url {
        let mut url = self.search_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", query);
            pairs.append_pair("format", "json");
            pairs.append_pair("limit", &limit.to_string());
        }
        url
    }

    async fn request(&self, url: Url) -> Result<Vec<NominatimResult>, OsmError> {
        let response = self.client.get(url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(OsmError::UnexpectedStatus {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| OsmError::Deserialize {
            context: format!("nominatim search ({url})"),
            source: e,
        })
    }
}
