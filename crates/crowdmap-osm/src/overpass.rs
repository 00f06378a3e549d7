//! Client for the Overpass API interpreter.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::OsmError;
use crate::retry::retry_with_backoff;
use crate::types::{OverpassElement, OverpassResponse};
use crate::OsmClientConfig;

const DEFAULT_BASE_URL: &str = "https://overpass-api.de";

/// Client for Overpass QL queries, POSTed as form data to the interpreter.
pub struct OverpassClient {
    client: Client,
    interpreter_url: Url,
    max_retries: u32,
    retry_backoff_base_ms: u64,
}

impl OverpassClient {
    /// Creates a client pointed at the public Overpass instance.
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

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let interpreter_url = Url::parse(&normalised)
            .and_then(|base| base.join("api/interpreter"))
            .map_err(|e| OsmError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            interpreter_url,
            max_retries: config.max_retries,
            retry_backoff_base_ms: config.retry_backoff_base_ms,
        })
    }

    /// Amenity POIs within `radius_m` of the point (nodes, ways, relations).
    ///
    /// # Errors
    ///
    /// - [`OsmError::UnexpectedStatus`] for non-2xx responses that survive retry.
    /// - [`OsmError::Http`] on network failure.
    /// - [`OsmError::Deserialize`] if the response is not an Overpass envelope.
    pub async fn amenities_around(
        &self,
        lat: f64,
        lon: f64,
        radius_m: u32,
    ) -> Result<Vec<OverpassElement>, OsmError> {
        self.run_query(&amenity_query(lat, lon, radius_m)).await
    }

    /// Amenity, shop, and tourism POIs within `radius_m` of the point — the
    /// wider sweep used for crowd-intensity analysis.
    ///
    /// # Errors
    ///
    /// Same conditions as [`OverpassClient::amenities_around`].
    pub async fn pois_around(
        &self,
        lat: f64,
        lon: f64,
        radius_m: u32,
    ) -> Result<Vec<OverpassElement>, OsmError> {
        self.run_query(&extended_poi_query(lat, lon, radius_m)).await
    }

    async fn run_query(&self, query: &str) -> Result<Vec<OverpassElement>, OsmError> {
        let response = retry_with_backoff(self.max_retries, self.retry_backoff_base_ms, || {
            self.request(query)
        })
        .await?;
        Ok(response.elements)
    }

    async fn request(&self, query: &str) -> Result<OverpassResponse, OsmError> {
        let response = self
            .client
            .post(self.interpreter_url.clone())
            .form(&[("data", query)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(OsmError::UnexpectedStatus {
                status: response.status().as_u16(),
                url: self.interpreter_url.to_string(),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| OsmError::Deserialize {
            context: "overpass interpreter".to_string(),
            source: e,
        })
    }
}

/// Overpass QL for amenity elements around a point, with computed centers
/// for ways and relations.
fn amenity_query(lat: f64, lon: f64, radius_m: u32) -> String {
    format!(
        "[out:json];\n(\n  node[\"amenity\"](around:{radius_m},{lat},{lon});\n  way[\"amenity\"](around:{radius_m},{lat},{lon});\n  relation[\"amenity\"](around:{radius_m},{lat},{lon});\n);\nout center;"
    )
}

/// Overpass QL for the extended amenity/shop/tourism sweep.
fn extended_poi_query(lat: f64, lon: f64, radius_m: u32) -> String {
    format!(
        "[out:json];\n(\n  node[\"amenity\"](around:{radius_m},{lat},{lon});\n  way[\"amenity\"](around:{radius_m},{lat},{lon});\n  relation[\"amenity\"](around:{radius_m},{lat},{lon});\n  node[\"shop\"](around:{radius_m},{lat},{lon});\n  way[\"shop\"](around:{radius_m},{lat},{lon});\n  node[\"tourism\"](around:{radius_m},{lat},{lon});\n  way[\"tourism\"](around:{radius_m},{lat},{lon});\n);\nout center;"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amenity_query_targets_point_and_radius() {
        let q = amenity_query(52.52, 13.405, 5000);
        assert!(q.starts_with("[out:json];"));
        assert!(q.contains("node[\"amenity\"](around:5000,52.52,13.405);"));
        assert!(q.contains("relation[\"amenity\"]"));
        assert!(q.ends_with("out center;"));
        assert!(!q.contains("shop"));
    }

    #[test]
    fn extended_query_adds_shop_and_tourism() {
        let q = extended_poi_query(52.52, 13.405, 5000);
        assert!(q.contains("node[\"shop\"](around:5000,52.52,13.405);"));
        assert!(q.contains("way[\"tourism\"]"));
        // Only amenities are queried at the relation level.
        assert!(!q.contains("relation[\"shop\"]"));
        assert!(!q.contains("relation[\"tourism\"]"));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = OverpassClient::with_base_url(&OsmClientConfig::default(), "::::");
        assert!(matches!(result, Err(OsmError::InvalidBaseUrl { .. })));
    }
}
