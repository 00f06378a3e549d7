//! HTTP clients for the OpenStreetMap services crowdmap delegates to:
//! Nominatim for geocoding search and Overpass for POI discovery.
//!
//! Both clients wrap `reqwest` with typed response deserialization, a
//! custom-base-URL constructor for mock-server tests, and retry with
//! exponential back-off on transient failures.

mod error;
mod nominatim;
mod overpass;
mod retry;
mod types;

pub use error::OsmError;
pub use nominatim::NominatimClient;
pub use overpass::OverpassClient;
pub use types::{NominatimResult, OverpassCenter, OverpassElement, OverpassResponse};

/// Connection settings shared by both clients.
#[derive(Debug, Clone)]
pub struct OsmClientConfig {
    pub user_agent: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
}

impl Default for OsmClientConfig {
    fn default() -> Self {
        Self {
            user_agent: "crowdmap/0.1 (crowd-heatmap)".to_string(),
            timeout_secs: 30,
            max_retries: 3,
            retry_backoff_base_ms: 300,
        }
    }
}
