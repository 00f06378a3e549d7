mod chat;
mod intensity;
mod locations;
mod places;
mod submissions;

use std::sync::Arc;

use axum::{
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crowdmap_core::AppConfig;
use crowdmap_osm::{NominatimClient, OsmClientConfig, OsmError, OverpassClient};

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState};
use crate::store::SubmissionStore;

#[derive(Clone)]
pub struct AppState {
    pub nominatim: Arc<NominatimClient>,
    pub overpass: Arc<OverpassClient>,
    pub submissions: SubmissionStore,
    pub search_radius_m: u32,
}

impl AppState {
    /// Build the shared state with clients pointed at the configured OSM
    /// services.
    ///
    /// # Errors
    ///
    /// Returns [`OsmError`] if a client cannot be constructed from the config.
    pub fn from_config(config: &AppConfig) -> Result<Self, OsmError> {
        let osm_config = OsmClientConfig {
            user_agent: config.osm_user_agent.clone(),
            timeout_secs: config.osm_timeout_secs,
            max_retries: config.osm_max_retries,
            retry_backoff_base_ms: config.osm_retry_backoff_base_ms,
        };
        Ok(Self {
            nominatim: Arc::new(NominatimClient::with_base_url(
                &osm_config,
                &config.nominatim_base_url,
            )?),
            overpass: Arc::new(OverpassClient::with_base_url(
                &osm_config,
                &config.overpass_base_url,
            )?),
            submissions: SubmissionStore::new(),
            search_radius_m: config.search_radius_m,
        })
    }
}

/// JSON failure envelope in the shape the map frontend reads: a `success`
/// flag plus either `error` (upstream failure) or `message` (bad input).
#[derive(Debug, Serialize)]
pub struct ApiFailure {
    #[serde(skip)]
    status: StatusCode,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl ApiFailure {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            success: false,
            error: None,
            message: Some(message.into()),
        }
    }

    pub fn upstream(error: &OsmError) -> Self {
        tracing::error!(error = %error, "OSM upstream request failed");
        Self {
            status: StatusCode::BAD_GATEWAY,
            success: false,
            error: Some(error.to_string()),
            message: None,
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

/// Body shared by the endpoints keyed on a map point. Both fields are
/// optional at the wire level so missing coordinates produce a clean
/// validation message instead of a deserialization error.
#[derive(Debug, Deserialize)]
pub struct PointRequest {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl PointRequest {
    /// Both coordinates, or the validation failure the frontend displays.
    pub fn coordinates(&self) -> Result<(f64, f64), ApiFailure> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Ok((lat, lon)),
            _ => Err(ApiFailure::bad_request(
                "Latitude and longitude are required",
            )),
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    // The OSM-proxy routes fan out to third-party services and sit behind
    // the fixed-window limiter; the local routes do not.
    let osm_routes = Router::new()
        .route("/search-location/", post(locations::search_location))
        .route(
            "/autocomplete-location/",
            post(locations::autocomplete_location),
        )
        .route("/find-popular-places/", post(places::find_popular_places))
        .route(
            "/analyze-crowd-intensity/",
            post(intensity::analyze_crowd_intensity),
        )
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ));

    Router::new()
        .merge(osm_routes)
        .route("/submit-form/", post(submissions::submit_form))
        .route("/chat/", post(chat::chat_message))
        .route("/ws/chat/", get(chat::chat_socket))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(HealthData { status: "ok" })
}
