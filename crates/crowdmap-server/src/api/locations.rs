//! Location search and autocomplete, proxied to Nominatim.

use axum::{extract::State, response::IntoResponse, Json};
use crowdmap_osm::NominatimResult;
use serde::{Deserialize, Serialize};

use super::{ApiFailure, AppState};

/// Result cap matching what the map sidebar renders.
const SEARCH_RESULT_LIMIT: u32 = 5;

/// Autocomplete only fires once the query is long enough to be selective;
/// shorter queries return an empty result set without touching Nominatim.
const AUTOCOMPLETE_MIN_CHARS: usize = 3;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize)]
struct SearchResponse {
    success: bool,
    results: Vec<NominatimResult>,
}

pub async fn search_location(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<impl IntoResponse, ApiFailure> {
    let query = request.query.trim();
    if query.is_empty() {
        return Err(ApiFailure::bad_request("Query is required"));
    }

    let results = state
        .nominatim
        .search(query, SEARCH_RESULT_LIMIT)
        .await
        .map_err(|e| ApiFailure::upstream(&e))?;
    tracing::debug!(query, hits = results.len(), "location search completed");

    Ok(Json(SearchResponse {
        success: true,
        results,
    }))
}

pub async fn autocomplete_location(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<impl IntoResponse, ApiFailure> {
    let query = request.query.trim();
    if query.chars().count() < AUTOCOMPLETE_MIN_CHARS {
        return Ok(Json(SearchResponse {
            success: true,
            results: Vec::new(),
        }));
    }

    let results = state
        .nominatim
        .search(query, SEARCH_RESULT_LIMIT)
        .await
        .map_err(|e| ApiFailure::upstream(&e))?;

    Ok(Json(SearchResponse {
        success: true,
        results,
    }))
}
