//! Popular-place discovery: Overpass amenities enriched with an estimated
//! crowd profile per place.

use axum::{extract::State, response::IntoResponse, Json};
use crowdmap_analysis::{build_crowd_profile, CrowdProfile};
use crowdmap_core::PlaceTags;
use crowdmap_osm::OverpassElement;
use serde::Serialize;

use super::{ApiFailure, AppState, PointRequest};

#[derive(Debug, Serialize)]
struct PopularPlace {
    id: i64,
    #[serde(rename = "type")]
    element_type: String,
    lat: f64,
    lon: f64,
    name: String,
    tags: PlaceTags,
    crowd_profile: CrowdProfile,
}

#[derive(Debug, Serialize)]
struct PopularPlacesResponse {
    success: bool,
    results: Vec<PopularPlace>,
}

pub async fn find_popular_places(
    State(state): State<AppState>,
    Json(request): Json<PointRequest>,
) -> Result<impl IntoResponse, ApiFailure> {
    let (lat, lon) = request.coordinates()?;

    let elements = state
        .overpass
        .amenities_around(lat, lon, state.search_radius_m)
        .await
        .map_err(|e| ApiFailure::upstream(&e))?;

    let results: Vec<PopularPlace> = elements
        .into_iter()
        .filter_map(enrich_element)
        .collect();
    tracing::debug!(lat, lon, places = results.len(), "popular places resolved");

    Ok(Json(PopularPlacesResponse {
        success: true,
        results,
    }))
}

/// Converts an Overpass element into an API place, or drops it when it has
/// no usable position (relations without a computed center).
fn enrich_element(element: OverpassElement) -> Option<PopularPlace> {
    let (lat, lon) = element.position()?;
    let tags = PlaceTags::from(element.tags.unwrap_or_default());
    let name = tags.get("name");
    let name = if name.is_empty() {
        "Unknown".to_string()
    } else {
        name.to_string()
    };
    let crowd_profile = build_crowd_profile(&tags);

    Some(PopularPlace {
        id: element.id,
        element_type: element.element_type,
        lat,
        lon,
        name,
        tags,
        crowd_profile,
    })
}
