//! Crowd-intensity analysis over the wider amenity/shop/tourism POI sweep.

use axum::{extract::State, response::IntoResponse, Json};
use crowdmap_analysis::{analyze_intensity, IntensityArea, Poi};
use crowdmap_core::Coordinates;
use crowdmap_osm::OverpassElement;
use serde::Serialize;

use super::{ApiFailure, AppState, PointRequest};

#[derive(Debug, Serialize)]
struct IntensityResponse {
    success: bool,
    high_intensity: Vec<IntensityArea>,
    medium_intensity: Vec<IntensityArea>,
    low_intensity: Vec<IntensityArea>,
    total_pois: usize,
}

pub async fn analyze_crowd_intensity(
    State(state): State<AppState>,
    Json(request): Json<PointRequest>,
) -> Result<impl IntoResponse, ApiFailure> {
    let (lat, lon) = request.coordinates()?;

    let elements = state
        .overpass
        .pois_around(lat, lon, state.search_radius_m)
        .await
        .map_err(|e| ApiFailure::upstream(&e))?;

    let pois: Vec<Poi> = elements.iter().filter_map(to_poi).collect();
    let center = Coordinates {
        latitude: lat,
        longitude: lon,
    };
    let report = analyze_intensity(center, &pois, f64::from(state.search_radius_m));
    tracing::debug!(
        lat,
        lon,
        pois = report.total_pois,
        high = report.high.len(),
        "crowd intensity analyzed"
    );

    Ok(Json(IntensityResponse {
        success: true,
        high_intensity: report.high,
        medium_intensity: report.medium,
        low_intensity: report.low,
        total_pois: report.total_pois,
    }))
}

/// Projects an Overpass element into an analysis POI; elements without a
/// position are skipped.
fn to_poi(element: &OverpassElement) -> Option<Poi> {
    let (latitude, longitude) = element.position()?;
    let name = match element.tag("name") {
        "" => "Unknown".to_string(),
        name => name.to_string(),
    };
    let kind = ["amenity", "shop", "tourism"]
        .into_iter()
        .map(|key| element.tag(key))
        .find(|value| !value.is_empty())
        .unwrap_or("Unknown")
        .to_string();

    Some(Poi {
        latitude,
        longitude,
        name,
        kind,
    })
}
