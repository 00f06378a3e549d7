use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One geocoding hit from the Nominatim `search` endpoint.
///
/// Nominatim serializes coordinates as strings; they are carried through
/// unchanged and [`NominatimResult::position`] parses on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimResult {
    #[serde(default)]
    pub place_id: Option<i64>,
    pub display_name: String,
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(rename = "type", default)]
    pub osm_type: Option<String>,
    #[serde(default)]
    pub importance: Option<f64>,
}

impl NominatimResult {
    /// Parsed `(lat, lon)`, or `None` if either coordinate is malformed.
    #[must_use]
    pub fn position(&self) -> Option<(f64, f64)> {
        let lat = self.lat.parse::<f64>().ok()?;
        let lon = self.lon.parse::<f64>().ok()?;
        Some((lat, lon))
    }
}

/// Envelope returned by the Overpass interpreter.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
}

/// One OSM element from an Overpass `out center` query.
///
/// Nodes carry `lat`/`lon` directly; ways and relations carry a computed
/// `center` instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverpassElement {
    pub id: i64,
    #[serde(rename = "type")]
    pub element_type: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub center: Option<OverpassCenter>,
    #[serde(default)]
    pub tags: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OverpassCenter {
    pub lat: f64,
    pub lon: f64,
}

impl OverpassElement {
    /// Effective position: node coordinates, or the way/relation center.
    #[must_use]
    pub fn position(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => self.center.map(|c| (c.lat, c.lon)),
        }
    }

    /// Tag value, or `""` when the element has no tags or the key is absent.
    #[must_use]
    pub fn tag(&self, key: &str) -> &str {
        self.tags
            .as_ref()
            .and_then(|tags| tags.get(key))
            .map_or("", String::as_str)
    }
}
