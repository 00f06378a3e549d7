use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// OSM-style key/value tags describing a place.
///
/// Absent keys read as the empty string, so category checks never need to
/// distinguish "missing" from "empty".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceTags(HashMap<String, String>);

impl PlaceTags {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `key`, or `""` when the tag is absent.
    #[must_use]
    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map_or("", String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, String>> for PlaceTags {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, String)> for PlaceTags {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A WGS84 point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A point of interest with its resolved position and raw tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub osm_id: i64,
    pub osm_type: String,
    pub latitude: f64,
    pub longitude: f64,
    pub tags: PlaceTags,
}

impl Place {
    /// Display name from the `name` tag, or `"Unknown"`.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self.tags.get("name") {
            "" => "Unknown",
            name => name,
        }
    }
}

/// Bucketed crowd severity, ordered by intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrowdLevel {
    Low,
    Medium,
    High,
}

impl CrowdLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CrowdLevel::Low => "low",
            CrowdLevel::Medium => "medium",
            CrowdLevel::High => "high",
        }
    }
}

impl std::fmt::Display for CrowdLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CrowdLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(CrowdLevel::Low),
            "medium" => Ok(CrowdLevel::Medium),
            "high" => Ok(CrowdLevel::High),
            other => Err(CoreError::InvalidCrowdLevel(other.to_string())),
        }
    }
}
