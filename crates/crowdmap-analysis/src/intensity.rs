//! Sector-based crowd intensity around a query point.
//!
//! The circle of `radius_m` around the center is split into a 3×3 polar grid:
//! three radial bands crossed with three 120° angular bands. POIs are bucketed
//! by sector, each non-empty sector gets a centroid and a count, and counts are
//! classified with fixed thresholds.

use std::collections::BTreeMap;

use crowdmap_core::Coordinates;
use serde::Serialize;

use crate::geo::haversine_distance_m;

/// Sectors with at least this many POIs are high intensity.
const HIGH_MIN: usize = 15;
/// Sectors with at least this many POIs (but fewer than [`HIGH_MIN`]) are medium.
const MEDIUM_MIN: usize = 5;

const RADIAL_BANDS: f64 = 3.0;
const ANGULAR_BAND_DEG: f64 = 120.0;

/// A point of interest considered by the intensity analysis.
#[derive(Debug, Clone, Serialize)]
pub struct Poi {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    pub kind: String,
}

/// One classified sector: its POI centroid, member count, and sector key
/// (`"<radial>_<angular>"`).
#[derive(Debug, Clone, Serialize)]
pub struct IntensityArea {
    pub latitude: f64,
    pub longitude: f64,
    pub count: usize,
    pub sector: String,
}

/// Classified sectors around one query point.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IntensityReport {
    pub high: Vec<IntensityArea>,
    pub medium: Vec<IntensityArea>,
    pub low: Vec<IntensityArea>,
    pub total_pois: usize,
}

/// Bucket `pois` into polar sectors around `center` and classify each sector.
///
/// POIs farther than `radius_m` from the center are ignored. When no POI lands
/// in any sector, the report degrades to a single high-intensity area at the
/// center carrying the total POI count, so callers always have something to
/// render.
#[must_use]
pub fn analyze_intensity(center: Coordinates, pois: &[Poi], radius_m: f64) -> IntensityReport {
    let band_size = radius_m / RADIAL_BANDS;

    let mut sectors: BTreeMap<String, Vec<&Poi>> = BTreeMap::new();
    for poi in pois {
        let position = Coordinates {
            latitude: poi.latitude,
            longitude: poi.longitude,
        };
        let distance = haversine_distance_m(center, position);
        if distance > radius_m {
            continue;
        }

        let key = sector_key(center, position, distance, band_size);
        sectors.entry(key).or_default().push(poi);
    }

    let mut report = IntensityReport {
        total_pois: pois.len(),
        ..IntensityReport::default()
    };

    for (sector, members) in sectors {
        let count = members.len();
        #[allow(clippy::cast_precision_loss)]
        let n = count as f64;
        let area = IntensityArea {
            latitude: members.iter().map(|p| p.latitude).sum::<f64>() / n,
            longitude: members.iter().map(|p| p.longitude).sum::<f64>() / n,
            count,
            sector,
        };
        if count >= HIGH_MIN {
            report.high.push(area);
        } else if count >= MEDIUM_MIN {
            report.medium.push(area);
        } else {
            report.low.push(area);
        }
    }

    if report.high.is_empty() && report.medium.is_empty() && report.low.is_empty() {
        report.high.push(IntensityArea {
            latitude: center.latitude,
            longitude: center.longitude,
            count: pois.len(),
            sector: "center".to_string(),
        });
    }

    report
}

/// Sector key for a POI: radial band by distance, angular band by bearing.
///
/// Band indices are clamped to 0..=2 so points exactly on the radius or at
/// bearing 180° stay inside the 3×3 grid.
fn sector_key(center: Coordinates, position: Coordinates, distance: f64, band_size: f64) -> String {
    let angle = (position.latitude - center.latitude)
        .atan2(position.longitude - center.longitude)
        .to_degrees()
        + 180.0;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let angular = ((angle / ANGULAR_BAND_DEG) as usize).min(2);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let radial = ((distance / band_size) as usize).min(2);

    format!("{radial}_{angular}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: Coordinates = Coordinates {
        latitude: 52.52,
        longitude: 13.405,
    };

    fn poi(latitude: f64, longitude: f64) -> Poi {
        Poi {
            latitude,
            longitude,
            name: "Test".to_string(),
            kind: "cafe".to_string(),
        }
    }

    /// A cluster of `n` POIs, ~1 km east of the center, a few meters apart.
    fn cluster_east(n: usize) -> Vec<Poi> {
        (0..n)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let jitter = i as f64 * 0.000_05;
                poi(CENTER.latitude + jitter, CENTER.longitude + 0.015)
            })
            .collect()
    }

    #[test]
    fn empty_input_degrades_to_center_area() {
        let report = analyze_intensity(CENTER, &[], 5000.0);
        assert_eq!(report.total_pois, 0);
        assert_eq!(report.high.len(), 1);
        assert_eq!(report.high[0].sector, "center");
        assert_eq!(report.high[0].count, 0);
        assert!(report.medium.is_empty() && report.low.is_empty());
    }

    #[test]
    fn out_of_radius_pois_are_ignored() {
        // ~1 degree of latitude is ~111 km, far outside a 5 km radius.
        let far = vec![poi(CENTER.latitude + 1.0, CENTER.longitude)];
        let report = analyze_intensity(CENTER, &far, 5000.0);
        assert_eq!(report.total_pois, 1);
        assert_eq!(report.high[0].sector, "center", "fallback expected");
    }

    #[test]
    fn small_cluster_is_low_intensity() {
        let report = analyze_intensity(CENTER, &cluster_east(3), 5000.0);
        assert!(report.high.is_empty());
        assert!(report.medium.is_empty());
        assert_eq!(report.low.len(), 1);
        assert_eq!(report.low[0].count, 3);
    }

    #[test]
    fn medium_threshold_is_five() {
        let report = analyze_intensity(CENTER, &cluster_east(5), 5000.0);
        assert_eq!(report.medium.len(), 1);
        assert!(report.low.is_empty());
    }

    #[test]
    fn high_threshold_is_fifteen() {
        let report = analyze_intensity(CENTER, &cluster_east(15), 5000.0);
        assert_eq!(report.high.len(), 1);
        assert_eq!(report.high[0].count, 15);
        assert!(report.medium.is_empty());
    }

    #[test]
    fn centroid_averages_member_positions() {
        let pois = vec![
            poi(CENTER.latitude + 0.001, CENTER.longitude + 0.015),
            poi(CENTER.latitude - 0.001, CENTER.longitude + 0.015),
        ];
        let report = analyze_intensity(CENTER, &pois, 5000.0);
        assert_eq!(report.low.len(), 1);
        assert!((report.low[0].latitude - CENTER.latitude).abs() < 1e-9);
        assert!((report.low[0].longitude - (CENTER.longitude + 0.015)).abs() < 1e-9);
    }

    #[test]
    fn opposite_bearings_land_in_different_sectors() {
        let east = cluster_east(3);
        let west: Vec<Poi> = (0..3)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let jitter = i as f64 * 0.000_05;
                poi(CENTER.latitude + jitter, CENTER.longitude - 0.015)
            })
            .collect();
        let all: Vec<Poi> = east.into_iter().chain(west).collect();
        let report = analyze_intensity(CENTER, &all, 5000.0);
        assert_eq!(report.low.len(), 2, "east and west clusters must not merge");
    }

    #[test]
    fn sector_key_is_total_at_boundaries() {
        // Due north: bearing angle 90 + 180 = 270 → angular band 2.
        let key = sector_key(
            CENTER,
            Coordinates {
                latitude: CENTER.latitude + 0.01,
                longitude: CENTER.longitude,
            },
            1000.0,
            5000.0 / 3.0,
        );
        assert_eq!(key, "0_2");

        // Distance exactly on the radius clamps into the outer band.
        let key = sector_key(
            CENTER,
            Coordinates {
                latitude: CENTER.latitude,
                longitude: CENTER.longitude + 0.07,
            },
            5000.0,
            5000.0 / 3.0,
        );
        assert!(key.starts_with("2_"), "got {key}");
    }
}
