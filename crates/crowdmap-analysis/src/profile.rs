//! Synthetic time-of-day crowd profiles for a place.
//!
//! A place's category tags select a base footfall estimate; four fixed day
//! segments scale it by their multiplier and bucket the result into a crowd
//! level. The whole pipeline is constant-table arithmetic — no I/O, no state.

use crowdmap_core::{CrowdLevel, PlaceTags};
use serde::Serialize;

/// People counts below this are `low`.
pub const LOW_MAX: u32 = 80;
/// People counts in `LOW_MAX..MEDIUM_MAX` are `medium`, at or above are `high`.
pub const MEDIUM_MAX: u32 = 160;

/// One fixed day segment.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: &'static str,
    pub label: &'static str,
    pub time_range: &'static str,
    pub multiplier: f64,
}

/// The four day segments, in scan order.
pub const TIME_SLOTS: [TimeSlot; 4] = [
    TimeSlot {
        id: "morning",
        label: "Morning",
        time_range: "6am - 10am",
        multiplier: 0.55,
    },
    TimeSlot {
        id: "midday",
        label: "Mid-day",
        time_range: "10am - 4pm",
        multiplier: 0.85,
    },
    TimeSlot {
        id: "evening",
        label: "Evening",
        time_range: "4pm - 8pm",
        multiplier: 1.1,
    },
    TimeSlot {
        id: "night",
        label: "Night",
        time_range: "8pm - 11pm",
        multiplier: 0.65,
    },
];

/// A [`TimeSlot`] with its computed people count and crowd level.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedSlot {
    pub id: &'static str,
    pub label: &'static str,
    pub time_range: &'static str,
    pub people: u32,
    pub crowd: CrowdLevel,
}

/// The full profile for one place: all four enriched slots plus the
/// recommended visiting window.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrowdProfile {
    pub best_time_label: String,
    pub slots: Vec<EnrichedSlot>,
}

/// Category-derived baseline people count, before time-of-day adjustment.
///
/// Rules are checked in order and the first match wins: food amenities,
/// then malls/attractions, then schools, then parks. Anything else gets
/// the default baseline of 90.
#[must_use]
pub fn estimate_base_footfall(tags: &PlaceTags) -> u32 {
    let amenity = tags.get("amenity");
    let shop = tags.get("shop");
    let tourism = tags.get("tourism");
    let leisure = tags.get("leisure");

    if matches!(amenity, "restaurant" | "cafe" | "fast_food") {
        return 110;
    }
    if shop == "mall" || tourism == "attraction" {
        return 140;
    }
    if matches!(amenity, "school" | "college" | "university") {
        return 120;
    }
    if amenity == "park" || leisure == "park" {
        return 70;
    }

    90
}

/// Bucket a people count into a crowd level using the fixed thresholds.
#[must_use]
pub fn classify_crowd(people: u32) -> CrowdLevel {
    if people < LOW_MAX {
        CrowdLevel::Low
    } else if people < MEDIUM_MAX {
        CrowdLevel::Medium
    } else {
        CrowdLevel::High
    }
}

/// Build the deterministic crowd profile for a place.
///
/// Per-slot counts are `base * multiplier` rounded half-away-from-zero
/// (`f64::round`); every product here is positive, so this is plain
/// round-to-nearest. The best time is the first slot classified `low`,
/// falling back to the first slot when none qualifies. The label always
/// reads "crowd below medium", including on the fallback path — that
/// wording is part of the output contract and is kept as-is.
#[must_use]
pub fn build_crowd_profile(tags: &PlaceTags) -> CrowdProfile {
    let base = estimate_base_footfall(tags);
    let slots = enrich_slots(f64::from(base));

    let best = select_best_slot(&slots);
    let best_time_label = format!(
        "{} ({}) – best time (crowd below medium)",
        best.label, best.time_range
    );

    CrowdProfile {
        best_time_label,
        slots,
    }
}

/// Scale `base` by each fixed slot's multiplier and classify the result.
fn enrich_slots(base: f64) -> Vec<EnrichedSlot> {
    TIME_SLOTS
        .iter()
        .map(|slot| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let people = (base * slot.multiplier).round() as u32;
            EnrichedSlot {
                id: slot.id,
                label: slot.label,
                time_range: slot.time_range,
                people,
                crowd: classify_crowd(people),
            }
        })
        .collect()
}

/// First slot classified `low`, in scan order; the first slot when none is.
///
/// # Panics
///
/// Panics if `slots` is empty. Callers always pass the four fixed slots.
#[must_use]
pub fn select_best_slot(slots: &[EnrichedSlot]) -> &EnrichedSlot {
    slots
        .iter()
        .find(|s| s.crowd == CrowdLevel::Low)
        .unwrap_or(&slots[0])
}
