//! Pure crowd analysis over OpenStreetMap places.
//!
//! Two independent pieces, both synchronous and side-effect free:
//! synthetic time-of-day crowd profiles derived from a place's category tags
//! ([`profile`]), and sector-based crowd intensity around a query point
//! ([`intensity`]).

pub mod geo;
pub mod intensity;
pub mod profile;

pub use intensity::{analyze_intensity, IntensityArea, IntensityReport, Poi};
pub use profile::{build_crowd_profile, CrowdProfile, EnrichedSlot, TimeSlot, TIME_SLOTS};
