#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Derived per-ward records.
//!
//! These are recomputed from the source tables on every query and carry no
//! identity beyond the ward they describe.

use flood_risk_ward_models::{ObservationTime, RiskLevel, WardId};

/// Risk and preparedness summary for one ward.
#[derive(Debug, Clone, PartialEq)]
pub struct WardSummary {
    pub ward_id: WardId,
    pub ward_name: String,
    pub locality: String,
    /// Unrounded mean rainfall intensity in mm/hr.
    pub average_rainfall_intensity: f64,
    /// Drain capacity in mm/hr, `0.0` when unknown.
    pub drain_capacity: f64,
    pub risk_level: RiskLevel,
    /// Preparedness score in `0..=100`.
    pub preparedness_score: u8,
}

/// Drainage attributes as shown on the ward detail view, with sentinels
/// substituted for missing values.
#[derive(Debug, Clone, PartialEq)]
pub struct DrainageInfo {
    pub capacity: f64,
    pub condition: String,
    pub pump_available: String,
    pub infrastructure_age: String,
}

/// One point of a ward's rainfall history.
#[derive(Debug, Clone, PartialEq)]
pub struct RainfallPoint {
    pub time: Option<ObservationTime>,
    pub intensity: f64,
    pub amount_mm: f64,
}

/// Summary plus drainage attributes, rainfall history, and an explanation of
/// the risk level.
#[derive(Debug, Clone, PartialEq)]
pub struct WardDetail {
    pub summary: WardSummary,
    pub drainage_info: DrainageInfo,
    /// Observations ordered by timestamp.
    pub rainfall_history: Vec<RainfallPoint>,
    pub risk_explanation: String,
}

/// A ward positioned for the map view.
#[derive(Debug, Clone, PartialEq)]
pub struct MapWard {
    pub ward_id: WardId,
    pub display_name: String,
    pub locality: String,
    pub latitude: f64,
    pub longitude: f64,
    pub risk_level: RiskLevel,
    pub preparedness_score: u8,
}

/// Intensity-to-capacity ratio of one ward, for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct WardRatio {
    pub ward_id: WardId,
    pub average_rainfall_intensity: f64,
    /// Recorded drain capacity, if any.
    pub drain_capacity: Option<f64>,
    /// `intensity / capacity`, or [`WardRatio::UNKNOWN_CAPACITY_RATIO`] when
    /// capacity is absent or not positive.
    pub ratio: f64,
}

impl WardRatio {
    pub const UNKNOWN_CAPACITY_RATIO: f64 = 999.0;
}

/// Rounds to two decimal places, half away from zero.
#[must_use]
pub fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
