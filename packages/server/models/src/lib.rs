#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API response types for the ward flood risk server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the engine's derived records so the wire contract (snake_case
//! field names, rounded averages) can evolve independently.

use flood_risk_engine_models::{
    DrainageInfo, MapWard, RainfallPoint, WardDetail, WardSummary, round_hundredths,
};
use flood_risk_ward_models::{RiskLevel, WardId};
use serde::{Deserialize, Serialize};

/// A ward as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiWardSummary {
    /// Normalized ward identifier.
    pub ward_id: WardId,
    /// Display name.
    pub ward_name: String,
    /// Locality or district.
    pub locality: String,
    /// Mean rainfall intensity in mm/hr, rounded to two decimals.
    pub average_rainfall_intensity: f64,
    /// Drain capacity in mm/hr (`0.0` if unknown).
    pub drain_capacity: f64,
    /// Flood risk level.
    pub risk_level: RiskLevel,
    /// Preparedness score (0-100).
    pub preparedness_score: u8,
}

impl From<WardSummary> for ApiWardSummary {
    fn from(summary: WardSummary) -> Self {
        Self {
            ward_id: summary.ward_id,
            ward_name: summary.ward_name,
            locality: summary.locality,
            average_rainfall_intensity: round_hundredths(summary.average_rainfall_intensity),
            drain_capacity: summary.drain_capacity,
            risk_level: summary.risk_level,
            preparedness_score: summary.preparedness_score,
        }
    }
}

/// Drainage attributes of a ward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiDrainageInfo {
    pub capacity: f64,
    pub condition: String,
    pub pump_available: String,
    pub infrastructure_age: String,
}

impl From<DrainageInfo> for ApiDrainageInfo {
    fn from(info: DrainageInfo) -> Self {
        Self {
            capacity: info.capacity,
            condition: info.condition,
            pump_available: info.pump_available,
            infrastructure_age: info.infrastructure_age,
        }
    }
}

/// One rainfall observation in a ward's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiRainfallPoint {
    /// Observation timestamp as it appears in the source, or `null`.
    pub time: Option<String>,
    /// Intensity in mm/hr.
    pub intensity: f64,
    /// Accumulated rainfall in mm.
    pub amount_mm: f64,
}

impl From<RainfallPoint> for ApiRainfallPoint {
    fn from(point: RainfallPoint) -> Self {
        Self {
            time: point.time.map(|t| t.as_str().to_string()),
            intensity: point.intensity,
            amount_mm: point.amount_mm,
        }
    }
}

/// Full detail of a single ward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiWardDetail {
    #[serde(flatten)]
    pub summary: ApiWardSummary,
    pub drainage_info: ApiDrainageInfo,
    /// Observations ordered by timestamp.
    pub rainfall_history: Vec<ApiRainfallPoint>,
    pub risk_explanation: String,
}

impl From<WardDetail> for ApiWardDetail {
    fn from(detail: WardDetail) -> Self {
        Self {
            summary: detail.summary.into(),
            drainage_info: detail.drainage_info.into(),
            rainfall_history: detail
                .rainfall_history
                .into_iter()
                .map(ApiRainfallPoint::from)
                .collect(),
            risk_explanation: detail.risk_explanation,
        }
    }
}

/// A ward positioned on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiMapWard {
    pub ward_id: WardId,
    /// Display name.
    pub ward_name: String,
    pub locality: String,
    pub latitude: f64,
    pub longitude: f64,
    pub risk_level: RiskLevel,
    pub preparedness_score: u8,
}

impl From<MapWard> for ApiMapWard {
    fn from(ward: MapWard) -> Self {
        Self {
            ward_id: ward.ward_id,
            ward_name: ward.display_name,
            locality: ward.locality,
            latitude: ward.latitude,
            longitude: ward.longitude,
            risk_level: ward.risk_level,
            preparedness_score: ward.preparedness_score,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
    /// Rows loaded from the rainfall table.
    pub rainfall_rows: usize,
    /// Rows loaded from the drainage table.
    pub drainage_rows: usize,
    /// Rows loaded from the centroid table.
    pub centroid_rows: usize,
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
