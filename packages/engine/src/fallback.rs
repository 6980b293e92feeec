//! Sentinel substitution for wards missing from a secondary source.
//!
//! Every default applied when drainage attributes or a directory entry are
//! missing is defined here. Views never substitute values themselves.

use flood_risk_engine_models::DrainageInfo;
use flood_risk_ward::WardDirectory;
use flood_risk_ward_models::{DrainageRecord, WardId, WardInfo};

/// Marker shown for drainage attributes with no recorded value.
pub const UNKNOWN: &str = "Unknown";

/// Capacity used when none is recorded. Feeds the unknown-capacity branch
/// of risk classification.
pub const UNKNOWN_CAPACITY: f64 = 0.0;

/// Resolves a ward's drainage attributes, substituting sentinels for a
/// missing record or missing fields.
#[must_use]
pub fn resolve_drainage(record: Option<&DrainageRecord>) -> DrainageInfo {
    let text = |value: Option<&String>| value.map_or_else(|| UNKNOWN.to_string(), Clone::clone);
    DrainageInfo {
        capacity: record
            .and_then(|r| r.capacity_mm_per_hr)
            .unwrap_or(UNKNOWN_CAPACITY),
        condition: text(record.and_then(|r| r.condition.as_ref())),
        pump_available: text(record.and_then(|r| r.pump_available.as_ref())),
        infrastructure_age: text(record.and_then(|r| r.age_category.as_ref())),
    }
}

/// Resolves a ward's display identity, synthesizing `"Ward {id}"` in the
/// directory's default region for wards it does not list.
#[must_use]
pub fn resolve_identity(directory: &WardDirectory, ward_id: &WardId) -> WardInfo {
    directory.get(ward_id).cloned().unwrap_or_else(|| WardInfo {
        name: format!("Ward {ward_id}"),
        locality: directory.region().to_string(),
    })
}
