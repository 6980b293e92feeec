//! Rainfall time-series aggregation.

use flood_risk_dataset::Table;
use flood_risk_engine_models::RainfallPoint;
use flood_risk_ward_models::{RainfallObservation, WardId};

/// Mean rainfall intensity of a ward's observations, or `0.0` if it has none.
#[must_use]
pub fn mean_intensity(rainfall: &Table<RainfallObservation>, ward_id: &WardId) -> f64 {
    let (sum, count) = rainfall
        .rows_for(ward_id)
        .fold((0.0, 0_u32), |(sum, count), obs| {
            (sum + obs.intensity_mm_per_hr, count + 1)
        });
    if count == 0 {
        0.0
    } else {
        sum / f64::from(count)
    }
}

/// A ward's observations ordered by timestamp.
///
/// The sort is stable: observations with equal timestamps keep their source
/// order, and observations without a timestamp come last in source order.
#[must_use]
pub fn history(rainfall: &Table<RainfallObservation>, ward_id: &WardId) -> Vec<RainfallPoint> {
    let mut points: Vec<RainfallPoint> = rainfall
        .rows_for(ward_id)
        .map(|obs| RainfallPoint {
            time: obs.timestamp.clone(),
            intensity: obs.intensity_mm_per_hr,
            amount_mm: obs.amount_mm,
        })
        .collect();
    points.sort_by(|a, b| (a.time.is_none(), &a.time).cmp(&(b.time.is_none(), &b.time)));
    points
}
