//! Flood risk classification from rainfall intensity and drain capacity.

use flood_risk_engine_models::{WardRatio, round_hundredths};
use flood_risk_ward_models::RiskLevel;

/// Ratios above this are [`RiskLevel::High`].
pub const HIGH_RATIO: f64 = 1.0;

/// Ratios above this (and at most [`HIGH_RATIO`]) are [`RiskLevel::Medium`].
pub const MEDIUM_RATIO: f64 = 0.8;

/// Classifies risk from mean rainfall intensity and drain capacity.
///
/// An absent or non-positive capacity is treated as a worst case: any
/// rainfall at all is [`RiskLevel::High`].
#[must_use]
pub fn classify(intensity: f64, capacity: Option<f64>) -> RiskLevel {
    match capacity {
        Some(capacity) if capacity > 0.0 => {
            let ratio = intensity / capacity;
            if ratio > HIGH_RATIO {
                RiskLevel::High
            } else if ratio > MEDIUM_RATIO {
                RiskLevel::Medium
            } else {
                RiskLevel::Low
            }
        }
        _ if intensity > 0.0 => RiskLevel::High,
        _ => RiskLevel::Low,
    }
}

/// Returns `intensity / capacity`, or [`WardRatio::UNKNOWN_CAPACITY_RATIO`]
/// when the capacity is absent or not positive.
#[must_use]
pub fn intensity_ratio(intensity: f64, capacity: Option<f64>) -> f64 {
    match capacity {
        Some(capacity) if capacity > 0.0 => intensity / capacity,
        _ => WardRatio::UNKNOWN_CAPACITY_RATIO,
    }
}

/// Human-readable explanation of a risk level.
#[must_use]
pub fn explain(risk: RiskLevel, intensity: f64, capacity: f64) -> String {
    let intensity = format_mm(round_hundredths(intensity));
    let capacity = format_mm(capacity);
    match risk {
        RiskLevel::High => format!(
            "Rainfall intensity ({intensity} mm/hr) exceeds drain capacity ({capacity} mm/hr)."
        ),
        RiskLevel::Medium => format!(
            "Rainfall intensity ({intensity} mm/hr) is nearing drain capacity ({capacity} mm/hr)."
        ),
        RiskLevel::Low => format!(
            "Drain capacity ({capacity} mm/hr) is sufficient for current rainfall ({intensity} mm/hr)."
        ),
    }
}

/// Formats a measurement with at least one decimal place (`50.0`, `12.25`).
fn format_mm(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
