//! Infrastructure preparedness scoring.
//!
//! The score is the sum of four independent factors:
//!
//! | Factor            | Points                                   |
//! |-------------------|------------------------------------------|
//! | Drain condition   | good 30, fair 15, otherwise 0            |
//! | Pump availability | available 20, otherwise 0                |
//! | Age               | new 20, moderate 10, otherwise 0         |
//! | Drain capacity    | >= 50 mm/hr 30, >= 20 mm/hr 15, else 5   |

use flood_risk_ward_models::{AgeCategory, DrainCondition, DrainageRecord, PumpAvailability};

pub const MAX_SCORE: u8 = 100;

#[must_use]
pub const fn condition_points(condition: DrainCondition) -> u8 {
    match condition {
        DrainCondition::Good => 30,
        DrainCondition::Fair => 15,
        DrainCondition::Poor | DrainCondition::Unrecognized => 0,
    }
}

#[must_use]
pub const fn pump_points(pump: PumpAvailability) -> u8 {
    match pump {
        PumpAvailability::Available => 20,
        PumpAvailability::Unavailable => 0,
    }
}

#[must_use]
pub const fn age_points(age: AgeCategory) -> u8 {
    match age {
        AgeCategory::New => 20,
        AgeCategory::Moderate => 10,
        AgeCategory::Old | AgeCategory::Unrecognized => 0,
    }
}

/// Points for drain capacity. An unrecorded capacity earns the lowest tier.
#[must_use]
pub fn capacity_points(capacity: Option<f64>) -> u8 {
    match capacity {
        Some(c) if c >= 50.0 => 30,
        Some(c) if c >= 20.0 => 15,
        _ => 5,
    }
}

/// Scores a ward's drainage record.
///
/// A ward with no drainage record scores 0; there is no partial credit for
/// the capacity tier when nothing is known about the infrastructure.
#[must_use]
pub fn score(record: Option<&DrainageRecord>) -> u8 {
    let Some(record) = record else {
        return 0;
    };

    let total = condition_points(DrainCondition::from_text(record.condition.as_deref()))
        + pump_points(PumpAvailability::from_text(record.pump_available.as_deref()))
        + age_points(AgeCategory::from_text(record.age_category.as_deref()))
        + capacity_points(record.capacity_mm_per_hr);

    total.min(MAX_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flood_risk_ward_models::WardId;

    fn record(condition: &str, pump: &str, age: &str, capacity: Option<f64>) -> DrainageRecord {
        DrainageRecord {
            ward_id: WardId::normalize("Ward_1"),
            capacity_mm_per_hr: capacity,
            condition: Some(condition.to_string()),
            pump_available: Some(pump.to_string()),
            age_category: Some(age.to_string()),
        }
    }

    #[test]
    fn best_infrastructure_scores_one_hundred() {
        assert_eq!(score(Some(&record("good", "yes", "new", Some(60.0)))), 100);
    }

    #[test]
    fn worst_infrastructure_scores_capacity_floor() {
        assert_eq!(score(Some(&record("poor", "no", "old", Some(10.0)))), 5);
    }

    #[test]
    fn mixed_infrastructure_adds_factors() {
        assert_eq!(score(Some(&record("fair", "yes", "10-20 years", Some(50.0)))), 75);
        assert_eq!(score(Some(&record("Good", "TRUE", "5-10 years", Some(20.0)))), 85);
    }

    #[test]
    fn missing_record_scores_zero() {
        assert_eq!(score(None), 0);
    }

    #[test]
    fn record_with_no_attributes_scores_capacity_floor() {
        let empty = DrainageRecord {
            ward_id: WardId::normalize("Ward_1"),
            capacity_mm_per_hr: None,
            condition: None,
            pump_available: None,
            age_category: None,
        };
        assert_eq!(score(Some(&empty)), 5);
    }

    #[test]
    fn negated_age_earns_nothing() {
        assert_eq!(score(Some(&record("poor", "no", "not new", Some(10.0)))), 5);
    }

    #[test]
    fn age_labels_with_embedded_keywords_earn_age_points() {
        for (age, expected) in [
            ("0-5yrs", 25),
            ("5-10yrs", 25),
            ("Brand-new", 25),
            ("newly built", 25),
            ("10-20yrs", 15),
            ("moderate-age", 15),
            ("20-50 years", 5),
        ] {
            assert_eq!(
                score(Some(&record("poor", "no", age, Some(10.0)))),
                expected,
                "age {age:?}"
            );
        }
    }

    #[test]
    fn capacity_tiers() {
        assert_eq!(capacity_points(Some(50.0)), 30);
        assert_eq!(capacity_points(Some(49.99)), 15);
        assert_eq!(capacity_points(Some(20.0)), 15);
        assert_eq!(capacity_points(Some(19.99)), 5);
        assert_eq!(capacity_points(None), 5);
    }

    #[test]
    fn score_stays_in_range() {
        let conditions = ["good", "fair", "poor", "", "mystery"];
        let pumps = ["yes", "true", "no", ""];
        let ages = ["new", "0-5 years", "moderate", "10-20", "old", ""];
        let capacities = [None, Some(0.0), Some(19.0), Some(20.0), Some(50.0), Some(500.0)];
        for condition in conditions {
            for pump in pumps {
                for age in ages {
                    for capacity in capacities {
                        let s = score(Some(&record(condition, pump, age, capacity)));
                        assert!(s <= MAX_SCORE, "{condition}/{pump}/{age}/{capacity:?} scored {s}");
                        assert!(s >= 5, "{condition}/{pump}/{age}/{capacity:?} scored {s}");
                    }
                }
            }
        }
    }
}
