//! Reconciliation of the three ward-keyed tables.
//!
//! The list and map views start from the rainfall aggregate and left-join
//! drainage onto it; the map view additionally inner-joins centroids.
//! Wards with rejected source rows are left out of the join with a
//! warning so one ward's bad data never hides the rest.

use std::collections::BTreeSet;

use flood_risk_dataset::{DataIssue, DatasetContext};
use flood_risk_ward_models::{CentroidRecord, DrainageRecord, WardId};

use crate::{EngineError, aggregate};

/// A ward from the rainfall aggregate with its drainage record, if any.
#[derive(Debug, Clone, Copy)]
pub struct JoinedWard<'a> {
    pub ward_id: &'a WardId,
    pub mean_intensity: f64,
    pub drainage: Option<&'a DrainageRecord>,
}

/// Fails with [`EngineError::MalformedData`] if any rainfall or drainage
/// row of `ward_id` was rejected at load time.
///
/// # Errors
///
/// Returns [`EngineError::MalformedData`] listing the rejected rows.
pub fn ensure_clean(dataset: &DatasetContext, ward_id: &WardId) -> Result<(), EngineError> {
    let issues: Vec<DataIssue> = dataset
        .rainfall()
        .issues_for(ward_id)
        .into_iter()
        .chain(dataset.drainage().issues_for(ward_id))
        .cloned()
        .collect();

    if issues.is_empty() {
        Ok(())
    } else {
        Err(EngineError::MalformedData {
            ward_id: ward_id.clone(),
            issues,
        })
    }
}

/// Aggregates rainfall by ward and left-joins drainage onto it.
///
/// Returns one entry per ward with rainfall observations, in natural ward
/// order. Wards with rejected rainfall or drainage rows are skipped.
#[must_use]
pub fn rainfall_with_drainage(dataset: &DatasetContext) -> Vec<JoinedWard<'_>> {
    let rainfall = dataset.rainfall();
    let wards: BTreeSet<&WardId> = rainfall
        .ward_ids()
        .chain(rainfall.quarantined_wards())
        .collect();

    wards
        .into_iter()
        .filter_map(|ward_id| {
            if let Err(e) = ensure_clean(dataset, ward_id) {
                log::warn!("Skipping ward: {e}");
                return None;
            }
            Some(JoinedWard {
                ward_id,
                mean_intensity: aggregate::mean_intensity(rainfall, ward_id),
                drainage: dataset.drainage().first_for(ward_id),
            })
        })
        .collect()
}

/// Inner-joins centroids onto the rainfall/drainage join.
///
/// Wards without a centroid are dropped silently; wards whose centroid row
/// was rejected are dropped with a warning.
#[must_use]
pub fn with_centroids<'a>(
    dataset: &'a DatasetContext,
    joined: Vec<JoinedWard<'a>>,
) -> Vec<(JoinedWard<'a>, &'a CentroidRecord)> {
    let centroids = dataset.centroids();
    joined
        .into_iter()
        .filter_map(|ward| {
            let issues = centroids.issues_for(ward.ward_id);
            if !issues.is_empty() {
                log::warn!(
                    "Leaving ward '{}' off the map: {} rejected centroid row(s)",
                    ward.ward_id,
                    issues.len()
                );
                return None;
            }
            centroids.first_for(ward.ward_id).map(|c| (ward, c))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flood_risk_dataset::csv_source::{read_centroids, read_drainage, read_rainfall};

    fn dataset(rainfall: &str, drainage: &str, centroids: &str) -> DatasetContext {
        DatasetContext::new(
            read_rainfall(rainfall.as_bytes()).unwrap(),
            read_drainage(drainage.as_bytes()).unwrap(),
            read_centroids(centroids.as_bytes()).unwrap(),
        )
    }

    const RAINFALL: &str = "ward_id,rainfall_intensity_mm_per_hr,rainfall_mm\n\
                            Ward_10,30,720\n\
                            Ward_2,10,240\n\
                            Ward_2,20,480\n\
                            Ward_3,5,120\n";

    #[test]
    fn left_join_keeps_wards_without_drainage() {
        let data = dataset(
            RAINFALL,
            "ward_id,drain_capacity_mm_per_hr\n Ward_2 ,40\nWard_99,10\n",
            "ward_id,latitude,longitude\n",
        );
        let joined = rainfall_with_drainage(&data);
        let ids: Vec<&str> = joined.iter().map(|w| w.ward_id.as_str()).collect();
        assert_eq!(ids, ["Ward_2", "Ward_3", "Ward_10"]);

        let ward_2 = &joined[0];
        assert!((ward_2.mean_intensity - 15.0).abs() < f64::EPSILON);
        assert_eq!(ward_2.drainage.unwrap().capacity_mm_per_hr, Some(40.0));
        assert!(joined[1].drainage.is_none());
    }

    #[test]
    fn malformed_drainage_skips_only_that_ward() {
        let data = dataset(
            RAINFALL,
            "ward_id,drain_capacity_mm_per_hr\nWard_2,forty\nWard_3,25\n",
            "ward_id,latitude,longitude\n",
        );
        let ids: Vec<String> = rainfall_with_drainage(&data)
            .iter()
            .map(|w| w.ward_id.to_string())
            .collect();
        assert_eq!(ids, ["Ward_3", "Ward_10"]);
    }

    #[test]
    fn malformed_rainfall_row_skips_the_ward() {
        let data = dataset(
            "ward_id,rainfall_intensity_mm_per_hr,rainfall_mm\nWard_1,heavy,0\nWard_2,4,96\n",
            "ward_id\n",
            "ward_id,latitude,longitude\n",
        );
        let joined = rainfall_with_drainage(&data);
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].ward_id.as_str(), "Ward_2");
        assert!(matches!(
            ensure_clean(&data, &WardId::normalize("Ward_1")),
            Err(EngineError::MalformedData { ref issues, .. }) if issues.len() == 1
        ));
    }

    #[test]
    fn centroid_join_is_inner() {
        let data = dataset(
            RAINFALL,
            "ward_id,drain_capacity_mm_per_hr\nWard_2,40\nWard_3,25\n",
            "ward_id,latitude,longitude\nWard_2,28.65,77.19\nWard_10,28.62,77.08\nWard_3,north,77.2\n",
        );
        let mapped = with_centroids(&data, rainfall_with_drainage(&data));
        let ids: Vec<&str> = mapped.iter().map(|(w, _)| w.ward_id.as_str()).collect();
        assert_eq!(ids, ["Ward_2", "Ward_10"]);
        assert!((mapped[0].1.latitude - 28.65).abs() < f64::EPSILON);
    }
}
