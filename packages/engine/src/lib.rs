#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Join-and-derive aggregation engine.
//!
//! Combines the rainfall, drainage, and centroid tables of a
//! [`DatasetContext`] into per-ward risk and preparedness records. Every
//! query is a pure read over the context; nothing is cached between calls.

pub mod aggregate;
pub mod fallback;
pub mod join;
pub mod preparedness;
pub mod risk;

use flood_risk_dataset::{DataIssue, DatasetContext};
use flood_risk_engine_models::{MapWard, WardDetail, WardRatio, WardSummary};
use flood_risk_ward::WardDirectory;
use flood_risk_ward_models::{DrainageRecord, WardId};
use thiserror::Error;

use crate::join::JoinedWard;

/// Errors from single-ward queries.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The ward is in neither the rainfall nor the drainage table.
    #[error("Ward '{0}' not found")]
    WardNotFound(WardId),

    /// Some of the ward's rainfall or drainage rows were rejected at load
    /// time, so its derived values would be wrong.
    #[error("Ward '{ward_id}' has {} malformed source row(s)", .issues.len())]
    MalformedData {
        ward_id: WardId,
        issues: Vec<DataIssue>,
    },
}

/// Query entry point over a loaded dataset and ward directory.
#[derive(Debug, Clone, Copy)]
pub struct Engine<'a> {
    dataset: &'a DatasetContext,
    directory: &'a WardDirectory,
}

impl<'a> Engine<'a> {
    #[must_use]
    pub const fn new(dataset: &'a DatasetContext, directory: &'a WardDirectory) -> Self {
        Self { dataset, directory }
    }

    /// One summary per ward with rainfall observations, in natural ward
    /// order. Wards with malformed source rows are skipped.
    #[must_use]
    pub fn list_wards(&self) -> Vec<WardSummary> {
        join::rainfall_with_drainage(self.dataset)
            .into_iter()
            .map(|ward| self.summarize(ward.ward_id, ward.mean_intensity, ward.drainage))
            .collect()
    }

    /// Full detail for one ward.
    ///
    /// The ward is looked up in the rainfall and drainage tables
    /// independently; it only needs to appear in one of them.
    ///
    /// # Errors
    ///
    /// * [`EngineError::MalformedData`] if any of the ward's rainfall or
    ///   drainage rows were rejected
    /// * [`EngineError::WardNotFound`] if the ward is in neither table
    pub fn ward_detail(&self, raw_ward_id: &str) -> Result<WardDetail, EngineError> {
        let ward_id = WardId::normalize(raw_ward_id);
        log::debug!("Looking up ward '{ward_id}'");

        join::ensure_clean(self.dataset, &ward_id)?;

        let rainfall = self.dataset.rainfall();
        let drainage = self.dataset.drainage().first_for(&ward_id);
        if drainage.is_none() && !rainfall.contains(&ward_id) {
            return Err(EngineError::WardNotFound(ward_id));
        }

        let mean = aggregate::mean_intensity(rainfall, &ward_id);
        let summary = self.summarize(&ward_id, mean, drainage);
        let risk_explanation = risk::explain(summary.risk_level, mean, summary.drain_capacity);

        Ok(WardDetail {
            rainfall_history: aggregate::history(rainfall, &ward_id),
            drainage_info: fallback::resolve_drainage(drainage),
            risk_explanation,
            summary,
        })
    }

    /// Wards positioned by centroid. Wards without a usable centroid are
    /// left out.
    #[must_use]
    pub fn map_data(&self) -> Vec<MapWard> {
        let joined = join::rainfall_with_drainage(self.dataset);
        join::with_centroids(self.dataset, joined)
            .into_iter()
            .map(|(ward, centroid)| {
                let summary = self.summarize(ward.ward_id, ward.mean_intensity, ward.drainage);
                MapWard {
                    ward_id: summary.ward_id,
                    display_name: summary.ward_name,
                    locality: summary.locality,
                    latitude: centroid.latitude,
                    longitude: centroid.longitude,
                    risk_level: summary.risk_level,
                    preparedness_score: summary.preparedness_score,
                }
            })
            .collect()
    }

    /// Intensity-to-capacity ratio for every ward in the list view.
    #[must_use]
    pub fn risk_ratios(&self) -> Vec<WardRatio> {
        join::rainfall_with_drainage(self.dataset)
            .into_iter()
            .map(|JoinedWard { ward_id, mean_intensity, drainage }| {
                let capacity = drainage.and_then(|d| d.capacity_mm_per_hr);
                WardRatio {
                    ward_id: ward_id.clone(),
                    average_rainfall_intensity: mean_intensity,
                    drain_capacity: capacity,
                    ratio: risk::intensity_ratio(mean_intensity, capacity),
                }
            })
            .collect()
    }

    fn summarize(
        &self,
        ward_id: &WardId,
        mean_intensity: f64,
        drainage: Option<&DrainageRecord>,
    ) -> WardSummary {
        let identity = fallback::resolve_identity(self.directory, ward_id);
        let drain_capacity = fallback::resolve_drainage(drainage).capacity;

        WardSummary {
            ward_id: ward_id.clone(),
            ward_name: identity.name,
            locality: identity.locality,
            average_rainfall_intensity: mean_intensity,
            drain_capacity,
            risk_level: risk::classify(mean_intensity, Some(drain_capacity)),
            preparedness_score: preparedness::score(drainage),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use flood_risk_dataset::DatasetPaths;
    use flood_risk_dataset::csv_source::{read_centroids, read_drainage, read_rainfall};
    use flood_risk_ward_models::RiskLevel;

    use super::*;

    fn sample_dataset() -> DatasetContext {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data");
        DatasetContext::load(&DatasetPaths::in_dir(dir))
    }

    fn dataset(rainfall: &str, drainage: &str, centroids: &str) -> DatasetContext {
        DatasetContext::new(
            read_rainfall(rainfall.as_bytes()).unwrap(),
            read_drainage(drainage.as_bytes()).unwrap(),
            read_centroids(centroids.as_bytes()).unwrap(),
        )
    }

    #[test]
    fn ward_9_end_to_end() {
        let dataset = sample_dataset();
        let directory = WardDirectory::builtin();
        let detail = Engine::new(&dataset, &directory).ward_detail("Ward_9").unwrap();

        assert!((detail.summary.average_rainfall_intensity - 62.5).abs() < 1e-9);
        assert!((detail.summary.drain_capacity - 50.0).abs() < f64::EPSILON);
        assert_eq!(detail.summary.risk_level, RiskLevel::High);
        assert_eq!(detail.summary.preparedness_score, 75);
        assert_eq!(detail.drainage_info.condition, "Fair");
        assert_eq!(detail.drainage_info.infrastructure_age, "10-20 years");
        assert_eq!(detail.rainfall_history.len(), 8);
        assert_eq!(
            detail.risk_explanation,
            "Rainfall intensity (62.5 mm/hr) exceeds drain capacity (50.0 mm/hr)."
        );
    }

    #[test]
    fn list_covers_rainfall_wards_in_natural_order() {
        let dataset = sample_dataset();
        let directory = WardDirectory::builtin();
        let wards = Engine::new(&dataset, &directory).list_wards();

        let ids: Vec<&str> = wards.iter().map(|w| w.ward_id.as_str()).collect();
        let expected: Vec<String> = (1..=14).map(|n| format!("Ward_{n}")).collect();
        assert_eq!(ids, expected);

        let ward_13 = wards.iter().find(|w| w.ward_id.as_str() == "Ward_13").unwrap();
        assert!(ward_13.drain_capacity.abs() < f64::EPSILON);
        assert_eq!(ward_13.preparedness_score, 0);
        assert_eq!(ward_13.risk_level, RiskLevel::High);
    }

    #[test]
    fn rainfall_only_ward_uses_sentinels() {
        let dataset = sample_dataset();
        let directory = WardDirectory::builtin();
        let detail = Engine::new(&dataset, &directory).ward_detail("Ward_13").unwrap();

        assert!(detail.summary.drain_capacity.abs() < f64::EPSILON);
        assert_eq!(detail.summary.preparedness_score, 0);
        assert_eq!(detail.summary.risk_level, RiskLevel::High);
        assert_eq!(detail.drainage_info.condition, fallback::UNKNOWN);
        assert_eq!(detail.drainage_info.pump_available, fallback::UNKNOWN);
        assert_eq!(detail.drainage_info.infrastructure_age, fallback::UNKNOWN);
    }

    #[test]
    fn drainage_only_ward_has_empty_history() {
        let dataset = sample_dataset();
        let directory = WardDirectory::builtin();
        let detail = Engine::new(&dataset, &directory).ward_detail("Ward_15").unwrap();

        assert!(detail.summary.average_rainfall_intensity.abs() < f64::EPSILON);
        assert!(detail.rainfall_history.is_empty());
        assert_eq!(detail.summary.risk_level, RiskLevel::Low);
        assert_eq!(detail.summary.preparedness_score, 100);
    }

    #[test]
    fn unknown_ward_is_not_found() {
        let dataset = sample_dataset();
        let directory = WardDirectory::builtin();
        let result = Engine::new(&dataset, &directory).ward_detail("Ward_404");
        assert!(matches!(result, Err(EngineError::WardNotFound(id)) if id.as_str() == "Ward_404"));
    }

    #[test]
    fn lookup_normalizes_the_ward_id() {
        let dataset = sample_dataset();
        let directory = WardDirectory::builtin();
        let engine = Engine::new(&dataset, &directory);
        assert_eq!(
            engine.ward_detail(" Ward_1 ").unwrap(),
            engine.ward_detail("Ward_1").unwrap()
        );
    }

    #[test]
    fn map_excludes_wards_without_centroids() {
        let dataset = sample_dataset();
        let directory = WardDirectory::builtin();
        let map = Engine::new(&dataset, &directory).map_data();

        assert!(map.iter().all(|w| w.ward_id.as_str() != "Ward_14"));
        assert!(map.iter().all(|w| w.ward_id.as_str() != "Ward_15"));
        assert_eq!(map.len(), 13);

        let ward_1 = &map[0];
        assert_eq!(ward_1.ward_id.as_str(), "Ward_1");
        assert_eq!(ward_1.display_name, "Connaught Place");
        assert!((ward_1.latitude - 28.6315).abs() < f64::EPSILON);
    }

    #[test]
    fn malformed_capacity_isolates_one_ward() {
        let dataset = dataset(
            "ward_id,rainfall_intensity_mm_per_hr,rainfall_mm\nWard_1,10,240\nWard_2,20,480\n",
            "ward_id,drain_capacity_mm_per_hr\nWard_1,lots\nWard_2,40\n",
            "ward_id,latitude,longitude\nWard_1,28.6,77.2\nWard_2,28.7,77.1\n",
        );
        let directory = WardDirectory::builtin();
        let engine = Engine::new(&dataset, &directory);

        let listed: Vec<String> = engine.list_wards().iter().map(|w| w.ward_id.to_string()).collect();
        assert_eq!(listed, ["Ward_2"]);
        assert_eq!(engine.map_data().len(), 1);
        assert!(matches!(
            engine.ward_detail("Ward_1"),
            Err(EngineError::MalformedData { ref issues, .. }) if issues.len() == 1
        ));
    }

    #[test]
    fn unlisted_ward_gets_synthesized_name() {
        let dataset = dataset(
            "ward_id,rainfall_intensity_mm_per_hr,rainfall_mm\n42,9,216\n",
            "ward_id,drain_capacity_mm_per_hr\n42.0,10\n",
            "ward_id,latitude,longitude\n",
        );
        let directory = WardDirectory::builtin();
        let wards = Engine::new(&dataset, &directory).list_wards();

        assert_eq!(wards.len(), 1);
        assert_eq!(wards[0].ward_name, "Ward 42");
        assert_eq!(wards[0].locality, "Delhi");
        assert_eq!(wards[0].risk_level, RiskLevel::Medium);
    }

    #[test]
    fn ratios_use_sentinel_for_missing_capacity() {
        let dataset = sample_dataset();
        let directory = WardDirectory::builtin();
        let ratios = Engine::new(&dataset, &directory).risk_ratios();

        let ward_9 = ratios.iter().find(|r| r.ward_id.as_str() == "Ward_9").unwrap();
        assert!((ward_9.ratio - 1.25).abs() < 1e-9);
        let ward_13 = ratios.iter().find(|r| r.ward_id.as_str() == "Ward_13").unwrap();
        assert_eq!(ward_13.drain_capacity, None);
        assert!((ward_13.ratio - WardRatio::UNKNOWN_CAPACITY_RATIO).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_files_give_empty_views() {
        let dataset = DatasetContext::load(&DatasetPaths::in_dir("/nonexistent/flood-risk"));
        let directory = WardDirectory::builtin();
        let engine = Engine::new(&dataset, &directory);
        assert!(engine.list_wards().is_empty());
        assert!(engine.map_data().is_empty());
        assert!(matches!(engine.ward_detail("Ward_1"), Err(EngineError::WardNotFound(_))));
    }
}
