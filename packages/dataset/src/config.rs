//! Dataset file locations.

use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_RAINFALL_FILE: &str = "rainfall_weather_mock_data.csv";
pub const DEFAULT_DRAINAGE_FILE: &str = "drainage_infrastructure_mock_data.csv";
pub const DEFAULT_CENTROID_FILE: &str = "delhi_ward_centroids.csv";

/// Paths of the three source files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub rainfall: PathBuf,
    pub drainage: PathBuf,
    pub centroids: PathBuf,
}

impl DatasetPaths {
    /// Uses the default file names inside `dir`.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            rainfall: dir.join(DEFAULT_RAINFALL_FILE),
            drainage: dir.join(DEFAULT_DRAINAGE_FILE),
            centroids: dir.join(DEFAULT_CENTROID_FILE),
        }
    }

    /// Resolves paths from the environment.
    ///
    /// `FLOOD_RISK_DATA_DIR` selects the directory (default `data`), and
    /// `FLOOD_RISK_RAINFALL_FILE`, `FLOOD_RISK_DRAINAGE_FILE` and
    /// `FLOOD_RISK_CENTROID_FILE` override individual file names relative
    /// to it.
    #[must_use]
    pub fn from_env() -> Self {
        let dir = std::env::var("FLOOD_RISK_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
        Self::resolve(Path::new(&dir), |key| std::env::var(key).ok())
    }

    fn resolve(dir: &Path, var: impl Fn(&str) -> Option<String>) -> Self {
        let file = |key: &str, default: &str| dir.join(var(key).unwrap_or_else(|| default.to_string()));
        Self {
            rainfall: file("FLOOD_RISK_RAINFALL_FILE", DEFAULT_RAINFALL_FILE),
            drainage: file("FLOOD_RISK_DRAINAGE_FILE", DEFAULT_DRAINAGE_FILE),
            centroids: file("FLOOD_RISK_CENTROID_FILE", DEFAULT_CENTROID_FILE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_dir_uses_default_names() {
        let paths = DatasetPaths::in_dir("/srv/flood");
        assert_eq!(paths.rainfall, Path::new("/srv/flood/rainfall_weather_mock_data.csv"));
        assert_eq!(paths.centroids, Path::new("/srv/flood/delhi_ward_centroids.csv"));
    }

    #[test]
    fn overrides_individual_files() {
        let paths = DatasetPaths::resolve(Path::new("d"), |key| {
            (key == "FLOOD_RISK_DRAINAGE_FILE").then(|| "drains_2024.csv".to_string())
        });
        assert_eq!(paths.drainage, Path::new("d/drains_2024.csv"));
        assert_eq!(paths, DatasetPaths {
            drainage: Path::new("d/drains_2024.csv").to_path_buf(),
            ..DatasetPaths::in_dir("d")
        });
    }
}
