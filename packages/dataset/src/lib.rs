#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dataset store for the flood-risk service.
//!
//! Loads the rainfall, drainage, and centroid CSV files once at startup
//! into an immutable [`DatasetContext`]. Column names and ward identifiers
//! are normalized at load time. A file that cannot be loaded is replaced
//! by an empty table so the service keeps answering with whatever data
//! remains.

pub mod config;
pub mod csv_source;
pub mod table;

use std::fs::File;
use std::path::Path;

use flood_risk_ward_models::{CentroidRecord, DrainageRecord, RainfallObservation};
use thiserror::Error;

pub use config::DatasetPaths;
pub use table::{DataIssue, IssueReason, Table, TableKind, WardKeyed};

/// Errors that can occur while loading a source table.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The file could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is missing from the header row.
    #[error("{table} file is missing required column '{column}'")]
    MissingColumn {
        /// The table being loaded.
        table: TableKind,
        /// Name of the missing column.
        column: String,
    },
}

/// The three source tables, loaded once and never mutated.
#[derive(Debug, Clone)]
pub struct DatasetContext {
    rainfall: Table<RainfallObservation>,
    drainage: Table<DrainageRecord>,
    centroids: Table<CentroidRecord>,
}

impl DatasetContext {
    #[must_use]
    pub const fn new(
        rainfall: Table<RainfallObservation>,
        drainage: Table<DrainageRecord>,
        centroids: Table<CentroidRecord>,
    ) -> Self {
        Self {
            rainfall,
            drainage,
            centroids,
        }
    }

    /// Loads all three tables from disk.
    ///
    /// Never fails: a table whose file is missing or malformed is logged and
    /// replaced by an empty table.
    #[must_use]
    pub fn load(paths: &DatasetPaths) -> Self {
        log::info!("Loading datasets...");
        Self {
            rainfall: load_or_empty(TableKind::Rainfall, &paths.rainfall, csv_source::read_rainfall),
            drainage: load_or_empty(TableKind::Drainage, &paths.drainage, csv_source::read_drainage),
            centroids: load_or_empty(
                TableKind::Centroid,
                &paths.centroids,
                csv_source::read_centroids,
            ),
        }
    }

    #[must_use]
    pub const fn rainfall(&self) -> &Table<RainfallObservation> {
        &self.rainfall
    }

    #[must_use]
    pub const fn drainage(&self) -> &Table<DrainageRecord> {
        &self.drainage
    }

    #[must_use]
    pub const fn centroids(&self) -> &Table<CentroidRecord> {
        &self.centroids
    }

    /// Returns every data-quality issue across all three tables.
    pub fn issues(&self) -> impl Iterator<Item = &DataIssue> {
        self.rainfall
            .issues()
            .iter()
            .chain(self.drainage.issues())
            .chain(self.centroids.issues())
    }
}

fn load_or_empty<T: WardKeyed>(
    kind: TableKind,
    path: &Path,
    read: fn(File) -> Result<Table<T>, DatasetError>,
) -> Table<T> {
    let result = File::open(path)
        .map_err(DatasetError::from)
        .and_then(read);

    match result {
        Ok(table) => table,
        Err(e) => {
            log::error!(
                "Failed to load {kind} data from {}: {e}; serving an empty table",
                path.display()
            );
            Table::empty(kind)
        }
    }
}
