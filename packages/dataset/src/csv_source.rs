//! CSV readers for the three source datasets.
//!
//! Headers are trimmed before column lookup, every cell is trimmed, and the
//! `ward_id` column is normalized through [`WardId::normalize`]. Rows that
//! fail validation are dropped and reported as [`DataIssue`]s instead of
//! failing the whole file.

use std::collections::BTreeMap;
use std::io::Read;

use flood_risk_ward_models::{
    CentroidRecord, DrainageRecord, ObservationTime, RainfallObservation, WardId,
};

use crate::DatasetError;
use crate::table::{DataIssue, IssueReason, Table, TableKind, WardKeyed};

pub const WARD_ID: &str = "ward_id";
pub const DATE: &str = "date";
pub const RAINFALL_INTENSITY: &str = "rainfall_intensity_mm_per_hr";
pub const RAINFALL_AMOUNT: &str = "rainfall_mm";
pub const DRAIN_CAPACITY: &str = "drain_capacity_mm_per_hr";
pub const DRAIN_CONDITION: &str = "drain_condition";
pub const PUMP_AVAILABLE: &str = "pump_available";
pub const INFRASTRUCTURE_AGE: &str = "infrastructure_age_category";
pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";

/// A rejected cell, before it is attributed to a ward and line.
struct CellIssue {
    column: &'static str,
    value: String,
    reason: IssueReason,
}

/// Whether a numeric column may hold negative values.
#[derive(Clone, Copy)]
enum Sign {
    NonNegative,
    Any,
}

/// One CSV row with header-name access.
struct Row<'a> {
    headers: &'a BTreeMap<String, usize>,
    record: &'a csv::StringRecord,
}

impl Row<'_> {
    /// Returns the trimmed cell text, or `None` for an empty cell or a
    /// column the file does not have.
    fn text(&self, column: &str) -> Option<&str> {
        let idx = *self.headers.get(column)?;
        let value = self.record.get(idx)?.trim();
        (!value.is_empty()).then_some(value)
    }

    fn optional_number(&self, column: &'static str, sign: Sign) -> Result<Option<f64>, CellIssue> {
        let Some(raw) = self.text(column) else {
            return Ok(None);
        };
        let issue = |reason| CellIssue {
            column,
            value: raw.to_owned(),
            reason,
        };
        let value: f64 = raw.parse().map_err(|_| issue(IssueReason::NotANumber))?;
        if !value.is_finite() {
            return Err(issue(IssueReason::NotANumber));
        }
        if matches!(sign, Sign::NonNegative) && value < 0.0 {
            return Err(issue(IssueReason::Negative));
        }
        Ok(Some(value))
    }

    fn number(&self, column: &'static str, sign: Sign) -> Result<f64, CellIssue> {
        self.optional_number(column, sign)?.ok_or(CellIssue {
            column,
            value: String::new(),
            reason: IssueReason::Missing,
        })
    }

    fn owned_text(&self, column: &str) -> Option<String> {
        self.text(column).map(str::to_owned)
    }
}

/// Reads the rainfall observations table.
///
/// Requires `ward_id`, `rainfall_intensity_mm_per_hr` and `rainfall_mm`
/// columns. The `date` column is optional; without it every observation
/// has no timestamp.
///
/// # Errors
///
/// Returns [`DatasetError`] if the file cannot be read as CSV or lacks a
/// required column.
pub fn read_rainfall<R: Read>(reader: R) -> Result<Table<RainfallObservation>, DatasetError> {
    read_table(
        TableKind::Rainfall,
        reader,
        &[WARD_ID, RAINFALL_INTENSITY, RAINFALL_AMOUNT],
        |ward_id, row| {
            Ok(RainfallObservation {
                ward_id,
                timestamp: row.text(DATE).map(ObservationTime::new),
                intensity_mm_per_hr: row.number(RAINFALL_INTENSITY, Sign::NonNegative)?,
                amount_mm: row.number(RAINFALL_AMOUNT, Sign::NonNegative)?,
            })
        },
    )
}

/// Reads the drainage infrastructure table.
///
/// Only `ward_id` is required; every attribute column may be absent or
/// empty.
///
/// # Errors
///
/// Returns [`DatasetError`] if the file cannot be read as CSV or lacks the
/// `ward_id` column.
pub fn read_drainage<R: Read>(reader: R) -> Result<Table<DrainageRecord>, DatasetError> {
    read_table(TableKind::Drainage, reader, &[WARD_ID], |ward_id, row| {
        Ok(DrainageRecord {
            ward_id,
            capacity_mm_per_hr: row.optional_number(DRAIN_CAPACITY, Sign::NonNegative)?,
            condition: row.owned_text(DRAIN_CONDITION),
            pump_available: row.owned_text(PUMP_AVAILABLE),
            age_category: row.owned_text(INFRASTRUCTURE_AGE),
        })
    })
}

/// Reads the ward centroid table.
///
/// # Errors
///
/// Returns [`DatasetError`] if the file cannot be read as CSV or lacks a
/// `ward_id`, `latitude` or `longitude` column.
pub fn read_centroids<R: Read>(reader: R) -> Result<Table<CentroidRecord>, DatasetError> {
    read_table(
        TableKind::Centroid,
        reader,
        &[WARD_ID, LATITUDE, LONGITUDE],
        |ward_id, row| {
            Ok(CentroidRecord {
                ward_id,
                latitude: row.number(LATITUDE, Sign::Any)?,
                longitude: row.number(LONGITUDE, Sign::Any)?,
            })
        },
    )
}

fn read_table<T, R, F>(
    kind: TableKind,
    reader: R,
    required: &[&str],
    parse: F,
) -> Result<Table<T>, DatasetError>
where
    T: WardKeyed,
    R: Read,
    F: Fn(WardId, &Row<'_>) -> Result<T, CellIssue>,
{
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();

    let mut headers = BTreeMap::new();
    for (i, name) in columns.iter().enumerate() {
        headers.entry(name.clone()).or_insert(i);
    }

    if let Some(missing) = required.iter().find(|c| !headers.contains_key(**c)) {
        return Err(DatasetError::MissingColumn {
            table: kind,
            column: (*missing).to_owned(),
        });
    }

    let mut rows = Vec::new();
    let mut issues = Vec::new();
    let mut first_raw_ward_id = None;

    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, csv::Position::line);
        if first_raw_ward_id.is_none() {
            first_raw_ward_id = Some(
                headers
                    .get(WARD_ID)
                    .and_then(|&idx| record.get(idx))
                    .unwrap_or_default()
                    .to_owned(),
            );
        }
        let row = Row {
            headers: &headers,
            record: &record,
        };

        let Some(raw_id) = row.text(WARD_ID) else {
            let issue = DataIssue {
                table: kind,
                ward_id: WardId::normalize(""),
                column: WARD_ID.to_owned(),
                value: String::new(),
                reason: IssueReason::Missing,
                line,
            };
            log::warn!("Skipping row: {issue}");
            issues.push(issue);
            continue;
        };
        let ward_id = WardId::normalize(raw_id);

        match parse(ward_id.clone(), &row) {
            Ok(parsed) => rows.push(parsed),
            Err(cell) => {
                let issue = DataIssue {
                    table: kind,
                    ward_id,
                    column: cell.column.to_owned(),
                    value: cell.value,
                    reason: cell.reason,
                    line,
                };
                log::warn!("Skipping row: {issue}");
                issues.push(issue);
            }
        }
    }

    let table = Table::new(kind, columns, rows, issues).with_first_raw_ward_id(first_raw_ward_id);

    if kind != TableKind::Rainfall {
        for ward_id in table.duplicated_wards() {
            log::warn!("{kind} table has more than one row for ward '{ward_id}'; using the first");
        }
    }

    log::info!(
        "Loaded {} {kind} rows ({} rejected)",
        table.len(),
        table.issues().len()
    );

    Ok(table)
}
