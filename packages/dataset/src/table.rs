//! Read-only, ward-indexed tables and per-row data-quality findings.

use std::collections::{BTreeMap, BTreeSet};

use flood_risk_ward_models::{CentroidRecord, DrainageRecord, RainfallObservation, WardId};
use strum_macros::{AsRefStr, Display};

/// Which source dataset a table or issue belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum TableKind {
    Rainfall,
    Drainage,
    Centroid,
}

/// Why a source row was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum IssueReason {
    /// A required value was empty.
    #[strum(to_string = "missing value")]
    Missing,
    /// A numeric column held text that is not a finite number.
    #[strum(to_string = "not a number")]
    NotANumber,
    /// A column that must be non-negative held a negative number.
    #[strum(to_string = "negative value")]
    Negative,
}

/// A data-quality finding for one source row.
///
/// The offending row is excluded from its table and its ward is treated
/// as quarantined for that table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataIssue {
    pub table: TableKind,
    pub ward_id: WardId,
    pub column: String,
    /// The raw cell text.
    pub value: String,
    pub reason: IssueReason,
    /// 1-based line number of the row in the source file (header is line 1).
    pub line: u64,
}

impl std::fmt::Display for DataIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} line {}: ward '{}' column '{}' = {:?}: {}",
            self.table, self.line, self.ward_id, self.column, self.value, self.reason
        )
    }
}

/// A record that belongs to a ward.
pub trait WardKeyed {
    /// Returns the ward this record belongs to.
    fn ward_id(&self) -> &WardId;
}

impl WardKeyed for RainfallObservation {
    fn ward_id(&self) -> &WardId {
        &self.ward_id
    }
}

impl WardKeyed for DrainageRecord {
    fn ward_id(&self) -> &WardId {
        &self.ward_id
    }
}

impl WardKeyed for CentroidRecord {
    fn ward_id(&self) -> &WardId {
        &self.ward_id
    }
}

/// An immutable table of records indexed by ward.
#[derive(Debug, Clone)]
pub struct Table<T> {
    kind: TableKind,
    columns: Vec<String>,
    rows: Vec<T>,
    index: BTreeMap<WardId, Vec<usize>>,
    issues: Vec<DataIssue>,
    first_raw_ward_id: Option<String>,
}

impl<T: WardKeyed> Table<T> {
    /// Builds a table, indexing rows by ward in source order.
    #[must_use]
    pub fn new(kind: TableKind, columns: Vec<String>, rows: Vec<T>, issues: Vec<DataIssue>) -> Self {
        let mut index: BTreeMap<WardId, Vec<usize>> = BTreeMap::new();
        for (i, row) in rows.iter().enumerate() {
            index.entry(row.ward_id().clone()).or_default().push(i);
        }
        Self {
            kind,
            columns,
            rows,
            index,
            issues,
            first_raw_ward_id: None,
        }
    }

    /// Records the untrimmed `ward_id` cell of the first data row.
    #[must_use]
    pub fn with_first_raw_ward_id(mut self, raw: Option<String>) -> Self {
        self.first_raw_ward_id = raw;
        self
    }

    /// Returns an empty table, used when a source fails to load.
    #[must_use]
    pub fn empty(kind: TableKind) -> Self {
        Self::new(kind, Vec::new(), Vec::new(), Vec::new())
    }

    #[must_use]
    pub const fn kind(&self) -> TableKind {
        self.kind
    }

    /// Returns the normalized column names of the source file.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns every accepted row in source order.
    #[must_use]
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Returns the `ward_id` cell of the first data row exactly as it appeared
    /// in the source, before trimming and normalization.
    #[must_use]
    pub fn first_raw_ward_id(&self) -> Option<&str> {
        self.first_raw_ward_id.as_deref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns `true` if the table has at least one accepted row for `ward_id`.
    #[must_use]
    pub fn contains(&self, ward_id: &WardId) -> bool {
        self.index.contains_key(ward_id)
    }

    /// Iterates the rows of one ward in source order.
    pub fn rows_for<'a>(&'a self, ward_id: &WardId) -> impl Iterator<Item = &'a T> + use<'a, T> {
        self.index
            .get(ward_id)
            .into_iter()
            .flatten()
            .map(|&i| &self.rows[i])
    }

    /// Returns the first row for `ward_id`. Used for tables that hold at most
    /// one row per ward.
    #[must_use]
    pub fn first_for(&self, ward_id: &WardId) -> Option<&T> {
        self.rows_for(ward_id).next()
    }

    /// Iterates the distinct ward ids present in the table, in natural order.
    pub fn ward_ids(&self) -> impl Iterator<Item = &WardId> {
        self.index.keys()
    }

    /// Returns every ward id that has more than one row.
    #[must_use]
    pub fn duplicated_wards(&self) -> Vec<&WardId> {
        self.index
            .iter()
            .filter(|(_, rows)| rows.len() > 1)
            .map(|(id, _)| id)
            .collect()
    }

    /// Returns every data-quality issue found while loading.
    #[must_use]
    pub fn issues(&self) -> &[DataIssue] {
        &self.issues
    }

    /// Returns the issues recorded against one ward.
    #[must_use]
    pub fn issues_for(&self, ward_id: &WardId) -> Vec<&DataIssue> {
        self.issues.iter().filter(|i| &i.ward_id == ward_id).collect()
    }

    /// Returns the wards that had at least one rejected row.
    #[must_use]
    pub fn quarantined_wards(&self) -> BTreeSet<&WardId> {
        self.issues
            .iter()
            .map(|i| &i.ward_id)
            .filter(|id| !id.is_empty())
            .collect()
    }
}
