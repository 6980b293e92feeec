#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Ward identity and source record types.
//!
//! Every dataset in the flood-risk system is keyed by ward. This crate
//! defines the canonical [`WardId`] join key, the three source record
//! types, and the closed categorical enums that drainage attributes are
//! normalized into before scoring.

pub mod category;

use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum_macros::{AsRefStr, Display, EnumString};

pub use category::{AgeCategory, DrainCondition, PumpAvailability};

/// Canonical ward identifier.
///
/// Only constructible through [`WardId::normalize`], so two identifiers
/// that differ in surrounding whitespace or in integral numeric rendering
/// (`"7"` vs `"7.0"`) always compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WardId(String);

impl WardId {
    /// Normalizes raw identifier text into its canonical form.
    ///
    /// Trims surrounding whitespace and rewrites integral decimal renderings
    /// such as `"12.0"` to `"12"`. Normalizing an already-normalized id
    /// returns the same id.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let trimmed = raw.trim();
        Self(integral_form(trimmed).map_or_else(|| trimmed.to_owned(), str::to_owned))
    }

    /// Returns the canonical identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the identifier is empty after normalization.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Returns the integer part of `s` if `s` is an integral decimal such as
/// `"12.0"` or `"12.000"`.
fn integral_form(s: &str) -> Option<&str> {
    let (int_part, frac) = s.split_once('.')?;
    let digits = int_part.strip_prefix('-').unwrap_or(int_part);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if frac.is_empty() || !frac.bytes().all(|b| b == b'0') {
        return None;
    }
    Some(int_part)
}

impl std::fmt::Display for WardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WardId {
    fn from(raw: &str) -> Self {
        Self::normalize(raw)
    }
}

impl AsRef<str> for WardId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Natural ordering: embedded digit runs compare numerically, so
/// `Ward_2` sorts before `Ward_10`.
impl Ord for WardId {
    fn cmp(&self, other: &Self) -> Ordering {
        natural_cmp(&self.0, &other.0)
    }
}

impl PartialOrd for WardId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for WardId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for WardId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::normalize(&raw))
    }
}

/// Alternating runs of ASCII digits and non-digits, borrowed from the input.
struct DigitRuns<'a> {
    rest: &'a str,
}

impl<'a> Iterator for DigitRuns<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let first_is_digit = self.rest.as_bytes().first()?.is_ascii_digit();
        let end = self
            .rest
            .bytes()
            .position(|b| b.is_ascii_digit() != first_is_digit)
            .unwrap_or(self.rest.len());
        let (run, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(run)
    }
}

fn compare_runs(x: &str, y: &str) -> Ordering {
    let is_num = |run: &str| run.as_bytes().first().is_some_and(u8::is_ascii_digit);
    if is_num(x) && is_num(y) {
        let (xt, yt) = (x.trim_start_matches('0'), y.trim_start_matches('0'));
        xt.len().cmp(&yt.len()).then_with(|| xt.cmp(yt))
    } else {
        x.cmp(y)
    }
}

fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (mut left, mut right) = (DigitRuns { rest: a }, DigitRuns { rest: b });
    loop {
        match (left.next(), right.next()) {
            (Some(x), Some(y)) => match compare_runs(x, y) {
                Ordering::Equal => {}
                ord => return ord,
            },
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            // Equal up to leading zeros; break the tie on the raw text.
            (None, None) => return a.cmp(b),
        }
    }
}

/// Timestamp of a rainfall observation.
///
/// The source text is kept verbatim for presentation. When the text is a
/// recognizable date or datetime it is also parsed, and parsed timestamps
/// order chronologically ahead of unparseable ones, which order lexically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationTime {
    raw: String,
    parsed: Option<NaiveDateTime>,
}

impl ObservationTime {
    /// Wraps raw timestamp text, parsing it when possible.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let raw = raw.trim();
        Self {
            raw: raw.to_owned(),
            parsed: parse_timestamp(raw),
        }
    }

    /// Returns the verbatim timestamp text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the parsed timestamp, if the text was recognizable.
    #[must_use]
    pub const fn parsed(&self) -> Option<NaiveDateTime> {
        self.parsed
    }
}

/// Parses `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` and ISO 8601 datetimes with
/// optional fractional seconds.
fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(naive);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive);
    }
    None
}

impl Ord for ObservationTime {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.parsed, other.parsed) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.raw.cmp(&other.raw)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.raw.cmp(&other.raw),
        }
    }
}

impl PartialOrd for ObservationTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for ObservationTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

/// One time-stamped rainfall observation for a ward.
#[derive(Debug, Clone, PartialEq)]
pub struct RainfallObservation {
    /// Ward the observation belongs to.
    pub ward_id: WardId,
    /// Observation time. `None` when the source has no `date` column.
    pub timestamp: Option<ObservationTime>,
    /// Rainfall intensity in mm/hr.
    pub intensity_mm_per_hr: f64,
    /// Rainfall amount in mm.
    pub amount_mm: f64,
}

/// Drainage infrastructure attributes for a ward.
///
/// Text attributes keep their source spelling for display; they are mapped
/// to [`category`] enums only when scored.
#[derive(Debug, Clone, PartialEq)]
pub struct DrainageRecord {
    pub ward_id: WardId,
    /// Drain capacity in mm/hr, if recorded.
    pub capacity_mm_per_hr: Option<f64>,
    pub condition: Option<String>,
    pub pump_available: Option<String>,
    pub age_category: Option<String>,
}

/// Geographic centroid of a ward.
#[derive(Debug, Clone, PartialEq)]
pub struct CentroidRecord {
    pub ward_id: WardId,
    pub latitude: f64,
    pub longitude: f64,
}

/// Display identity of a ward from the ward directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WardInfo {
    /// Human-readable ward name (e.g., "Connaught Place").
    pub name: String,
    /// Locality or district the ward belongs to.
    pub locality: String,
}

/// Flood risk classification for a ward.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum RiskLevel {
    /// Drainage comfortably handles the observed rainfall.
    Low,
    /// Rainfall is nearing drain capacity.
    Medium,
    /// Rainfall exceeds drain capacity, or capacity is unknown while it rains.
    High,
}
