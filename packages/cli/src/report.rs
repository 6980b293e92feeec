//! Plain-text diagnostic reports over a loaded dataset.

use std::io::{self, Write};

use flood_risk_dataset::{DatasetContext, Table, WardKeyed};
use flood_risk_engine::{Engine, join, risk};
use flood_risk_ward::WardDirectory;
use flood_risk_ward_models::WardId;

const SAMPLE_SIZE: usize = 5;

/// Prints column names, sample ward ids, rejected rows, and the first rows
/// of the rainfall/drainage join.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn inspect(dataset: &DatasetContext, out: &mut impl Write) -> io::Result<()> {
    write_table(out, "Rainfall", dataset.rainfall())?;
    write_table(out, "Drainage", dataset.drainage())?;
    write_table(out, "Centroid", dataset.centroids())?;

    if let Some(raw) = dataset.drainage().first_raw_ward_id() {
        writeln!(
            out,
            "First drainage ward id: {raw:?} (length {}, normalized {:?})",
            raw.len(),
            WardId::normalize(raw).as_str()
        )?;
    }
    writeln!(out)?;

    let issues: Vec<_> = dataset.issues().collect();
    if issues.is_empty() {
        writeln!(out, "No rejected rows")?;
    } else {
        writeln!(out, "Rejected rows ({}):", issues.len())?;
        for issue in issues {
            writeln!(out, "  {issue}")?;
        }
    }
    writeln!(out)?;

    writeln!(
        out,
        "{:<12} {:>14} {:>14} RISK",
        "WARD", "AVG INTENSITY", "CAPACITY"
    )?;
    writeln!(out, "{}", "-".repeat(50))?;
    for ward in join::rainfall_with_drainage(dataset).into_iter().take(SAMPLE_SIZE) {
        let capacity = ward.drainage.and_then(|d| d.capacity_mm_per_hr);
        let capacity_text = capacity.map_or_else(|| "-".to_string(), |c| format!("{c:.2}"));
        writeln!(
            out,
            "{:<12} {:>14.2} {:>14} {}",
            ward.ward_id.as_str(),
            ward.mean_intensity,
            capacity_text,
            risk::classify(ward.mean_intensity, capacity)
        )?;
    }

    Ok(())
}

/// Prints every ward whose intensity/capacity ratio exceeds `threshold`,
/// followed by the largest ratio among wards with a known capacity.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn check_risk(
    dataset: &DatasetContext,
    directory: &WardDirectory,
    threshold: f64,
    out: &mut impl Write,
) -> io::Result<()> {
    let ratios = Engine::new(dataset, directory).risk_ratios();

    writeln!(out, "Wards with intensity/capacity ratio above {threshold}:")?;
    let mut any = false;
    for ratio in ratios.iter().filter(|r| r.ratio > threshold) {
        any = true;
        let capacity = ratio
            .drain_capacity
            .map_or_else(|| "unknown".to_string(), |c| format!("{c:.2}"));
        writeln!(
            out,
            "  {}: intensity {:.2}, capacity {capacity}, ratio {:.2}",
            ratio.ward_id, ratio.average_rainfall_intensity, ratio.ratio
        )?;
    }
    if !any {
        writeln!(out, "  (none)")?;
    }

    let max = ratios
        .iter()
        .filter(|r| r.drain_capacity.is_some_and(|c| c > 0.0))
        .map(|r| r.ratio)
        .fold(None, |max: Option<f64>, r| Some(max.map_or(r, |m| m.max(r))));
    match max {
        Some(max) => writeln!(out, "Maximum ratio: {max:.2}")?,
        None => writeln!(out, "Maximum ratio: n/a (no ward has a known capacity)")?,
    }

    Ok(())
}

fn write_table<T: WardKeyed>(out: &mut impl Write, name: &str, table: &Table<T>) -> io::Result<()> {
    writeln!(out, "{name} table: {} row(s)", table.len())?;
    writeln!(out, "  columns: {}", table.columns().join(", "))?;

    let sample: Vec<&str> = table
        .ward_ids()
        .take(SAMPLE_SIZE)
        .map(|id| id.as_str())
        .collect();
    writeln!(out, "  ward ids: {}", sample.join(", "))?;

    let quarantined: Vec<String> = table
        .quarantined_wards()
        .into_iter()
        .map(ToString::to_string)
        .collect();
    if !quarantined.is_empty() {
        writeln!(out, "  quarantined: {}", quarantined.join(", "))?;
    }

    Ok(())
}
