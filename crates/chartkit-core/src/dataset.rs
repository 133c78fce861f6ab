// File: crates/chartkit-core/src/dataset.rs
// Summary: CSV ingestion: raw rows decoded into typed records with lenient numeric/time
// coercion, required header columns, and the load-failure policy shared by every page.

use std::io::Read;
use std::path::Path;

use chrono::NaiveTime;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::error::{ChartError, Result};

/// Total, idempotent text -> number coercion. Surrounding whitespace is ignored;
/// empty, missing or unparsable text yields NaN.
pub fn coerce_number(raw: Option<&str>) -> f64 {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// Clock time from hour/minute fields. Fractions are truncated and overflow wraps
/// into the next day (25:00 reads as 01:00). Non-finite input is an invalid time (`None`).
pub fn time_of_day(hours: f64, minutes: f64) -> Option<NaiveTime> {
    if !(hours.is_finite() && minutes.is_finite()) {
        return None;
    }
    let total = (hours.trunc() * 60.0 + minutes.trunc()).rem_euclid(24.0 * 60.0) as u32;
    NaiveTime::from_hms_opt(total / 60, total % 60, 0)
}

/// serde helper for numeric record fields: malformed or empty cells become NaN.
pub fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(coerce_number(raw.as_deref()))
}

/// Default for numeric fields whose column is missing altogether.
pub fn nan() -> f64 {
    f64::NAN
}

/// One CSV row as read: raw text keyed by the header, in header order. Short rows
/// leave their trailing fields absent.
#[derive(Clone, Debug, PartialEq)]
pub struct RawRow {
    headers: csv::StringRecord,
    record: csv::StringRecord,
}

impl RawRow {
    pub fn new(headers: csv::StringRecord, record: csv::StringRecord) -> Self {
        Self { headers, record }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers.iter().position(|h| h == name).and_then(|i| self.record.get(i))
    }

    /// Coerce the row into a typed record; numeric fields use the lenient helpers.
    pub fn decode<T: DeserializeOwned>(&self) -> std::result::Result<T, csv::Error> {
        self.record.deserialize(Some(&self.headers))
    }
}

/// Outcome of typed ingestion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub rows_read: usize,
    pub rows_rejected: usize,
}

fn csv_error(path: &Path, source: csv::Error) -> ChartError {
    ChartError::Csv { path: path.to_path_buf(), source }
}

/// Read typed records. Rows that do not fit `T` are skipped with a warning and
/// counted; I/O and header errors fail the whole load.
pub fn read_records<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<(Vec<T>, IngestReport)> {
    read_records_requiring(path, &[])
}

/// Like [`read_records`], but fails with `MissingColumn` when the header lacks any of `columns`.
pub fn read_records_requiring<T: DeserializeOwned>(
    path: impl AsRef<Path>,
    columns: &[&str],
) -> Result<(Vec<T>, IngestReport)> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| csv_error(path, e.into()))?;
    let out = read_records_from_requiring(file, columns).map_err(|e| match e {
        ChartError::Csv { source, .. } => csv_error(path, source),
        other => other,
    })?;
    tracing::info!(
        path = %path.display(),
        rows = out.1.rows_read,
        rejected = out.1.rows_rejected,
        "loaded dataset"
    );
    Ok(out)
}

pub fn read_records_from<T: DeserializeOwned, R: Read>(reader: R) -> Result<(Vec<T>, IngestReport)> {
    read_records_from_requiring(reader, &[])
}

pub fn read_records_from_requiring<T: DeserializeOwned, R: Read>(
    reader: R,
    columns: &[&str],
) -> Result<(Vec<T>, IngestReport)> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).flexible(true).trim(csv::Trim::Headers).from_reader(reader);
    // Surface header problems up front instead of once per row.
    let headers = rdr.headers().map_err(|e| csv_error(Path::new("<reader>"), e))?.clone();
    require_columns(&headers, columns)?;

    let mut report = IngestReport::default();
    let mut out = Vec::new();
    for (i, rec) in rdr.records().enumerate() {
        report.rows_read += 1;
        let decoded = rec.and_then(|record| RawRow::new(headers.clone(), record).decode::<T>());
        match decoded {
            Ok(r) => out.push(r),
            Err(err) if err.is_io_error() => return Err(csv_error(Path::new("<reader>"), err)),
            Err(err) => {
                report.rows_rejected += 1;
                tracing::warn!(row = i + 1, %err, "rejecting row that does not match the record shape");
            }
        }
    }
    Ok((out, report))
}

fn require_columns(headers: &csv::StringRecord, columns: &[&str]) -> Result<()> {
    match columns.iter().find(|c| !headers.iter().any(|h| h == **c)) {
        Some(missing) => Err(ChartError::MissingColumn((*missing).to_string())),
        None => Ok(()),
    }
}

/// What to do when a page's dataset cannot be loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadPolicy {
    /// Propagate the error to the caller.
    Strict,
    /// Log the error and render nothing.
    Lenient,
}

impl LoadPolicy {
    /// Strict in debug builds, lenient in release builds.
    pub fn for_build() -> Self {
        if cfg!(debug_assertions) { LoadPolicy::Strict } else { LoadPolicy::Lenient }
    }

    /// Apply the policy to a load result. `Ok(None)` means "stop quietly".
    pub fn resolve<T>(self, what: &str, result: Result<T>) -> Result<Option<T>> {
        match (self, result) {
            (_, Ok(v)) => Ok(Some(v)),
            (LoadPolicy::Strict, Err(e)) => Err(e),
            (LoadPolicy::Lenient, Err(e)) => {
                tracing::error!(dataset = what, error = %e, "failed to load dataset; skipping render");
                Ok(None)
            }
        }
    }
}
