use crate::domain::model::{LoadOutcome, NewSalaryRecord};
use crate::domain::ports::SalaryStore;
use crate::utils::error::{DashboardError, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

pub const GENDER_COLUMN: &str = "genre";
pub const SALARY_COLUMN: &str = "salaire";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    pub delimiter: u8,
    pub decimal_separator: char,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b';',
            decimal_separator: '.',
        }
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    genre: String,
    salaire: String,
}

/// One-shot importer from a delimited file into the store.
///
/// A file is parsed completely before anything is written, and the rows are
/// appended in a single store call, so a bad row leaves the store untouched.
/// Rows are appended as-is: importing the same file twice stores it twice.
pub struct CsvLoader {
    store: Arc<dyn SalaryStore>,
    options: CsvOptions,
}

impl CsvLoader {
    pub fn new(store: Arc<dyn SalaryStore>, options: CsvOptions) -> Self {
        Self { store, options }
    }

    pub fn load(&self, path: &Path) -> Result<LoadOutcome> {
        if !path.exists() {
            tracing::info!("📭 No input file at {}, skipping import", path.display());
            return Ok(LoadOutcome::Skipped);
        }

        let origin = path.display().to_string();
        let file = std::fs::File::open(path)?;
        let records = parse_records(file, &origin, self.options)?;

        let rows = self.store.append(&records)?;
        tracing::info!("✅ Imported {} salary records from {}", rows, origin);

        Ok(LoadOutcome::Imported { rows })
    }
}

/// Parses every row of `reader`, failing on the first malformed one.
pub fn parse_records<R: Read>(
    reader: R,
    origin: &str,
    options: CsvOptions,
) -> Result<Vec<NewSalaryRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| DashboardError::parse(origin, 1, e.to_string()))?
        .clone();
    for required in [GENDER_COLUMN, SALARY_COLUMN] {
        if !headers.iter().any(|h| h == required) {
            return Err(DashboardError::parse(
                origin,
                1,
                format!("missing required column '{}'", required),
            ));
        }
    }

    let mut records = Vec::new();
    for result in rdr.records() {
        let raw = result.map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or(0);
            DashboardError::parse(origin, line, e.to_string())
        })?;
        let line = raw.position().map(|p| p.line()).unwrap_or(0);

        let row: CsvRow = raw
            .deserialize(Some(&headers))
            .map_err(|e| DashboardError::parse(origin, line, e.to_string()))?;
        let salary = parse_salary(&row.salaire, options.decimal_separator)
            .ok_or_else(|| {
                DashboardError::parse(
                    origin,
                    line,
                    format!("salary '{}' is not a number", row.salaire),
                )
            })?;

        records.push(NewSalaryRecord::new(row.genre, salary));
    }

    tracing::debug!("Parsed {} rows from {}", records.len(), origin);
    Ok(records)
}

fn parse_salary(raw: &str, decimal_separator: char) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let normalized = if decimal_separator == '.' {
        trimmed.to_string()
    } else {
        if trimmed.contains('.') {
            return None;
        }
        trimmed.replace(decimal_separator, ".")
    };

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}
