//! CSV month-data adapter.
//!
//! Reads one `{month}.csv` per month from a base directory, columns
//! `product,tp,lt` with a header row. Blank cells become missing values and
//! are left for row validation to deal with; a month without a file simply
//! has no rows yet.

use crate::domain::error::CashprodError;
use crate::domain::product::RawProductRow;
use crate::ports::data_port::DataPort;
use std::fs;
use std::path::PathBuf;

pub struct CsvDataAdapter {
    base_path: PathBuf,
}

impl CsvDataAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, month: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", month))
    }
}

fn cell(record: &csv::StringRecord, index: usize) -> Option<&str> {
    record
        .get(index)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn numeric_cell(
    record: &csv::StringRecord,
    index: usize,
    column: &str,
    path: &std::path::Path,
) -> Result<Option<f64>, CashprodError> {
    match cell(record, index) {
        None => Ok(None),
        Some(value) => value
            .parse::<f64>()
            .map(Some)
            .map_err(|e| CashprodError::Data {
                reason: format!(
                    "invalid {} value {:?} in {}: {}",
                    column,
                    value,
                    path.display(),
                    e
                ),
            }),
    }
}

impl DataPort for CsvDataAdapter {
    fn fetch_rows(&self, month: &str) -> Result<Vec<RawProductRow>, CashprodError> {
        let path = self.csv_path(month);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path).map_err(|e| CashprodError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut rows = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| CashprodError::Data {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;

            rows.push(RawProductRow {
                name: cell(&record, 0).map(str::to_string),
                tp: numeric_cell(&record, 1, "tp", &path)?,
                lt: numeric_cell(&record, 2, "lt", &path)?,
            });
        }

        Ok(rows)
    }

    fn list_months(&self) -> Result<Vec<String>, CashprodError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| CashprodError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut months = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| CashprodError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if let Some(month) = name_str.strip_suffix(".csv") {
                months.push(month.to_string());
            }
        }

        months.sort();
        Ok(months)
    }
}
