//! CSV summary export.
//!
//! Column headers match the original download; the file is UTF-8 with a BOM
//! so spreadsheet tools pick up the encoding. Numbers are written with the
//! shortest round-trip representation, so re-parsing the file reproduces the
//! in-memory summaries.

use crate::domain::error::CashprodError;
use crate::domain::month::MonthSummary;
use crate::ports::report_port::ReportPort;
use std::fs;
use std::path::Path;

pub const EXPORT_FILE_NAME: &str = "cash_summary.csv";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const HEADERS: [&str; 3] = ["月", "加重平均TP/LT", "現金増減額（万円）"];

/// Render the summary table to CSV bytes, BOM included.
pub fn summary_csv_bytes(summaries: &[MonthSummary]) -> Result<Vec<u8>, CashprodError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    wtr.write_record(HEADERS).map_err(csv_error)?;
    for summary in summaries {
        let weighted = summary.weighted_tp_over_lt.to_string();
        let delta = summary.cash_delta.to_string();
        wtr.write_record([summary.month.as_str(), weighted.as_str(), delta.as_str()])
            .map_err(csv_error)?;
    }

    let table = wtr.into_inner().map_err(|e| CashprodError::Data {
        reason: format!("CSV write error: {}", e.error()),
    })?;

    let mut buf = Vec::with_capacity(UTF8_BOM.len() + table.len());
    buf.extend_from_slice(UTF8_BOM);
    buf.extend_from_slice(&table);
    Ok(buf)
}

fn csv_error(e: csv::Error) -> CashprodError {
    CashprodError::Data {
        reason: format!("CSV write error: {}", e),
    }
}

pub struct CsvExportAdapter;

impl ReportPort for CsvExportAdapter {
    fn write(&self, summaries: &[MonthSummary], output_path: &Path) -> Result<(), CashprodError> {
        let bytes = summary_csv_bytes(summaries)?;
        fs::write(output_path, bytes)?;
        Ok(())
    }
}
