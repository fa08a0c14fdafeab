//! Summary output port trait.

use crate::domain::error::CashprodError;
use crate::domain::month::MonthSummary;
use std::path::Path;

/// Port for writing aggregated month summaries.
pub trait ReportPort {
    fn write(&self, summaries: &[MonthSummary], output_path: &Path) -> Result<(), CashprodError>;
}
