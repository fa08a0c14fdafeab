//! Month labels, inputs, and summaries.
//!
//! Parses month lists from configuration and validates that each label has
//! the `YYYY-MM` shape before any data is fetched for it.

use crate::domain::error::CashprodError;
use crate::domain::product::RawProductRow;
use chrono::NaiveDate;
use std::collections::HashSet;

/// Months offered by the web form's multi-selection.
pub const CANDIDATE_MONTHS: [&str; 5] = ["2024-01", "2024-02", "2024-03", "2024-04", "2024-05"];

/// Everything entered for one selected month.
#[derive(Debug, Clone)]
pub struct MonthInput {
    pub month: String,
    pub rows: Vec<RawProductRow>,
    pub cash_start: f64,
    pub cash_end: f64,
}

/// Derived per-month result. Recomputed from scratch, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthSummary {
    pub month: String,
    pub weighted_tp_over_lt: f64,
    pub cash_delta: f64,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum MonthListError {
    #[error("empty token in month list")]
    EmptyToken,

    #[error("duplicate month: {0}")]
    DuplicateMonth(String),
}

pub fn parse_months(input: &str) -> Result<Vec<String>, MonthListError> {
    let mut months = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(MonthListError::EmptyToken);
        }
        if seen.contains(trimmed) {
            return Err(MonthListError::DuplicateMonth(trimmed.to_string()));
        }
        seen.insert(trimmed.to_string());
        months.push(trimmed.to_string());
    }

    Ok(months)
}

/// A label is valid when appending `-01` yields a parseable date and the
/// label is the canonical `YYYY-MM` rendering of it.
pub fn validate_month_label(label: &str) -> Result<(), CashprodError> {
    let date = NaiveDate::parse_from_str(&format!("{label}-01"), "%Y-%m-%d").map_err(|_| {
        CashprodError::InvalidMonth {
            label: label.to_string(),
            reason: "expected YYYY-MM".to_string(),
        }
    })?;

    if date.format("%Y-%m").to_string() != label {
        return Err(CashprodError::InvalidMonth {
            label: label.to_string(),
            reason: "expected YYYY-MM".to_string(),
        });
    }

    Ok(())
}
