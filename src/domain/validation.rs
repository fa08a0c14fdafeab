//! Row validation.
//!
//! Input rows arrive with optional fields. Validation turns the usable ones
//! into typed [`ProductRow`]s and records why the rest were dropped, so the
//! aggregation never sees a blank field or a non-positive lead time.

use crate::domain::product::{ProductRow, RawProductRow};

#[derive(Debug, Clone)]
pub struct RowPartition {
    pub rows: Vec<ProductRow>,
    pub skipped: Vec<SkippedRow>,
}

#[derive(Debug, Clone)]
pub struct SkippedRow {
    /// Zero-based position in the input sequence.
    pub index: usize,
    pub name: Option<String>,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SkipReason {
    #[error("missing {field}")]
    MissingField { field: &'static str },

    #[error("lead time must be positive, got {lt}")]
    NonPositiveLeadTime { lt: f64 },
}

pub fn partition_rows(raw: &[RawProductRow]) -> RowPartition {
    let mut rows = Vec::new();
    let mut skipped = Vec::new();

    for (index, row) in raw.iter().enumerate() {
        let skip = |reason| SkippedRow {
            index,
            name: row.name.clone(),
            reason,
        };

        match (row.name.as_deref(), row.tp, row.lt) {
            (None, _, _) => skipped.push(skip(SkipReason::MissingField {
                field: "product name",
            })),
            (_, None, _) => skipped.push(skip(SkipReason::MissingField {
                field: "throughput",
            })),
            (_, _, None) => skipped.push(skip(SkipReason::MissingField { field: "lead time" })),
            (_, _, Some(lt)) if lt <= 0.0 => {
                skipped.push(skip(SkipReason::NonPositiveLeadTime { lt }))
            }
            (Some(name), Some(tp), Some(lt)) => rows.push(ProductRow {
                name: name.to_string(),
                tp,
                lt,
            }),
        }
    }

    RowPartition { rows, skipped }
}
