//! Monthly aggregation.

use crate::domain::month::{MonthInput, MonthSummary};
use crate::domain::validation::partition_rows;

/// Σ(tp²/lt) / Σ(tp) over the month's valid rows, 0 when Σ(tp) is not
/// positive, plus the month's net cash change.
pub fn summarize_month(input: &MonthInput) -> MonthSummary {
    let partition = partition_rows(&input.rows);

    let total_tp: f64 = partition.rows.iter().map(|r| r.tp).sum();
    let sum_weighted: f64 = partition
        .rows
        .iter()
        .map(|r| r.weighted_productivity())
        .sum();

    let weighted_tp_over_lt = if total_tp > 0.0 {
        sum_weighted / total_tp
    } else {
        0.0
    };

    MonthSummary {
        month: input.month.clone(),
        weighted_tp_over_lt,
        cash_delta: input.cash_end - input.cash_start,
    }
}

/// One summary per input, preserving selection order.
pub fn aggregate(inputs: &[MonthInput]) -> Vec<MonthSummary> {
    inputs.iter().map(summarize_month).collect()
}
