//! HTTP request handlers for the web form.

use axum::{
    Form,
    extract::State,
    http::{HeaderMap, header},
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use crate::adapters::chart_svg::scatter_chart;
use crate::adapters::csv_export_adapter::{EXPORT_FILE_NAME, summary_csv_bytes};
use crate::domain::aggregate::aggregate;
use crate::domain::month::{CANDIDATE_MONTHS, MonthInput, parse_months, validate_month_label};
use crate::domain::product::RawProductRow;
use crate::domain::validation::partition_rows;

use super::templates::{FormTemplate, HiddenField, MonthOption, ResultsTemplate};
use super::{AppState, WebError, is_htmx_request};

pub async fn form_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let preselected = state
        .config
        .get_string("analysis", "months")
        .and_then(|s| parse_months(&s).ok())
        .unwrap_or_else(|| vec![CANDIDATE_MONTHS[0].into(), CANDIDATE_MONTHS[1].into()]);

    let months = CANDIDATE_MONTHS
        .iter()
        .map(|label| MonthOption {
            label: label.to_string(),
            checked: preselected.iter().any(|m| m == label),
        })
        .collect();

    let template = FormTemplate { months };

    if is_htmx_request(&headers) {
        Ok(Html(template.fragment()).into_response())
    } else {
        render_page(&template)
    }
}

pub async fn summarize(
    State(_state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, WebError> {
    let inputs = month_inputs_from_form(&pairs)?;
    if inputs.is_empty() {
        return Err(WebError::bad_request("no months selected"));
    }

    let summaries = aggregate(&inputs);

    let mut warnings = Vec::new();
    for input in &inputs {
        let partition = partition_rows(&input.rows);
        for skipped in &partition.skipped {
            warnings.push(format!(
                "{}: row {} skipped ({})",
                input.month,
                skipped.index + 1,
                skipped.reason
            ));
        }
    }

    let fields = pairs
        .iter()
        .map(|(name, value)| HiddenField {
            name: name.clone(),
            value: value.clone(),
        })
        .collect();

    let template =
        ResultsTemplate::from_parts(&summaries, warnings, scatter_chart(&summaries), fields);

    if is_htmx_request(&headers) {
        Ok(Html(template.fragment()).into_response())
    } else {
        render_page(&template)
    }
}

pub async fn export_csv(
    State(_state): State<Arc<AppState>>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, WebError> {
    let inputs = month_inputs_from_form(&pairs)?;
    let summaries = aggregate(&inputs);

    let bytes = summary_csv_bytes(&summaries).map_err(|e| WebError::internal(e.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

pub async fn not_found() -> Response {
    WebError::not_found("page not found").into_response()
}

fn render_page<T: askama::Template>(template: &T) -> Result<Response, WebError> {
    let html = template
        .render()
        .map_err(|e| WebError::internal(e.to_string()))?;
    Ok(Html(html).into_response())
}

/// Rebuild [`MonthInput`]s from the submitted field pairs. Months appear as
/// repeated `month=<label>` pairs in document order; the matching rows and
/// cash fields are keyed by label.
pub fn month_inputs_from_form(
    pairs: &[(String, String)],
) -> Result<Vec<MonthInput>, WebError> {
    let mut inputs = Vec::new();

    for (_, value) in pairs.iter().filter(|(key, _)| key == "month") {
        let label = value.trim();
        if label.is_empty() {
            continue;
        }
        validate_month_label(label).map_err(WebError::from)?;

        let rows = field(pairs, &format!("rows_{label}"))
            .map(parse_rows_text)
            .unwrap_or_default();

        inputs.push(MonthInput {
            month: label.to_string(),
            rows,
            cash_start: cash_field(pairs, "cash_start", label)?,
            cash_end: cash_field(pairs, "cash_end", label)?,
        });
    }

    Ok(inputs)
}

/// One product row per non-blank line, fields `name,tp,lt`. Blank or
/// unparseable cells become missing values and are reported by validation.
pub fn parse_rows_text(text: &str) -> Vec<RawProductRow> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let mut cells = line.splitn(3, ',');
            RawProductRow {
                name: cells
                    .next()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string),
                tp: cells.next().and_then(numeric_cell),
                lt: cells.next().and_then(numeric_cell),
            }
        })
        .collect()
}

fn numeric_cell(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    cell.parse().ok()
}

fn field<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn cash_field(
    pairs: &[(String, String)],
    name: &str,
    month: &str,
) -> Result<f64, WebError> {
    match field(pairs, &format!("{name}_{month}")).map(str::trim) {
        None | Some("") => Ok(0.0),
        Some(value) => value.parse().map_err(|_| {
            WebError::bad_request(format!("invalid {name} for {month}: {value:?}"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn parse_rows_text_reads_complete_lines() {
        let rows = parse_rows_text("A,100,10\nB,50,5\n");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name.as_deref(), Some("A"));
        assert_eq!(rows[0].tp, Some(100.0));
        assert_eq!(rows[1].lt, Some(5.0));
    }

    #[test]
    fn parse_rows_text_skips_blank_lines_and_keeps_gaps() {
        let rows = parse_rows_text("A,,10\n\n ,50,5\nB,abc,5\n");

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].tp, None);
        assert_eq!(rows[1].name, None);
        assert_eq!(rows[2].tp, None);
    }

    #[test]
    fn month_inputs_follow_selection_order() {
        let pairs = vec![
            pair("month", "2024-02"),
            pair("month", "2024-01"),
            pair("rows_2024-01", "A,100,10"),
            pair("cash_start_2024-01", "200"),
            pair("cash_end_2024-01", "180"),
        ];

        let inputs = month_inputs_from_form(&pairs).unwrap();

        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].month, "2024-02");
        assert!(inputs[0].rows.is_empty());
        assert_eq!(inputs[1].month, "2024-01");
        assert_eq!(inputs[1].rows.len(), 1);
        assert!((inputs[1].cash_start - 200.0).abs() < f64::EPSILON);
        assert!((inputs[1].cash_end - 180.0).abs() < f64::EPSILON);
    }

    #[test]
    fn blank_cash_defaults_to_zero() {
        let pairs = vec![pair("month", "2024-01"), pair("cash_start_2024-01", " ")];
        let inputs = month_inputs_from_form(&pairs).unwrap();
        assert!((inputs[0].cash_start - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn malformed_cash_is_a_bad_request() {
        let pairs = vec![pair("month", "2024-01"), pair("cash_end_2024-01", "abc")];
        let err = month_inputs_from_form(&pairs).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn malformed_month_label_is_a_bad_request() {
        let pairs = vec![pair("month", "not-a-month")];
        let err = month_inputs_from_form(&pairs).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
    }
}
