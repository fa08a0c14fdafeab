//! HTML templates using Askama.
//!
//! Each page template renders the full document; the `fragment()` methods
//! build just the swappable content for HTMX requests.

use askama::Template;

use crate::domain::month::MonthSummary;

#[derive(Template)]
#[template(path = "form.html")]
pub struct FormTemplate {
    pub months: Vec<MonthOption>,
}

pub struct MonthOption {
    pub label: String,
    pub checked: bool,
}

impl FormTemplate {
    pub fn fragment(&self) -> String {
        let mut html = String::from("<div id=\"content\">");
        html.push_str("<h1>加重平均キャッシュ生産性 vs 現金増減アプリ</h1>");
        html.push_str("<h2>1. 月ごとの製品データ入力</h2>");
        html.push_str(
            "<form hx-post=\"/summarize\" hx-target=\"#results\" action=\"/summarize\" method=\"post\">",
        );
        for month in &self.months {
            let checked = if month.checked { " checked" } else { "" };
            html.push_str("<fieldset>");
            html.push_str(&format!(
                "<legend><label><input type=\"checkbox\" name=\"month\" value=\"{label}\"{checked}> {label}</label></legend>",
                label = month.label,
            ));
            html.push_str(&format!(
                "<label>製品データ（1行につき 製品名,TP（万円）,LT（日））<br><textarea name=\"rows_{}\" rows=\"4\" cols=\"48\" placeholder=\"製品A,100,10\"></textarea></label><br>",
                month.label
            ));
            html.push_str(&format!(
                "<label>期首現金残高（万円） <input name=\"cash_start_{}\" value=\"0.0\"></label>",
                month.label
            ));
            html.push_str(&format!(
                "<label>期末現金残高（万円） <input name=\"cash_end_{}\" value=\"0.0\"></label>",
                month.label
            ));
            html.push_str("</fieldset>");
        }
        html.push_str("<button type=\"submit\">集計する</button>");
        html.push_str("</form>");
        html.push_str("<div id=\"results\"></div>");
        html.push_str("</div>");
        html
    }
}

#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsTemplate {
    pub summaries: Vec<SummaryRow>,
    pub warnings: Vec<String>,
    pub chart_svg: String,
    pub fields: Vec<HiddenField>,
}

pub struct SummaryRow {
    pub month: String,
    pub weighted: String,
    pub delta: String,
}

pub struct HiddenField {
    pub name: String,
    pub value: String,
}

impl ResultsTemplate {
    pub fn from_parts(
        summaries: &[MonthSummary],
        warnings: Vec<String>,
        chart_svg: String,
        fields: Vec<HiddenField>,
    ) -> Self {
        Self {
            summaries: summaries
                .iter()
                .map(|s| SummaryRow {
                    month: s.month.clone(),
                    weighted: format!("{:.2}", s.weighted_tp_over_lt),
                    delta: format!("{:+.1}", s.cash_delta),
                })
                .collect(),
            warnings,
            chart_svg,
            fields,
        }
    }

    pub fn fragment(&self) -> String {
        let mut html = String::from("<div id=\"results\">");

        if !self.warnings.is_empty() {
            html.push_str("<ul class=\"warnings\">");
            for warning in &self.warnings {
                html.push_str(&format!("<li>{}</li>", escape_html(warning)));
            }
            html.push_str("</ul>");
        }

        html.push_str("<h2>2. 結果グラフ：加重平均キャッシュ生産性 vs 現金増減額</h2>");
        html.push_str(&format!("<div class=\"chart\">{}</div>", self.chart_svg));

        html.push_str("<h2>3. 結果表</h2>");
        html.push_str("<table>");
        html.push_str("<tr><th>月</th><th>加重平均TP/LT</th><th>現金増減額（万円）</th></tr>");
        for row in &self.summaries {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&row.month),
                row.weighted,
                row.delta
            ));
        }
        html.push_str("</table>");

        html.push_str("<form action=\"/export.csv\" method=\"post\">");
        for field in &self.fields {
            html.push_str(&format!(
                "<input type=\"hidden\" name=\"{}\" value=\"{}\">",
                escape_html(&field.name),
                escape_html(&field.value)
            ));
        }
        html.push_str("<button type=\"submit\">CSVをダウンロード</button>");
        html.push_str("</form>");

        html.push_str("</div>");
        html
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub message: &'a str,
    pub status: u16,
}

impl<'a> ErrorTemplate<'a> {
    pub fn fragment(&self) -> String {
        format!(
            "<div id=\"error\" class=\"error\"><h1>Error {}</h1><p>{}</p></div>",
            self.status,
            escape_html(self.message)
        )
    }
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_fragment_lists_every_month() {
        let template = FormTemplate {
            months: vec![
                MonthOption {
                    label: "2024-01".into(),
                    checked: true,
                },
                MonthOption {
                    label: "2024-02".into(),
                    checked: false,
                },
            ],
        };
        let html = template.fragment();

        assert!(html.contains("value=\"2024-01\" checked"));
        assert!(html.contains("value=\"2024-02\">"));
        assert!(html.contains("rows_2024-01"));
        assert!(html.contains("cash_end_2024-02"));
    }

    #[test]
    fn results_fragment_escapes_hidden_values() {
        let template = ResultsTemplate {
            summaries: vec![],
            warnings: vec![],
            chart_svg: String::new(),
            fields: vec![HiddenField {
                name: "rows_2024-01".into(),
                value: "\"A\",100,10".into(),
            }],
        };
        let html = template.fragment();

        assert!(html.contains("&quot;A&quot;,100,10"));
        assert!(!html.contains("value=\"\"A\""));
    }

    #[test]
    fn error_fragment_contains_status_and_message() {
        let template = ErrorTemplate {
            message: "no months selected",
            status: 400,
        };
        let html = template.fragment();

        assert!(html.contains("Error 400"));
        assert!(html.contains("no months selected"));
    }
}
