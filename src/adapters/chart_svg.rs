//! SVG scatter chart of month summaries.
//!
//! x = weighted TP/LT, y = cash delta, one labeled point per month. The same
//! markup is written to disk by the CLI and inlined by the web results page.

use crate::domain::error::CashprodError;
use crate::domain::month::MonthSummary;
use crate::ports::report_port::ReportPort;
use std::fs;
use std::path::Path;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 420.0;
const PADDING: f64 = 70.0;
const TICKS: usize = 4;

pub fn scatter_chart(summaries: &[MonthSummary]) -> String {
    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {:.0} {:.0}\" \
         font-family=\"sans-serif\">\n",
        WIDTH, HEIGHT
    ));
    svg.push_str(&format!(
        "  <rect width=\"{:.0}\" height=\"{:.0}\" fill=\"white\"/>\n",
        WIDTH, HEIGHT
    ));

    if summaries.is_empty() {
        svg.push_str(&format!(
            "  <text x=\"{:.0}\" y=\"{:.0}\" text-anchor=\"middle\" fill=\"#666\">データがありません</text>\n",
            WIDTH / 2.0,
            HEIGHT / 2.0
        ));
        svg.push_str("</svg>\n");
        return svg;
    }

    let (x_min, x_max) = padded_range(summaries.iter().map(|s| s.weighted_tp_over_lt));
    let (y_min, y_max) = padded_range(summaries.iter().map(|s| s.cash_delta));

    let plot_width = WIDTH - 2.0 * PADDING;
    let plot_height = HEIGHT - 2.0 * PADDING;
    let to_x = |v: f64| PADDING + (v - x_min) / (x_max - x_min) * plot_width;
    let to_y = |v: f64| HEIGHT - PADDING - (v - y_min) / (y_max - y_min) * plot_height;

    // Grid and tick labels.
    for i in 0..=TICKS {
        let frac = i as f64 / TICKS as f64;

        let xv = x_min + frac * (x_max - x_min);
        let x = to_x(xv);
        svg.push_str(&format!(
            "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"#ddd\"/>\n",
            x,
            PADDING,
            x,
            HEIGHT - PADDING
        ));
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"11\">{:.1}</text>\n",
            x,
            HEIGHT - PADDING + 18.0,
            xv
        ));

        let yv = y_min + frac * (y_max - y_min);
        let y = to_y(yv);
        svg.push_str(&format!(
            "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"#ddd\"/>\n",
            PADDING,
            y,
            WIDTH - PADDING,
            y
        ));
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"11\">{:.1}</text>\n",
            PADDING - 8.0,
            y + 4.0,
            yv
        ));
    }

    // Axes.
    svg.push_str(&format!(
        "  <line x1=\"{p:.0}\" y1=\"{p:.0}\" x2=\"{p:.0}\" y2=\"{b:.0}\" stroke=\"black\"/>\n",
        p = PADDING,
        b = HEIGHT - PADDING
    ));
    svg.push_str(&format!(
        "  <line x1=\"{p:.0}\" y1=\"{b:.0}\" x2=\"{r:.0}\" y2=\"{b:.0}\" stroke=\"black\"/>\n",
        p = PADDING,
        b = HEIGHT - PADDING,
        r = WIDTH - PADDING
    ));

    // Points, labeled up-right of the marker like the original annotations.
    for summary in summaries {
        let x = to_x(summary.weighted_tp_over_lt);
        let y = to_y(summary.cash_delta);
        svg.push_str(&format!(
            "  <circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"4\" fill=\"steelblue\"/>\n",
            x, y
        ));
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"11\">{}</text>\n",
            x + 5.0,
            y - 5.0,
            summary.month
        ));
    }

    // Title and axis labels.
    svg.push_str(&format!(
        "  <text x=\"{:.0}\" y=\"28\" text-anchor=\"middle\" font-size=\"15\">月別：加重平均TP/LT vs 現金増減額</text>\n",
        WIDTH / 2.0
    ));
    svg.push_str(&format!(
        "  <text x=\"{:.0}\" y=\"{:.0}\" text-anchor=\"middle\" font-size=\"12\">加重平均キャッシュ生産性（万円／日）</text>\n",
        WIDTH / 2.0,
        HEIGHT - 16.0
    ));
    svg.push_str(&format!(
        "  <text x=\"20\" y=\"{:.0}\" text-anchor=\"middle\" font-size=\"12\" transform=\"rotate(-90 20 {:.0})\">現金増減額（万円）</text>\n",
        HEIGHT / 2.0,
        HEIGHT / 2.0
    ));

    svg.push_str("</svg>\n");
    svg
}

/// Min/max of the values widened by a small margin so points never sit on
/// the plot border. A degenerate range still gets a usable span.
fn padded_range(values: impl Iterator<Item = f64> + Clone) -> (f64, f64) {
    let min = values.clone().fold(f64::INFINITY, f64::min);
    let max = values.fold(f64::NEG_INFINITY, f64::max);

    let range = max - min;
    let margin = if range > 0.0 { range * 0.08 } else { 1.0 };
    (min - margin, max + margin)
}

pub struct SvgChartAdapter;

impl ReportPort for SvgChartAdapter {
    fn write(&self, summaries: &[MonthSummary], output_path: &Path) -> Result<(), CashprodError> {
        fs::write(output_path, scatter_chart(summaries))?;
        Ok(())
    }
}
