//! Server-side HTML for the dashboard page.
//!
//! The page is rebuilt from scratch on every request: gauge and symbol picker
//! always, results table and call-outs only after an analysis. Markup lives in
//! `templates/`; escaping is left to askama.

use std::f64::consts::PI;

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use lib_common::analysis::{AnalysisReport, AnalysisRow};
use lib_common::markets::IndexReading;

/// Gauge bands as (from, to, color).
pub const GAUGE_BANDS: [(u8, u8, &str); 4] = [
    (0, 25, "red"),
    (25, 50, "orange"),
    (50, 75, "yellow"),
    (75, 100, "green"),
];

const GAUGE_BAR_COLOR: &str = "darkblue";
const GAUGE_CX: f64 = 150.0;
const GAUGE_CY: f64 = 150.0;
const GAUGE_RADIUS: f64 = 110.0;

/// Renders any template into a response, or a 500 if rendering fails.
pub fn render_template<T: Template>(template: &T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template render error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Template error: {}", e)).into_response()
        }
    }
}

/// Point on the gauge arc for `value` in `[0, 100]`, 0 on the left, 100 on the right.
fn arc_point(value: f64, radius: f64) -> (f64, f64) {
    let theta = PI * (1.0 - value.clamp(0.0, 100.0) / 100.0);
    (GAUGE_CX + radius * theta.cos(), GAUGE_CY - radius * theta.sin())
}

fn arc_path(from: f64, to: f64, radius: f64) -> String {
    let (x1, y1) = arc_point(from, radius);
    let (x2, y2) = arc_point(to, radius);
    format!("M {:.2} {:.2} A {:.2} {:.2} 0 0 1 {:.2} {:.2}", x1, y1, radius, radius, x2, y2)
}

pub struct GaugeBand {
    pub path: String,
    pub color: &'static str,
}

/// Semicircle gauge with the four fixed bands and a dark blue value bar.
pub struct Gauge {
    pub value: u8,
    pub bands: Vec<GaugeBand>,
    /// Arc from 0 to the value; absent at 0.
    pub bar: Option<String>,
    pub bar_color: &'static str,
}

impl Gauge {
    pub fn new(value: u8) -> Self {
        let bands = GAUGE_BANDS
            .iter()
            .map(|&(from, to, color)| GaugeBand {
                path: arc_path(f64::from(from), f64::from(to), GAUGE_RADIUS),
                color,
            })
            .collect();
        let bar = (value > 0).then(|| arc_path(0.0, f64::from(value.min(100)), GAUGE_RADIUS));
        Self {
            value,
            bands,
            bar,
            bar_color: GAUGE_BAR_COLOR,
        }
    }
}

pub struct SymbolOption<'a> {
    pub symbol: &'a str,
    pub selected: bool,
}

pub struct Callout<'a> {
    /// CSS class of the box.
    pub kind: &'static str,
    pub heading: &'static str,
    pub row: &'a AnalysisRow,
}

/// Inputs of one dashboard render.
pub struct PageView<'a> {
    pub fear_index: &'a IndexReading,
    /// Symbols offered in the multi-select.
    pub options: &'a [String],
    /// Symbols shown as selected.
    pub selected: &'a [String],
    pub report: Option<&'a AnalysisReport>,
    /// Informational message shown above the results area.
    pub notice: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage<'a> {
    pub index_warning: Option<&'a str>,
    pub gauge: Gauge,
    pub options: Vec<SymbolOption<'a>>,
    pub notice: Option<&'a str>,
    /// Report warnings other than the index one, which is shown at the top.
    pub warnings: Vec<&'a str>,
    pub rows: &'a [AnalysisRow],
    /// Bull and bear boxes, only when both were picked.
    pub callouts: Vec<Callout<'a>>,
}

impl<'a> DashboardPage<'a> {
    pub fn new(view: &PageView<'a>) -> Self {
        let index_warning = view.fear_index.fallback.as_deref();

        let mut symbols: Vec<&'a str> = view.options.iter().map(String::as_str).collect();
        // Keep symbols that were analyzed but are not in the preset list.
        for symbol in view.selected {
            if !symbols.contains(&symbol.as_str()) {
                symbols.push(symbol);
            }
        }
        let options = symbols
            .into_iter()
            .map(|symbol| SymbolOption {
                symbol,
                selected: view.selected.iter().any(|s| s == symbol),
            })
            .collect();

        let (warnings, rows, callouts) = match view.report {
            Some(report) => {
                let warnings = report
                    .warnings
                    .iter()
                    .map(String::as_str)
                    .filter(|w| Some(*w) != index_warning)
                    .collect();
                let callouts = match (&report.bull, &report.bear) {
                    (Some(bull), Some(bear)) => vec![
                        Callout {
                            kind: "success",
                            heading: "🐂 Bull of the Day",
                            row: bull,
                        },
                        Callout {
                            kind: "error",
                            heading: "🐻 Bear of the Day",
                            row: bear,
                        },
                    ],
                    _ => Vec::new(),
                };
                (warnings, report.rows.as_slice(), callouts)
            }
            None => (Vec::new(), &[][..], Vec::new()),
        };

        Self {
            index_warning,
            gauge: Gauge::new(view.fear_index.value),
            options,
            notice: view.notice,
            warnings,
            rows,
            callouts,
        }
    }
}

pub fn render_page(view: &PageView<'_>) -> Response {
    render_template(&DashboardPage::new(view))
}
