use std::sync::Arc;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use chrono::Utc;
use lib_common::analysis::AnalysisReport;
use lib_common::markets::IndexReading;
use lib_common::markets::sources::normalize_symbol;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use super::render::{PageView, render_page};
use super::state::AppState;

pub const EMPTY_SELECTION_NOTICE: &str = "Please select at least one stock to analyze.";

fn too_many_symbols(max: usize) -> String {
    format!("Please select at most {} stocks to analyze.", max)
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(dashboard))
        .route("/analyze", post(analyze_form))
        .route("/api/fear-index", get(api_fear_index))
        .route("/api/analyze", get(api_analyze))
        .route("/status", get(status))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Trims and upper-cases each symbol, dropping blanks. Duplicates are kept.
fn clean_symbols<'a>(raw: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    raw.into_iter().filter_map(|s| normalize_symbol(s).ok()).collect()
}

/// Collects the repeated `symbols` fields of an urlencoded form body.
fn form_symbols(body: &str) -> Vec<String> {
    let values: Vec<String> = url::form_urlencoded::parse(body.as_bytes())
        .filter(|(key, _)| key == "symbols")
        .map(|(_, value)| value.into_owned())
        .collect();
    clean_symbols(values.iter().map(String::as_str))
}

async fn dashboard(State(state): State<Arc<AppState>>) -> Response {
    let fear_index = state.analyzer.fear_index().await;
    render_page(&PageView {
        fear_index: &fear_index,
        options: &state.default_symbols,
        selected: &state.default_symbols,
        report: None,
        notice: None,
    })
}

async fn analyze_form(State(state): State<Arc<AppState>>, body: String) -> Response {
    let symbols = form_symbols(&body);
    tracing::info!(symbols = ?symbols, "dashboard analysis requested");

    let fear_index = state.analyzer.fear_index().await;
    if symbols.is_empty() {
        return render_page(&PageView {
            fear_index: &fear_index,
            options: &state.default_symbols,
            selected: &[],
            report: None,
            notice: Some(EMPTY_SELECTION_NOTICE),
        });
    }

    if symbols.len() > state.max_symbols {
        tracing::warn!(requested = symbols.len(), max = state.max_symbols, "dashboard analysis refused");
        let notice = too_many_symbols(state.max_symbols);
        let mut response = render_page(&PageView {
            fear_index: &fear_index,
            options: &state.default_symbols,
            selected: &[],
            report: None,
            notice: Some(notice.as_str()),
        });
        if response.status().is_success() {
            *response.status_mut() = StatusCode::BAD_REQUEST;
        }
        return response;
    }

    let report = state.analyzer.analyze(&fear_index, &symbols).await;
    render_page(&PageView {
        fear_index: &fear_index,
        options: &state.default_symbols,
        selected: &symbols,
        report: Some(&report),
        notice: None,
    })
}

async fn api_fear_index(State(state): State<Arc<AppState>>) -> Json<IndexReading> {
    Json(state.analyzer.fear_index().await)
}

#[derive(Debug, Deserialize)]
struct AnalyzeQuery {
    symbols: Option<String>,
}

async fn api_analyze(State(state): State<Arc<AppState>>, Query(query): Query<AnalyzeQuery>) -> Response {
    let symbols = match query.symbols.as_deref() {
        Some(list) => clean_symbols(list.split(',')),
        None => state.default_symbols.clone(),
    };
    tracing::info!(symbols = ?symbols, "api analysis requested");

    if symbols.len() > state.max_symbols {
        tracing::warn!(requested = symbols.len(), max = state.max_symbols, "api analysis refused");
        let error = serde_json::json!({ "error": too_many_symbols(state.max_symbols) });
        return (StatusCode::BAD_REQUEST, Json(error)).into_response();
    }

    let fear_index = state.analyzer.fear_index().await;
    Json(state.analyzer.analyze(&fear_index, &symbols).await).into_response()
}

async fn status() -> impl IntoResponse {
    Json(serde_json::json!({ "ts": Utc::now().to_rfc3339() }))
}
