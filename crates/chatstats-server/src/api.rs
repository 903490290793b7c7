use crate::{export, report, AppState};
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use chatstats_core::error::{IngestError, StatsError};
use chatstats_core::stats::{self, DateRange};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub topic_name: Option<String>,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/webhook", post(telegram_webhook))
        .route("/", get(|| async { Redirect::to("/stats") }))
        .route("/stats", get(stats_view))
        .route("/stats/export", get(export_stats))
        .with_state(state)
}

/// Webhook contract: always acknowledge, whatever happened inside.
/// Failures only show up in the logs.
async fn telegram_webhook(State(state): State<Arc<AppState>>, body: String) -> impl IntoResponse {
    match chatstats_core::ingest::store_update(&state.db, &body).await {
        Ok(row) => tracing::debug!("stored update {}", row.id),
        Err(IngestError::Malformed(e)) => {
            tracing::warn!("discarding non-JSON webhook body: {}", e)
        }
        Err(IngestError::Storage(e)) => tracing::error!("failed to save webhook update: {}", e),
    }

    Json(serde_json::json!({ "ok": true }))
}

async fn stats_view(State(state): State<Arc<AppState>>, Query(q): Query<StatsQuery>) -> Response {
    // Dates are validated before any query runs.
    let range = match DateRange::parse(q.start_date.as_deref(), q.end_date.as_deref()) {
        Ok(range) => range,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    let topics = match stats::topics(&state.db).await {
        Ok(topics) => topics,
        Err(e) => return db_error(e),
    };

    let results = match q.topic_name.as_deref() {
        Some(topic) => match stats::sender_counts(&state.db, topic, &range).await {
            Ok(rows) => Some(rows),
            Err(e) => return db_error(e),
        },
        None => None,
    };

    let page = report::StatsPage {
        topics: &topics,
        results: results.as_deref(),
        start_date: q.start_date.as_deref(),
        end_date: q.end_date.as_deref(),
        selected_topic: q.topic_name.as_deref(),
    };

    match report::render_stats(&state.templates, &page) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("failed to render stats page: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "template error".to_string()).into_response()
        }
    }
}

async fn export_stats(State(state): State<Arc<AppState>>, Query(q): Query<StatsQuery>) -> Response {
    let Some(topic) = q.topic_name.as_deref() else {
        return (StatusCode::BAD_REQUEST, "No topic selected for export").into_response();
    };

    let range = match DateRange::parse(q.start_date.as_deref(), q.end_date.as_deref()) {
        Ok(range) => range,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    let rows = match stats::sender_counts(&state.db, topic, &range).await {
        Ok(rows) => rows,
        Err(e) => return db_error(e),
    };

    let (time_info, _) = export::describe_range(q.start_date.as_deref(), q.end_date.as_deref());
    let file_name = export::file_name(topic, q.start_date.as_deref(), q.end_date.as_deref());

    let bytes = match export::build_workbook(topic, &time_info, &rows) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("failed to build spreadsheet: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "export error".to_string())
                .into_response();
        }
    };

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, export::XLSX_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

fn db_error(e: StatsError) -> Response {
    tracing::error!("stats query failed: {}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
}
