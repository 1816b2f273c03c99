// Handlers: version, analyse upload, list/get/delete logs, view CSV.

use std::time::Instant;

use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::AppState;
use super::error::ApiError;
use crate::analysis;
use crate::error::GcError;
use crate::log_repo::LogEntry;
use crate::projector::View;
use crate::stats::{self, Summary};
use crate::version::{NAME, VERSION};

#[derive(Debug, Deserialize)]
pub(super) struct UploadParams {
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ViewLink {
    id: i64,
    name: &'static str,
    url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AnalysisResponse {
    log_id: i64,
    events: usize,
    duration_ms: u64,
    summary: Summary,
    views: Vec<ViewLink>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct LogResponse {
    log: LogEntry,
    duration_ms: u64,
    summary: Summary,
    views: Vec<ViewLink>,
}

fn view_links(log_id: i64, views: impl Iterator<Item = View>) -> Vec<ViewLink> {
    views
        .map(|v| ViewLink {
            id: v.id(),
            name: v.name(),
            url: format!("/api/logs/{}/views/{}", log_id, v.name()),
        })
        .collect()
}

/// GET /version: service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// POST /api/logs: body is the raw GC log text.
pub(super) async fn analyse_handler(
    State(state): State<AppState>,
    Query(params): Query<UploadParams>,
    body: String,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let start = Instant::now();
    let analysed = analysis::analyse_str(&body)?;

    let filename = params.filename.unwrap_or_default();
    let notes = params.notes.unwrap_or_default();
    let log_id = state
        .repo
        .create_log_with_records(&filename, &notes, &analysed.records)
        .await?;

    if state.config.analysis.cache_views {
        for (view, csv) in analysis::render_all(&state.projector, &analysed.records)? {
            state.repo.save_view(log_id, view, &csv).await?;
        }
    }

    let duration_ms = start.elapsed().as_millis() as u64;
    info!(log_id, events = analysed.records.len(), duration_ms, "log uploaded");
    Ok(Json(AnalysisResponse {
        log_id,
        events: analysed.records.len(),
        duration_ms,
        summary: analysed.summary,
        views: view_links(log_id, state.projector.views()),
    }))
}

/// GET /api/logs: previous uploads, newest first.
pub(super) async fn list_logs_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LogEntry>>, ApiError> {
    Ok(Json(state.repo.list_logs().await?))
}

/// GET /api/logs/{id}: summary regenerated from the stored records.
pub(super) async fn get_log_handler(
    State(state): State<AppState>,
    Path(log_id): Path<i64>,
) -> Result<Json<LogResponse>, ApiError> {
    let start = Instant::now();
    let log = state
        .repo
        .get_log(log_id)
        .await?
        .ok_or(GcError::UnknownLog(log_id))?;
    let records = state.repo.get_records(log_id).await?;
    let summary = stats::summarize(&records)?;
    Ok(Json(LogResponse {
        log,
        duration_ms: start.elapsed().as_millis() as u64,
        summary,
        views: view_links(log_id, state.projector.views()),
    }))
}

/// GET /api/logs/{id}/views/{view}: CSV for a view name or id, cached or rendered on demand.
pub(super) async fn get_view_handler(
    State(state): State<AppState>,
    Path((log_id, view)): Path<(i64, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let view: View = view.parse()?;
    let csv = match state.repo.get_view(log_id, view).await? {
        Some(csv) => csv,
        None => {
            let records = state.repo.get_records(log_id).await?;
            let csv = analysis::render_view(&state.projector, view, &records)?;
            if state.config.analysis.cache_views {
                state.repo.save_view(log_id, view, &csv).await?;
            }
            csv
        }
    };
    Ok(([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], csv))
}

/// DELETE /api/logs/{id}
pub(super) async fn delete_log_handler(
    State(state): State<AppState>,
    Path(log_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if state.repo.delete_log(log_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(GcError::UnknownLog(log_id).into())
    }
}
