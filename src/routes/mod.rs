// HTTP routes: upload + analyse, stored log summaries, view CSV downloads.

mod error;
mod http;

use axum::extract::DefaultBodyLimit;
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::log_repo::LogRepo;
use crate::projector::Projector;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) repo: Arc<LogRepo>,
    pub(crate) projector: Arc<Projector>,
    pub(crate) config: AppConfig,
}

pub fn app(repo: Arc<LogRepo>, projector: Arc<Projector>, config: AppConfig) -> Router {
    let body_limit = config.analysis.max_log_bytes;
    let state = AppState {
        repo,
        projector,
        config,
    };
    Router::new()
        .route("/", get(|| async { "gcanalyser: JVM GC log analysis" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route(
            "/api/logs",
            get(http::list_logs_handler).post(http::analyse_handler),
        ) // GET, POST /api/logs
        .route(
            "/api/logs/{id}",
            get(http::get_log_handler).delete(http::delete_log_handler),
        ) // GET, DELETE /api/logs/{id}
        .route("/api/logs/{id}/views/{view}", get(http::get_view_handler)) // GET /api/logs/{id}/views/{view}
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
