//! HTTP surface: route table, middleware and the server loop.

pub mod error;

use std::time::Instant;

use anyhow::{Context, Result};
use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use log::info;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};

use crate::{analysis, dashboard, sensor, target, worker, AppState};

/// Plain `{"status": ...}` acknowledgement.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReply {
    pub status: &'static str,
}

impl StatusReply {
    pub fn new(status: &'static str) -> Json<Self> {
        Json(Self { status })
    }
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    pending_tasks: usize,
    outcomes: usize,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/sensor/upload", post(sensor::commands::upload_reading))
        .route("/api/ml/fetch_latest", get(worker::commands::fetch_latest))
        .route("/api/ml/submit_result", post(worker::commands::submit_result))
        .route(
            "/api/ml/submit_analysis",
            post(worker::commands::submit_analysis),
        )
        .route(
            "/api/analysis/request",
            post(analysis::commands::request_analysis),
        )
        .route(
            "/api/analysis/result/:task_id",
            get(analysis::commands::analysis_result),
        )
        .route("/api/dashboard/monitor", get(dashboard::commands::monitor))
        .route("/api/config/set_target", post(target::commands::set_target))
        .with_state(state)
        .layer(middleware::from_fn(log_requests))
        .layer(cors_layer())
}

/// Serve until `shutdown` is cancelled, then drain in-flight requests.
pub async fn serve(state: AppState, bind_addr: &str, shutdown: CancellationToken) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    let local_addr = listener
        .local_addr()
        .context("failed to read bound address")?;
    info!("Listening on http://{local_addr}");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .context("HTTP server failed")?;

    info!("HTTP server stopped");
    Ok(())
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    info!(
        "{method} {path} -> {} ({}ms)",
        response.status().as_u16(),
        started.elapsed().as_millis()
    );
    response
}

async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        pending_tasks: state.tasks.len(),
        outcomes: state.results.len(),
    })
}
