//! Endpoints the ML worker talks to.
//!
//! The worker has no inbound address, so everything it needs comes back from
//! one poll of `fetch_latest`, and everything it produces goes through the
//! two submit endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    analysis::AnalysisTask,
    db::{PredictionInput, Reading},
    server::{
        error::{require_finite, require_text, ApiError},
        StatusReply,
    },
    AppState,
};

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_error, log_info, log_warn};

/// Response of `GET /api/ml/fetch_latest`: the reading's columns at top
/// level, or `"error": "no_data"` when nothing has been ingested yet.
#[derive(Debug, Clone, Serialize)]
pub struct WorkerFeed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    #[serde(flatten)]
    pub reading: Option<Reading>,
    pub current_target: String,
    pub pending_tasks: Vec<AnalysisTask>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisSubmission {
    pub task_id: String,
    #[serde(default = "default_submission_status")]
    pub status: String,
    #[serde(default)]
    pub data: Map<String, Value>,
}

fn default_submission_status() -> String {
    "completed".to_string()
}

/// GET /api/ml/fetch_latest
pub async fn fetch_latest(State(state): State<AppState>) -> Result<Json<WorkerFeed>, ApiError> {
    // Read the store before draining: if the read fails the drained tasks
    // would have nowhere to go.
    let latest = match state.db.latest_reading().await {
        Ok(latest) => latest,
        Err(err) => {
            log_error!(
                "Worker poll failed; {} task(s) stay queued",
                state.tasks.len()
            );
            return Err(err.into());
        }
    };
    let current_target = state.target.get();
    let pending_tasks = state.tasks.drain_all();

    if !pending_tasks.is_empty() {
        log_info!(
            "Dispatching {} analysis task(s) to worker",
            pending_tasks.len()
        );
    }

    let feed = WorkerFeed {
        error: latest.is_none().then_some("no_data"),
        reading: latest,
        current_target,
        pending_tasks,
    };
    Ok(Json(feed))
}

/// POST /api/ml/submit_result
pub async fn submit_result(
    State(state): State<AppState>,
    payload: Result<Json<PredictionInput>, JsonRejection>,
) -> Result<Json<StatusReply>, ApiError> {
    let Json(result) = payload?;
    require_text("target_name", &result.target_name)?;
    require_finite("predicted_value", result.predicted_value)?;
    for (name, weight) in &result.top_features {
        require_finite(&format!("top_features.{name}"), *weight)?;
    }

    let stored = state.db.insert_prediction(&result).await?;
    log_debug!(
        "Stored prediction {} for reading {} (target {})",
        stored.id,
        stored.raw_id,
        stored.target_name
    );
    Ok(StatusReply::new("saved"))
}

/// POST /api/ml/submit_analysis
pub async fn submit_analysis(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisSubmission>, JsonRejection>,
) -> Result<Json<StatusReply>, ApiError> {
    let Json(submission) = payload?;
    require_text("task_id", &submission.task_id)?;

    let replaced = state
        .results
        .submit(&submission.task_id, submission.status, submission.data);
    match replaced {
        Some(previous) => log_warn!(
            "Analysis result for task {} overwritten (previous received {})",
            submission.task_id,
            previous.received_at
        ),
        None => log_info!("Analysis result received for task {}", submission.task_id),
    }

    Ok(StatusReply::new("received"))
}
