use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Serialize;

use crate::{
    server::error::{require_text, ApiError},
    AppState,
};

use super::{AnalysisRequest, AnalysisStatus};

const ENABLE_LOGS: bool = true;

use crate::log_info;

#[derive(Debug, Clone, Serialize)]
pub struct TaskQueued {
    pub status: &'static str,
    pub task_id: String,
}

/// POST /api/analysis/request
pub async fn request_analysis(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<TaskQueued>, ApiError> {
    let Json(request) = payload?;
    require_text("target_name", &request.target_name)?;

    let task = state.tasks.enqueue(request);
    log_info!(
        "Queued {} analysis {} for target {}",
        task.kind.as_str(),
        task.task_id,
        task.target_name
    );

    Ok(Json(TaskQueued {
        status: "queued",
        task_id: task.task_id,
    }))
}

/// GET /api/analysis/result/:task_id
pub async fn analysis_result(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Json<AnalysisStatus> {
    Json(state.results.lookup(&task_id))
}
