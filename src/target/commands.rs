use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    server::error::{require_text, ApiError},
    AppState,
};

#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    pub target_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TargetChanged {
    pub status: &'static str,
    pub target: String,
}

/// POST /api/config/set_target
pub async fn set_target(
    State(state): State<AppState>,
    payload: Result<Json<TargetConfig>, JsonRejection>,
) -> Result<Json<TargetChanged>, ApiError> {
    let Json(config) = payload?;
    require_text("target_name", &config.target_name)?;

    let previous = state.target.set(config.target_name.clone());
    info!("Active target switched: {previous} -> {}", config.target_name);

    Ok(Json(TargetChanged {
        status: "success",
        target: config.target_name,
    }))
}
