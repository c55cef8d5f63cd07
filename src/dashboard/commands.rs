use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{db::PredictionResult, server::error::ApiError, AppState};

/// Latest prediction as shown on the monitoring dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub timestamp: String,
    pub value: f64,
    pub target: String,
    pub top_features: BTreeMap<String, f64>,
}

impl DashboardSnapshot {
    /// Shown until the worker has stored its first prediction.
    pub fn waiting() -> Self {
        Self {
            timestamp: "Waiting...".into(),
            value: 0.0,
            target: "--".into(),
            top_features: BTreeMap::new(),
        }
    }
}

impl From<PredictionResult> for DashboardSnapshot {
    fn from(result: PredictionResult) -> Self {
        Self {
            timestamp: result.timestamp,
            value: result.predicted_value,
            target: result.target_name,
            top_features: result.top_features,
        }
    }
}

/// GET /api/dashboard/monitor
pub async fn monitor(State(state): State<AppState>) -> Result<Json<DashboardSnapshot>, ApiError> {
    let snapshot = state
        .db
        .latest_prediction()
        .await?
        .map(DashboardSnapshot::from)
        .unwrap_or_else(DashboardSnapshot::waiting);
    Ok(Json(snapshot))
}
