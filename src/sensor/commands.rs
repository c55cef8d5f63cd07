use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::{
    db::NewReading,
    server::{
        error::{require_finite, require_text, ApiError},
        StatusReply,
    },
    AppState,
};

/// POST /api/sensor/upload
pub async fn upload_reading(
    State(state): State<AppState>,
    payload: Result<Json<NewReading>, JsonRejection>,
) -> Result<Json<StatusReply>, ApiError> {
    let Json(reading) = payload?;
    require_text("device_id", &reading.device_id)?;
    require_text("timestamp", &reading.timestamp)?;
    require_finite("ph", reading.ph)?;
    require_finite("cod", reading.cod)?;

    state.db.insert_reading(&reading).await?;
    Ok(StatusReply::new("saved"))
}
