use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde::Serialize;
use thiserror::Error;

/// Failures surfaced to HTTP clients.
///
/// Empty stores and unknown task ids are not errors; handlers answer those
/// with placeholder bodies. A storage fault must stay distinguishable from
/// "no data yet" so pollers do not spin forever on a dead database.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    InvalidInput { status: StatusCode, message: String },
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    detail: String,
}

impl ApiError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ApiError::InvalidInput {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput { status, .. } => *status,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidInput {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::InvalidInput { message, .. } => ErrorBody {
                error: "invalid_input",
                detail: message,
            },
            ApiError::Storage(err) => {
                error!("storage fault: {err:#}");
                ErrorBody {
                    error: "storage_unavailable",
                    detail: format!("{err:#}"),
                }
            }
        };
        (status, Json(body)).into_response()
    }
}

pub fn require_text(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::invalid_input(format!("{field} must not be empty")));
    }
    Ok(())
}

pub fn require_finite(field: &str, value: f64) -> Result<(), ApiError> {
    if !value.is_finite() {
        return Err(ApiError::invalid_input(format!("{field} must be a finite number")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;

    #[test]
    fn storage_errors_map_to_500() {
        let err = ApiError::from(anyhow!("disk I/O error"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_helpers_reject_blank_and_non_finite() {
        assert!(require_text("device_id", "  ").is_err());
        assert!(require_text("device_id", "dev-1").is_ok());
        assert!(require_finite("ph", f64::NAN).is_err());
        assert!(require_finite("ph", 7.0).is_ok());
        assert_eq!(
            require_text("target_name", "").unwrap_err().status(),
            StatusCode::BAD_REQUEST
        );
    }
}
