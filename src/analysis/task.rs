use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Closed set of explainability analyses the worker knows how to run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AnalysisKind {
    /// Per-sample feature explanation; params carry the sample timestamp.
    #[serde(rename = "LIME")]
    FeatureExplanation,
    /// What-if analysis over a window; params carry the date range.
    #[serde(rename = "PI")]
    ScenarioAnalysis,
}

impl AnalysisKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisKind::FeatureExplanation => "LIME",
            AnalysisKind::ScenarioAnalysis => "PI",
        }
    }
}

/// Body of `POST /api/analysis/request`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(rename = "type")]
    pub kind: AnalysisKind,
    pub target_name: String,
    #[serde(default)]
    pub params: Map<String, Value>,
}

/// A queued request with its dispatch identity. Serialized verbatim into the
/// worker feed's `pending_tasks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisTask {
    pub task_id: String,
    #[serde(rename = "type")]
    pub kind: AnalysisKind,
    pub target_name: String,
    pub params: Map<String, Value>,
    pub created_at: DateTime<Utc>,
}

impl AnalysisTask {
    pub fn new(task_id: String, request: AnalysisRequest, created_at: DateTime<Utc>) -> Self {
        Self {
            task_id,
            kind: request.kind,
            target_name: request.target_name,
            params: request.params,
            created_at,
        }
    }
}

/// What the worker reported back for a task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisOutcome {
    pub task_id: String,
    /// Status string as sent by the worker; informational only.
    pub worker_status: String,
    pub data: Map<String, Value>,
    pub received_at: DateTime<Utc>,
}

/// Answer to a result poll. Absence is the normal "not yet" state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AnalysisStatus {
    Completed { data: Map<String, Value> },
    Processing,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_parses_wire_kind_names() {
        let request: AnalysisRequest = serde_json::from_value(json!({
            "type": "PI",
            "target_name": "COD_1300",
            "params": {"start": "2025-01-01", "end": "2025-01-07"}
        }))
        .unwrap();
        assert_eq!(request.kind, AnalysisKind::ScenarioAnalysis);
        assert_eq!(request.params["start"], "2025-01-01");
    }

    #[test]
    fn request_without_params_gets_empty_map() {
        let request: AnalysisRequest =
            serde_json::from_value(json!({"type": "LIME", "target_name": "NH4_1209"})).unwrap();
        assert!(request.params.is_empty());
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let parsed = serde_json::from_value::<AnalysisRequest>(
            json!({"type": "SHAP", "target_name": "NH4_1209"}),
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn status_serializes_with_status_tag() {
        let processing = serde_json::to_value(AnalysisStatus::Processing).unwrap();
        assert_eq!(processing, json!({"status": "processing"}));

        let mut data = Map::new();
        data.insert("v".into(), json!(1));
        let completed = serde_json::to_value(AnalysisStatus::Completed { data }).unwrap();
        assert_eq!(completed, json!({"status": "completed", "data": {"v": 1}}));
    }
}
