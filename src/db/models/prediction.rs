//! ML prediction data models.
//!
//! The worker submits a `PredictionInput`; the value, target and feature map
//! are folded into the `data_json` column as a `StoredPayload`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Body of `POST /api/ml/submit_result`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionInput {
    pub timestamp: String,
    pub raw_id: i64,
    pub is_pollution: bool,
    pub predicted_value: f64,
    pub target_name: String,
    pub top_features: BTreeMap<String, f64>,
}

/// A prediction as stored in `ml_results`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub id: i64,
    pub timestamp: String,
    pub raw_id: i64,
    pub is_pollution: bool,
    pub predicted_value: f64,
    pub target_name: String,
    pub top_features: BTreeMap<String, f64>,
}

/// Shape of the `data_json` column. Key names are shared with existing
/// databases and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPayload {
    #[serde(rename = "val")]
    pub value: f64,
    pub target: String,
    #[serde(rename = "feats")]
    pub features: BTreeMap<String, f64>,
}

impl From<&PredictionInput> for StoredPayload {
    fn from(input: &PredictionInput) -> Self {
        Self {
            value: input.predicted_value,
            target: input.target_name.clone(),
            features: input.top_features.clone(),
        }
    }
}
