use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use crate::db::{
    connection::Database,
    helpers::{decode_json, encode_json},
    models::{PredictionInput, PredictionResult, StoredPayload},
};

impl Database {
    pub async fn insert_prediction(&self, input: &PredictionInput) -> Result<PredictionResult> {
        let record = input.clone();
        self.execute(move |conn| {
            let data_json = encode_json(&StoredPayload::from(&record), "data_json")?;
            conn.execute(
                "INSERT INTO ml_results (timestamp, raw_id, is_pollution, data_json)
                 VALUES (?1, ?2, ?3, ?4)",
                params![record.timestamp, record.raw_id, record.is_pollution, data_json],
            )
            .with_context(|| "failed to insert ML result")?;

            Ok(PredictionResult {
                id: conn.last_insert_rowid(),
                timestamp: record.timestamp,
                raw_id: record.raw_id,
                is_pollution: record.is_pollution,
                predicted_value: record.predicted_value,
                target_name: record.target_name,
                top_features: record.top_features,
            })
        })
        .await
    }

    pub async fn latest_prediction(&self) -> Result<Option<PredictionResult>> {
        self.execute(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, timestamp, raw_id, is_pollution, data_json
                     FROM ml_results
                     ORDER BY id DESC
                     LIMIT 1",
                    [],
                    |row| {
                        Ok((
                            row.get::<_, i64>(0)?,
                            row.get::<_, String>(1)?,
                            row.get::<_, i64>(2)?,
                            row.get::<_, bool>(3)?,
                            row.get::<_, String>(4)?,
                        ))
                    },
                )
                .optional()
                .with_context(|| "failed to read latest ML result")?;

            let Some((id, timestamp, raw_id, is_pollution, data_json)) = row else {
                return Ok(None);
            };
            let payload: StoredPayload = decode_json(&data_json, "data_json")?;

            Ok(Some(PredictionResult {
                id,
                timestamp,
                raw_id,
                is_pollution,
                predicted_value: payload.value,
                target_name: payload.target,
                top_features: payload.features,
            }))
        })
        .await
    }
}
