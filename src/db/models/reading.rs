//! Raw sensor reading data model.
//!
//! Readings are append-only: the store assigns `id` on insert and rows are
//! never updated afterwards. `timestamp` is whatever the device sent.

use serde::{Deserialize, Serialize};

/// A reading as stored in `raw_sensor_data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub id: i64,
    pub timestamp: String,
    pub device_id: String,
    pub ph: f64,
    pub cod: f64,
}

/// Upload body for a new reading, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReading {
    pub device_id: String,
    pub timestamp: String,
    pub ph: f64,
    pub cod: f64,
}

impl NewReading {
    pub fn into_reading(self, id: i64) -> Reading {
        Reading {
            id,
            timestamp: self.timestamp,
            device_id: self.device_id,
            ph: self.ph,
            cod: self.cod,
        }
    }
}
