use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension, Row};

use crate::db::{
    connection::Database,
    models::{NewReading, Reading},
};

fn row_to_reading(row: &Row) -> rusqlite::Result<Reading> {
    Ok(Reading {
        id: row.get("id")?,
        timestamp: row.get("timestamp")?,
        device_id: row.get("device_id")?,
        ph: row.get("ph")?,
        cod: row.get("cod")?,
    })
}

impl Database {
    /// Append a reading and return it with its store-assigned id.
    pub async fn insert_reading(&self, reading: &NewReading) -> Result<Reading> {
        let record = reading.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO raw_sensor_data (timestamp, device_id, ph, cod)
                 VALUES (?1, ?2, ?3, ?4)",
                params![record.timestamp, record.device_id, record.ph, record.cod],
            )
            .with_context(|| "failed to insert sensor reading")?;

            Ok(record.into_reading(conn.last_insert_rowid()))
        })
        .await
    }

    /// Most recently inserted reading, or `None` on an empty table.
    pub async fn latest_reading(&self) -> Result<Option<Reading>> {
        self.execute(|conn| {
            conn.query_row(
                "SELECT id, timestamp, device_id, ph, cod
                 FROM raw_sensor_data
                 ORDER BY id DESC
                 LIMIT 1",
                [],
                row_to_reading,
            )
            .optional()
            .with_context(|| "failed to read latest sensor reading")
        })
        .await
    }

    pub async fn reading_count(&self) -> Result<u64> {
        self.execute(|conn| {
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM raw_sensor_data", [], |row| row.get(0))?;
            Ok(count.max(0) as u64)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(device_id: &str, ph: f64) -> NewReading {
        NewReading {
            device_id: device_id.into(),
            timestamp: "2025-01-01 08:00:00".into(),
            ph,
            cod: 12.5,
        }
    }

    #[tokio::test]
    async fn latest_reading_is_none_on_empty_store() {
        let db = Database::in_memory().unwrap();
        assert_eq!(db.latest_reading().await.unwrap(), None);
        assert_eq!(db.reading_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn insert_assigns_monotonic_ids() {
        let db = Database::in_memory().unwrap();
        let first = db.insert_reading(&sample("dev-1", 7.1)).await.unwrap();
        let second = db.insert_reading(&sample("dev-2", 6.8)).await.unwrap();
        assert!(second.id > first.id);
        assert_eq!(db.reading_count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn latest_reading_returns_last_insert() {
        let db = Database::in_memory().unwrap();
        db.insert_reading(&sample("dev-1", 7.1)).await.unwrap();
        let last = db.insert_reading(&sample("dev-2", 6.8)).await.unwrap();

        let latest = db.latest_reading().await.unwrap().unwrap();
        assert_eq!(latest, last);
        assert_eq!(latest.device_id, "dev-2");
        assert_eq!(latest.ph, 6.8);
    }
}
