//! Key-value backend: one JSON blob per `park:{CODE}` key.
//!
//! Mirrors the hosted key-value layout the registry originally ran
//! against, using a two-column table in the same `SQLite` file so the
//! backend stays swappable with the table variant.

use async_trait::async_trait;
use moosicbox_json_utils::database::ToValue as _;
use park_registry_park_models::{ParkCode, ParkRecord};
use switchy_database::{Database, DatabaseValue};

use crate::{DbError, store::ParkStore};

/// Key prefix for park records.
const KEY_PREFIX: &str = "park:";

/// [`ParkStore`] backed by a `park_kv` key-value table.
pub struct KvParkStore {
    db: Box<dyn Database>,
}

impl KvParkStore {
    /// Wraps an open database connection, creating the `park_kv` table if
    /// it does not already exist.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if schema creation fails.
    pub async fn open(db: Box<dyn Database>) -> Result<Self, DbError> {
        db.exec_raw(
            "CREATE TABLE IF NOT EXISTS park_kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )
        .await?;

        Ok(Self { db })
    }
}

#[async_trait]
impl ParkStore for KvParkStore {
    async fn get(&self, code: ParkCode) -> Result<Option<ParkRecord>, DbError> {
        let rows = self
            .db
            .query_raw_params(
                "SELECT value FROM park_kv WHERE key = $1",
                &[DatabaseValue::String(record_key(code))],
            )
            .await?;

        rows.first()
            .map(|row| {
                let value: String = row.to_value("value").map_err(|e| DbError::Conversion {
                    message: format!("Failed to read stored value: {e}"),
                })?;
                Ok(serde_json::from_str(&value)?)
            })
            .transpose()
    }

    async fn put(&self, record: &ParkRecord) -> Result<(), DbError> {
        let value = serde_json::to_string(record)?;

        self.db
            .exec_raw_params(
                "INSERT INTO park_kv (key, value) VALUES ($1, $2)
                 ON CONFLICT (key) DO UPDATE SET value = excluded.value",
                &[
                    DatabaseValue::String(record_key(record.park_code)),
                    DatabaseValue::String(value),
                ],
            )
            .await?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<ParkRecord>, DbError> {
        let rows = self
            .db
            .query_raw_params(
                "SELECT value FROM park_kv WHERE key LIKE $1",
                &[DatabaseValue::String(format!("{KEY_PREFIX}%"))],
            )
            .await?;

        rows.iter()
            .map(|row| {
                let value: String = row.to_value("value").map_err(|e| DbError::Conversion {
                    message: format!("Failed to read stored value: {e}"),
                })?;
                Ok(serde_json::from_str(&value)?)
            })
            .collect()
    }
}

/// Builds the storage key for a park code, e.g. `park:MNSHAF`.
fn record_key(code: ParkCode) -> String {
    format!("{KEY_PREFIX}{code}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_prefixed_upper_case_codes() {
        assert_eq!(record_key(ParkCode::Mnshaf), "park:MNSHAF");
        assert_eq!(record_key(ParkCode::Misol), "park:MISOL");
    }

    #[test]
    fn stored_json_round_trips() {
        let mut record = ParkRecord::placeholder(ParkCode::Mnrfc);
        record.lot_rent = Some(950.5);
        record.sewer_included = Some(1);

        let json = serde_json::to_string(&record).unwrap();
        let back: ParkRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
