//! Table backend: one `parks` row per code.
//!
//! The schema mirrors the original single-table layout: TEXT strings,
//! REAL numerics, INTEGER 0/1 flags, and an RFC 3339 TEXT `last_updated`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use moosicbox_json_utils::database::ToValue as _;
use park_registry_park_models::{ParkCode, ParkRecord};
use switchy_database::{Database, DatabaseValue};

use crate::{DbError, store::ParkStore};

/// [`ParkStore`] backed by a `parks` table.
pub struct TableParkStore {
    db: Box<dyn Database>,
}

impl TableParkStore {
    /// Wraps an open database connection, creating the `parks` table if it
    /// does not already exist.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if schema creation fails.
    pub async fn open(db: Box<dyn Database>) -> Result<Self, DbError> {
        db.exec_raw(
            "CREATE TABLE IF NOT EXISTS parks (
                park_code TEXT PRIMARY KEY,
                park_name TEXT,
                park_address TEXT,
                lot_rent REAL,
                water_included INTEGER DEFAULT 0,
                trash_included INTEGER DEFAULT 0,
                sewer_included INTEGER DEFAULT 0,
                electric_included INTEGER DEFAULT 0,
                manager_name TEXT,
                manager_phone TEXT,
                manager_address TEXT,
                community_email TEXT,
                office_hours TEXT,
                emergency_contact TEXT,
                lots REAL,
                vacant_lots REAL,
                homes_for_sale REAL,
                vacant_homes REAL,
                notes TEXT,
                last_updated TEXT
            )",
        )
        .await?;

        Ok(Self { db })
    }
}

#[async_trait]
impl ParkStore for TableParkStore {
    async fn get(&self, code: ParkCode) -> Result<Option<ParkRecord>, DbError> {
        let rows = self
            .db
            .query_raw_params(
                "SELECT * FROM parks WHERE park_code = $1",
                &[DatabaseValue::String(code.to_string())],
            )
            .await?;

        rows.first().map(row_to_record).transpose()
    }

    async fn put(&self, record: &ParkRecord) -> Result<(), DbError> {
        self.db
            .exec_raw_params(
                "INSERT INTO parks (
                    park_code, park_name, park_address, lot_rent,
                    water_included, trash_included, sewer_included, electric_included,
                    manager_name, manager_phone, manager_address,
                    community_email, office_hours, emergency_contact,
                    lots, vacant_lots, homes_for_sale, vacant_homes,
                    notes, last_updated
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                          $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
                ON CONFLICT (park_code) DO UPDATE SET
                    park_name = excluded.park_name,
                    park_address = excluded.park_address,
                    lot_rent = excluded.lot_rent,
                    water_included = excluded.water_included,
                    trash_included = excluded.trash_included,
                    sewer_included = excluded.sewer_included,
                    electric_included = excluded.electric_included,
                    manager_name = excluded.manager_name,
                    manager_phone = excluded.manager_phone,
                    manager_address = excluded.manager_address,
                    community_email = excluded.community_email,
                    office_hours = excluded.office_hours,
                    emergency_contact = excluded.emergency_contact,
                    lots = excluded.lots,
                    vacant_lots = excluded.vacant_lots,
                    homes_for_sale = excluded.homes_for_sale,
                    vacant_homes = excluded.vacant_homes,
                    notes = excluded.notes,
                    last_updated = excluded.last_updated",
                &[
                    DatabaseValue::String(record.park_code.to_string()),
                    opt_text(record.park_name.as_deref()),
                    opt_text(record.park_address.as_deref()),
                    opt_real(record.lot_rent),
                    opt_flag(record.water_included),
                    opt_flag(record.trash_included),
                    opt_flag(record.sewer_included),
                    opt_flag(record.electric_included),
                    opt_text(record.manager_name.as_deref()),
                    opt_text(record.manager_phone.as_deref()),
                    opt_text(record.manager_address.as_deref()),
                    opt_text(record.community_email.as_deref()),
                    opt_text(record.office_hours.as_deref()),
                    opt_text(record.emergency_contact.as_deref()),
                    opt_real(record.lots),
                    opt_real(record.vacant_lots),
                    opt_real(record.homes_for_sale),
                    opt_real(record.vacant_homes),
                    opt_text(record.notes.as_deref()),
                    opt_text(
                        record
                            .last_updated
                            .map(|dt| dt.to_rfc3339())
                            .as_deref(),
                    ),
                ],
            )
            .await?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<ParkRecord>, DbError> {
        let rows = self.db.query_raw_params("SELECT * FROM parks", &[]).await?;

        rows.iter().map(row_to_record).collect()
    }
}

fn opt_text(value: Option<&str>) -> DatabaseValue {
    value.map_or(DatabaseValue::Null, |s| DatabaseValue::String(s.to_string()))
}

fn opt_real(value: Option<f64>) -> DatabaseValue {
    value.map_or(DatabaseValue::Null, DatabaseValue::Real64)
}

fn opt_flag(value: Option<u8>) -> DatabaseValue {
    value.map_or(DatabaseValue::Null, |f| DatabaseValue::Int32(i32::from(f)))
}

/// Maps a `parks` row back to a [`ParkRecord`].
fn row_to_record(row: &switchy_database::Row) -> Result<ParkRecord, DbError> {
    let code: String = row.to_value("park_code").map_err(|e| DbError::Conversion {
        message: format!("Failed to read park_code: {e}"),
    })?;
    let park_code = ParkCode::from_code(&code).map_err(|e| DbError::Conversion {
        message: format!("Stored row has {e}"),
    })?;

    let last_updated: Option<String> = row.to_value("last_updated").unwrap_or(None);

    Ok(ParkRecord {
        park_code,
        park_name: row.to_value("park_name").unwrap_or(None),
        park_address: row.to_value("park_address").unwrap_or(None),
        lot_rent: row.to_value("lot_rent").unwrap_or(None),
        water_included: read_flag(row, "water_included"),
        trash_included: read_flag(row, "trash_included"),
        sewer_included: read_flag(row, "sewer_included"),
        electric_included: read_flag(row, "electric_included"),
        manager_name: row.to_value("manager_name").unwrap_or(None),
        manager_phone: row.to_value("manager_phone").unwrap_or(None),
        manager_address: row.to_value("manager_address").unwrap_or(None),
        community_email: row.to_value("community_email").unwrap_or(None),
        office_hours: row.to_value("office_hours").unwrap_or(None),
        emergency_contact: row.to_value("emergency_contact").unwrap_or(None),
        lots: row.to_value("lots").unwrap_or(None),
        vacant_lots: row.to_value("vacant_lots").unwrap_or(None),
        homes_for_sale: row.to_value("homes_for_sale").unwrap_or(None),
        vacant_homes: row.to_value("vacant_homes").unwrap_or(None),
        notes: row.to_value("notes").unwrap_or(None),
        last_updated: last_updated.and_then(|s| parse_timestamp(&s)),
    })
}

/// Reads an `INTEGER` 0/1 column, normalizing any non-zero value to 1.
fn read_flag(row: &switchy_database::Row, column: &str) -> Option<u8> {
    row.to_value::<Option<i64>>(column)
        .unwrap_or(None)
        .map(|v| u8::from(v != 0))
}

/// Parses a stored RFC 3339 timestamp; unparseable values are treated as
/// absent so they sort as the earliest possible value.
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_timestamps() {
        let dt = parse_timestamp("2024-01-15T14:30:00+00:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-01-15T14:30:00+00:00");
    }

    #[test]
    fn treats_invalid_timestamps_as_absent() {
        assert!(parse_timestamp("not-a-date").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn binds_absent_fields_as_null() {
        assert!(matches!(opt_text(None), DatabaseValue::Null));
        assert!(matches!(opt_real(None), DatabaseValue::Null));
        assert!(matches!(opt_flag(None), DatabaseValue::Null));
    }

    #[test]
    fn binds_flags_as_integers() {
        assert!(matches!(opt_flag(Some(1)), DatabaseValue::Int32(1)));
        assert!(matches!(opt_flag(Some(0)), DatabaseValue::Int32(0)));
    }
}
