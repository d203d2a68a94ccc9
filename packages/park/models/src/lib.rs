#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Park code allow-list and the canonical park record.
//!
//! This crate defines the fixed set of managed park codes and the record
//! shape shared across the entire park registry. All inbound data is
//! normalized into [`ParkRecord`] via the coercion step in [`coerce`]
//! before it reaches storage.

pub mod coerce;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// The fixed set of managed park codes.
///
/// These six codes are the registry's sole tenancy key. They are accepted
/// case-insensitively on input and always stored and serialized upper-case.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum ParkCode {
    /// Shafer Estates (Minnesota).
    Mnshaf,
    /// Minnesota.
    Mnrfc,
    /// Minnesota.
    Mnwat,
    /// Missouri.
    Mogv,
    /// Missouri.
    Moash,
    /// Michigan.
    Misol,
}

impl ParkCode {
    /// Returns all park codes in declaration order.
    #[must_use]
    pub const fn all() -> [Self; 6] {
        [
            Self::Mnshaf,
            Self::Mnrfc,
            Self::Mnwat,
            Self::Mogv,
            Self::Moash,
            Self::Misol,
        ]
    }

    /// Parses a candidate code string against the allow-list.
    ///
    /// Input is upper-cased first, so `"mnshaf"` and `"MNSHAF"` are
    /// equivalent.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidParkCodeError`] if the candidate is not one of the
    /// six fixed codes.
    pub fn from_code(candidate: &str) -> Result<Self, InvalidParkCodeError> {
        candidate
            .to_uppercase()
            .parse()
            .map_err(|_| InvalidParkCodeError {
                code: candidate.to_string(),
            })
    }
}

/// Error returned when a candidate string is not a member of the fixed
/// park code set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidParkCodeError {
    /// The rejected candidate, as received.
    pub code: String,
}

impl std::fmt::Display for InvalidParkCodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid park code: {:?}", self.code)
    }
}

impl std::error::Error for InvalidParkCodeError {}

/// The canonical record for one park.
///
/// Every non-key field is optional and omitted from JSON when absent, so a
/// placeholder record (a code that has never been written) serializes as
/// `{"park_code": "..."}` alone. A record produced by coercion always
/// carries every numeric and flag field.
///
/// Flag fields hold exactly 0 or 1. `emergency_contact` is part of the
/// canonical shape even though only one of the original storage schemas
/// carried it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkRecord {
    /// Primary key.
    pub park_code: ParkCode,
    /// Display name of the park.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub park_name: Option<String>,
    /// Street address of the park.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub park_address: Option<String>,
    /// Monthly lot rent in dollars.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lot_rent: Option<f64>,
    /// 1 if water is included in lot rent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_included: Option<u8>,
    /// 1 if trash service is included in lot rent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trash_included: Option<u8>,
    /// 1 if sewer is included in lot rent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sewer_included: Option<u8>,
    /// 1 if electric is included in lot rent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electric_included: Option<u8>,
    /// On-site manager name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_name: Option<String>,
    /// On-site manager phone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_phone: Option<String>,
    /// On-site manager mailing address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_address: Option<String>,
    /// Community contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community_email: Option<String>,
    /// Office hours, free-form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub office_hours: Option<String>,
    /// Emergency contact, free-form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    /// Total lot count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lots: Option<f64>,
    /// Currently vacant lots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vacant_lots: Option<f64>,
    /// Homes currently listed for sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homes_for_sale: Option<f64>,
    /// Vacant homes on lots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vacant_homes: Option<f64>,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Server-assigned timestamp of the last accepted write. Never trusted
    /// from client input; `None` only in placeholder records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl ParkRecord {
    /// Creates the placeholder record returned for a code that has never
    /// been written: every field absent except the code itself.
    #[must_use]
    pub const fn placeholder(park_code: ParkCode) -> Self {
        Self {
            park_code,
            park_name: None,
            park_address: None,
            lot_rent: None,
            water_included: None,
            trash_included: None,
            sewer_included: None,
            electric_included: None,
            manager_name: None,
            manager_phone: None,
            manager_address: None,
            community_email: None,
            office_hours: None,
            emergency_contact: None,
            lots: None,
            vacant_lots: None,
            homes_for_sale: None,
            vacant_homes: None,
            notes: None,
            last_updated: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_codes_case_insensitively() {
        for code in ParkCode::all() {
            let upper = code.to_string();
            let lower = upper.to_lowercase();
            assert_eq!(ParkCode::from_code(&upper).unwrap(), code);
            assert_eq!(ParkCode::from_code(&lower).unwrap(), code);
        }
    }

    #[test]
    fn displays_codes_upper_case() {
        assert_eq!(ParkCode::Mnshaf.to_string(), "MNSHAF");
        assert_eq!(ParkCode::Misol.as_ref(), "MISOL");
    }

    #[test]
    fn rejects_unknown_codes() {
        for candidate in ["", "MN", "MNSHAFX", "TXAUS", "mnsha"] {
            let err = ParkCode::from_code(candidate).unwrap_err();
            assert_eq!(err.code, candidate);
        }
    }

    #[test]
    fn serializes_code_as_upper_case_string() {
        let json = serde_json::to_string(&ParkCode::Mogv).unwrap();
        assert_eq!(json, "\"MOGV\"");
        let back: ParkCode = serde_json::from_str("\"MOGV\"").unwrap();
        assert_eq!(back, ParkCode::Mogv);
    }

    #[test]
    fn placeholder_serializes_only_the_code() {
        let record = ParkRecord::placeholder(ParkCode::Mnwat);
        let value = serde_json::to_value(&record).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(obj["park_code"], "MNWAT");
    }

    #[test]
    fn record_round_trips_through_json() {
        let mut record = ParkRecord::placeholder(ParkCode::Moash);
        record.park_name = Some("Ashland Meadows".to_string());
        record.lot_rent = Some(425.0);
        record.water_included = Some(1);
        record.trash_included = Some(0);

        let json = serde_json::to_string(&record).unwrap();
        let back: ParkRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
