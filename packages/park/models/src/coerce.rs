//! Coercion of loosely-typed request bodies into [`ParkRecord`]s.
//!
//! The edit form submits whatever the browser had in its inputs, so every
//! field arrives as an arbitrary JSON value. Rather than scattering
//! per-field fallbacks through the handlers, the raw body is deserialized
//! into [`RawParkInput`] and normalized in one place:
//!
//! - numeric fields take numbers as-is, parse numeric strings, and fall
//!   back to 0 on anything else (negative values pass through unchanged);
//! - flag fields collapse to 0/1 by truthiness, so `"yes"` and `"0"` are
//!   both 1 while `""` and `0` are 0;
//! - string fields pass through untouched.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::{ParkCode, ParkRecord};

/// Error rejecting an unparseable request body.
#[derive(Debug, Error)]
pub enum BodyError {
    /// The payload was not valid JSON, or did not yield a JSON object.
    #[error("malformed request body")]
    Malformed,
}

/// The editable fields of a park record, as received on the wire.
///
/// Every field is captured as a raw [`Value`] so coercion can apply the
/// same fallback rules regardless of what type the client sent. Unknown
/// keys are ignored, which also discards any client-supplied `park_code`
/// or `last_updated`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawParkInput {
    #[serde(default)]
    pub park_name: Value,
    #[serde(default)]
    pub park_address: Value,
    #[serde(default)]
    pub lot_rent: Value,
    #[serde(default)]
    pub water_included: Value,
    #[serde(default)]
    pub trash_included: Value,
    #[serde(default)]
    pub sewer_included: Value,
    #[serde(default)]
    pub electric_included: Value,
    #[serde(default)]
    pub manager_name: Value,
    #[serde(default)]
    pub manager_phone: Value,
    #[serde(default)]
    pub manager_address: Value,
    #[serde(default)]
    pub community_email: Value,
    #[serde(default)]
    pub office_hours: Value,
    #[serde(default)]
    pub emergency_contact: Value,
    #[serde(default)]
    pub lots: Value,
    #[serde(default)]
    pub vacant_lots: Value,
    #[serde(default)]
    pub homes_for_sale: Value,
    #[serde(default)]
    pub vacant_homes: Value,
    #[serde(default)]
    pub notes: Value,
}

impl RawParkInput {
    /// Normalizes the raw input into a fully-populated [`ParkRecord`] for
    /// `code`, stamped with `now` as its `last_updated`.
    ///
    /// Coercion never fails; every field has a defined fallback.
    #[must_use]
    pub fn coerce(&self, code: ParkCode, now: DateTime<Utc>) -> ParkRecord {
        ParkRecord {
            park_code: code,
            park_name: coerce_string(&self.park_name),
            park_address: coerce_string(&self.park_address),
            lot_rent: Some(coerce_number(&self.lot_rent)),
            water_included: Some(coerce_flag(&self.water_included)),
            trash_included: Some(coerce_flag(&self.trash_included)),
            sewer_included: Some(coerce_flag(&self.sewer_included)),
            electric_included: Some(coerce_flag(&self.electric_included)),
            manager_name: coerce_string(&self.manager_name),
            manager_phone: coerce_string(&self.manager_phone),
            manager_address: coerce_string(&self.manager_address),
            community_email: coerce_string(&self.community_email),
            office_hours: coerce_string(&self.office_hours),
            emergency_contact: coerce_string(&self.emergency_contact),
            lots: Some(coerce_number(&self.lots)),
            vacant_lots: Some(coerce_number(&self.vacant_lots)),
            homes_for_sale: Some(coerce_number(&self.homes_for_sale)),
            vacant_homes: Some(coerce_number(&self.vacant_homes)),
            notes: coerce_string(&self.notes),
            last_updated: Some(now),
        }
    }
}

/// Parses a request body into a [`RawParkInput`].
///
/// An empty or `null` body coerces as an empty input. A body whose JSON is
/// itself a string is parsed a second time, since some clients submit
/// double-encoded payloads.
///
/// # Errors
///
/// Returns [`BodyError::Malformed`] if the bytes are not valid JSON or the
/// JSON does not ultimately yield an object.
pub fn parse_body(bytes: &[u8]) -> Result<RawParkInput, BodyError> {
    if bytes.is_empty() {
        return Ok(RawParkInput::default());
    }

    let value: Value = serde_json::from_slice(bytes).map_err(|_| BodyError::Malformed)?;

    // Some clients submit the JSON payload double-encoded as a string.
    let value = if let Value::String(inner) = value {
        serde_json::from_str(&inner).map_err(|_| BodyError::Malformed)?
    } else {
        value
    };

    match value {
        Value::Null => Ok(RawParkInput::default()),
        object @ Value::Object(_) => {
            serde_json::from_value(object).map_err(|_| BodyError::Malformed)
        }
        _ => Err(BodyError::Malformed),
    }
}

/// Coerces a raw value to a number: numbers pass through, numeric strings
/// parse (empty string is 0), booleans map to 1/0, everything else is 0.
fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse().unwrap_or(0.0)
            }
        }
        Value::Bool(b) => f64::from(u8::from(*b)),
        _ => 0.0,
    }
}

/// Coerces a raw value to a 0/1 flag by truthiness: zero numbers, empty
/// strings, `false`, and `null` are 0; everything else (including the
/// string `"0"`) is 1.
fn coerce_flag(value: &Value) -> u8 {
    let truthy = match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v.abs() > 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    };
    u8::from(truthy)
}

/// Coerces a raw value to an optional string: strings pass through with no
/// trimming or length limits, `null` stays absent, and any other value is
/// carried as its compact JSON text.
fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn coerces_numeric_strings() {
        assert!((coerce_number(&Value::from("950.5")) - 950.5).abs() < f64::EPSILON);
        assert!((coerce_number(&Value::from(" 600 ")) - 600.0).abs() < f64::EPSILON);
    }

    #[test]
    fn defaults_non_numeric_to_zero() {
        assert!(coerce_number(&Value::from("abc")).abs() < f64::EPSILON);
        assert!(coerce_number(&Value::from("")).abs() < f64::EPSILON);
        assert!(coerce_number(&Value::Null).abs() < f64::EPSILON);
        assert!(coerce_number(&serde_json::json!([1, 2])).abs() < f64::EPSILON);
    }

    #[test]
    fn passes_negative_numbers_through() {
        assert!((coerce_number(&Value::from(-50.0)) - -50.0).abs() < f64::EPSILON);
        assert!((coerce_number(&Value::from("-50")) - -50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn coerces_booleans_to_numbers() {
        assert!((coerce_number(&Value::from(true)) - 1.0).abs() < f64::EPSILON);
        assert!(coerce_number(&Value::from(false)).abs() < f64::EPSILON);
    }

    #[test]
    fn truthy_values_flag_as_one() {
        assert_eq!(coerce_flag(&Value::from("yes")), 1);
        assert_eq!(coerce_flag(&Value::from(true)), 1);
        assert_eq!(coerce_flag(&Value::from(2)), 1);
        // Non-empty strings are truthy, even "0"
        assert_eq!(coerce_flag(&Value::from("0")), 1);
        assert_eq!(coerce_flag(&serde_json::json!([])), 1);
    }

    #[test]
    fn falsy_values_flag_as_zero() {
        assert_eq!(coerce_flag(&Value::Null), 0);
        assert_eq!(coerce_flag(&Value::from(false)), 0);
        assert_eq!(coerce_flag(&Value::from(0)), 0);
        assert_eq!(coerce_flag(&Value::from(0.0)), 0);
        assert_eq!(coerce_flag(&Value::from("")), 0);
    }

    #[test]
    fn strings_pass_through_unchanged() {
        assert_eq!(
            coerce_string(&Value::from("  123 Main St  ")),
            Some("  123 Main St  ".to_string())
        );
        assert_eq!(coerce_string(&Value::Null), None);
    }

    #[test]
    fn non_string_values_carry_as_json_text() {
        assert_eq!(coerce_string(&Value::from(42)), Some("42".to_string()));
    }

    #[test]
    fn parses_object_body() {
        let raw = parse_body(br#"{"park_name": "Shafer Estates", "lot_rent": 600}"#).unwrap();
        assert_eq!(raw.park_name, Value::from("Shafer Estates"));
        assert_eq!(raw.lot_rent, Value::from(600));
    }

    #[test]
    fn parses_double_encoded_body() {
        let raw = parse_body(br#""{\"lot_rent\": \"950.5\"}""#).unwrap();
        assert_eq!(raw.lot_rent, Value::from("950.5"));
    }

    #[test]
    fn empty_and_null_bodies_coerce_as_empty_input() {
        assert!(parse_body(b"").is_ok());
        assert!(parse_body(b"null").is_ok());
    }

    #[test]
    fn rejects_malformed_bodies() {
        assert!(parse_body(b"{not json").is_err());
        assert!(parse_body(br#""{broken""#).is_err());
        assert!(parse_body(b"[1, 2, 3]").is_err());
    }

    #[test]
    fn coercion_fills_every_numeric_and_flag_field() {
        let record = RawParkInput::default().coerce(ParkCode::Mnshaf, now());

        assert_eq!(record.park_code, ParkCode::Mnshaf);
        assert_eq!(record.lot_rent, Some(0.0));
        assert_eq!(record.water_included, Some(0));
        assert_eq!(record.trash_included, Some(0));
        assert_eq!(record.sewer_included, Some(0));
        assert_eq!(record.electric_included, Some(0));
        assert_eq!(record.lots, Some(0.0));
        assert_eq!(record.vacant_lots, Some(0.0));
        assert_eq!(record.homes_for_sale, Some(0.0));
        assert_eq!(record.vacant_homes, Some(0.0));
        assert_eq!(record.park_name, None);
        assert_eq!(record.notes, None);
        assert!(record.last_updated.is_some());
    }

    #[test]
    fn coercion_stamps_the_supplied_timestamp() {
        let stamp = now();
        let record = RawParkInput::default().coerce(ParkCode::Mogv, stamp);
        assert_eq!(record.last_updated, Some(stamp));
    }

    #[test]
    fn coerces_a_full_submission() {
        let raw = parse_body(
            br#"{
                "park_name": "Shafer Estates",
                "lot_rent": "600",
                "water_included": true,
                "trash_included": 0,
                "manager_name": "Pat Doe",
                "lots": 42,
                "notes": "gravel roads"
            }"#,
        )
        .unwrap();
        let record = raw.coerce(ParkCode::Mnshaf, now());

        assert_eq!(record.park_name, Some("Shafer Estates".to_string()));
        assert_eq!(record.lot_rent, Some(600.0));
        assert_eq!(record.water_included, Some(1));
        assert_eq!(record.trash_included, Some(0));
        assert_eq!(record.manager_name, Some("Pat Doe".to_string()));
        assert_eq!(record.lots, Some(42.0));
        assert_eq!(record.notes, Some("gravel roads".to_string()));
    }
}
