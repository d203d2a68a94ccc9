#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API response types for the park registry server.
//!
//! Park records themselves serialize directly from
//! [`park_registry_park_models::ParkRecord`]; the types here cover the
//! remaining envelope payloads. Field names match the wire format the
//! companion edit form expects (snake_case, as stored).

use park_registry_park_models::ParkCode;
use serde::{Deserialize, Serialize};

/// Acknowledgment returned by a successful save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavePark {
    /// The accepted (upper-cased) park code.
    pub park_code: ParkCode,
    /// Human-readable confirmation message.
    pub message: String,
}

impl SavePark {
    /// Confirmation message for an accepted write.
    pub const SAVED_MESSAGE: &str = "Park information saved successfully";

    /// Builds the standard acknowledgment for `park_code`.
    #[must_use]
    pub fn saved(park_code: ParkCode) -> Self {
        Self {
            park_code,
            message: Self::SAVED_MESSAGE.to_string(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_acknowledgment_carries_code_and_message() {
        let ack = SavePark::saved(ParkCode::Mnshaf);
        let value = serde_json::to_value(&ack).unwrap();
        assert_eq!(value["park_code"], "MNSHAF");
        assert_eq!(value["message"], "Park information saved successfully");
    }
}
