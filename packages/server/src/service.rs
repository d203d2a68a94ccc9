//! Request-facing orchestration: validation, coercion, and store access.
//!
//! Handlers stay thin; everything with an invariant lives here so it can
//! be exercised against the in-memory store backend.

use chrono::Utc;
use park_registry_database::{DbError, ParkStore};
use park_registry_park_models::coerce::{self, BodyError};
use park_registry_park_models::{InvalidParkCodeError, ParkCode, ParkRecord};
use thiserror::Error;

/// Errors surfaced to the HTTP layer.
///
/// Method-not-allowed is handled by the routing layer; everything else a
/// request can fail with is here.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The candidate code is not in the fixed allow-list.
    #[error("Invalid park code: {0}")]
    InvalidCode(#[from] InvalidParkCodeError),

    /// The request payload could not be parsed.
    #[error("Malformed body: {0}")]
    MalformedBody(#[from] BodyError),

    /// The backing store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] DbError),
}

/// Fetches the record for a candidate code.
///
/// A valid code always reads successfully: if nothing has been written
/// yet, the placeholder record (code only) is returned, distinguishing
/// "no data yet" from "invalid code".
///
/// # Errors
///
/// Returns [`ServiceError::InvalidCode`] for codes outside the allow-list
/// and [`ServiceError::Storage`] if the store fails.
pub async fn get_park(
    store: &dyn ParkStore,
    candidate: &str,
) -> Result<ParkRecord, ServiceError> {
    let code = ParkCode::from_code(candidate)?;

    let record = store.get(code).await?;
    Ok(record.unwrap_or_else(|| ParkRecord::placeholder(code)))
}

/// Lists every park that has been written at least once, most recently
/// updated first.
///
/// Codes with no data are skipped, not placeholder-padded. Records
/// without a timestamp sort as the earliest possible value.
///
/// # Errors
///
/// Returns [`ServiceError::Storage`] if the store fails.
pub async fn list_parks(store: &dyn ParkStore) -> Result<Vec<ParkRecord>, ServiceError> {
    let mut records = store.list().await?;
    records.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
    Ok(records)
}

/// Validates, coerces, and stores a full-record write.
///
/// The stored record is stamped with the current server time; client
/// input never sets `last_updated`. Any validation, parse, or storage
/// failure short-circuits with no partial write.
///
/// # Errors
///
/// Returns [`ServiceError::InvalidCode`], [`ServiceError::MalformedBody`],
/// or [`ServiceError::Storage`].
pub async fn save_park(
    store: &dyn ParkStore,
    candidate: &str,
    body: &[u8],
) -> Result<ParkCode, ServiceError> {
    let code = ParkCode::from_code(candidate)?;
    let raw = coerce::parse_body(body)?;

    let record = raw.coerce(code, Utc::now());
    store.put(&record).await?;

    Ok(code)
}
