//! The storage contract shared by all backends.

use async_trait::async_trait;
use park_registry_park_models::{ParkCode, ParkRecord};

use crate::DbError;

/// Keyed storage indexed by park code.
///
/// Both original server variants were CRUD shims over the same contract;
/// this trait is the single seam they collapse into. Implementations must
/// make `put` a wholesale replace — a subsequent `get` observes the new
/// record in full, never a field-by-field merge.
#[async_trait]
pub trait ParkStore: Send + Sync {
    /// Returns the stored record for `code`, or `None` if the code has
    /// never been written.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] only if the underlying storage fails; a
    /// well-formed but absent code is `Ok(None)`.
    async fn get(&self, code: ParkCode) -> Result<Option<ParkRecord>, DbError>;

    /// Inserts or wholesale-replaces the record keyed by its park code.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the write fails; no partial write is
    /// observable.
    async fn put(&self, record: &ParkRecord) -> Result<(), DbError>;

    /// Returns all currently stored records, in unspecified order.
    ///
    /// Ordering is a service-layer concern.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the underlying storage fails.
    async fn list(&self) -> Result<Vec<ParkRecord>, DbError>;
}
