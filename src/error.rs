//! Error Taxonomy
//!
//! Nothing here is fatal to the session: validation/decode errors abort a
//! single pending operation, storage errors degrade persistence while the
//! in-memory state stays usable.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    /// Required create/update fields missing; surfaced as a blocking message
    #[error("validation failed: {0}")]
    Validation(String),

    /// Operation referenced a nonexistent item id
    #[error("no item with id {0}")]
    NotFound(String),

    /// Serialized snapshot does not fit the storage quota even after
    /// stripping every image
    #[error("storage quota exceeded")]
    StorageQuota,

    /// Selected file is not a usable image
    #[error("could not read image: {0}")]
    Decode(String),

    /// Backing store unavailable or failed for a non-quota reason
    #[error("storage unavailable: {0}")]
    Storage(String),
}
