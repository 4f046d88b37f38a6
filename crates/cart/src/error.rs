//! Cart error types.
//!
//! The cart subsystem has exactly one recognized failure mode: a persisted
//! snapshot that is not valid cart JSON. Everything else is a total
//! function over its inputs - invalid quantities are policy-handled as
//! no-ops, not errors.

use thiserror::Error;

/// Errors reading or writing the serialized cart snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Persisted data is not a valid serialized cart.
    #[error("corrupt cart snapshot: {0}")]
    Corrupt(#[source] serde_json::Error),

    /// The in-memory cart failed to serialize.
    #[error("failed to serialize cart snapshot: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Errors from the persistence medium itself.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The medium could not be read or written.
    #[error("cart storage unavailable: {0}")]
    Unavailable(String),
}
