//! The serialized cart wire format.
//!
//! The entire cart persists as a JSON array of line records under a single
//! fixed key:
//!
//! ```json
//! [{"id": "meridian-chronograph", "image": "/static/images/products/meridian-chronograph.jpg",
//!   "title": "Meridian Chronograph", "price": 12400, "quantity": 2}]
//! ```
//!
//! Anything that fails to parse as that shape is a corrupt snapshot and is
//! discarded at hydration time.

use crate::error::SnapshotError;
use crate::line::CartLine;

/// Fixed key the cart snapshot is stored under in the persistence medium.
pub const CART_STORAGE_KEY: &str = "titan-cart";

/// Serialize cart lines to snapshot bytes.
///
/// # Errors
///
/// Returns [`SnapshotError::Serialize`] if the lines fail to serialize;
/// this cannot happen for lines produced by store operations.
pub fn encode(lines: &[CartLine]) -> Result<Vec<u8>, SnapshotError> {
    serde_json::to_vec(lines).map_err(SnapshotError::Serialize)
}

/// Deserialize snapshot bytes back into cart lines.
///
/// # Errors
///
/// Returns [`SnapshotError::Corrupt`] if the bytes are not a valid
/// serialized cart.
pub fn decode(bytes: &[u8]) -> Result<Vec<CartLine>, SnapshotError> {
    serde_json::from_slice(bytes).map_err(SnapshotError::Corrupt)
}
