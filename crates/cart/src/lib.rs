//! Titan Cart - the storefront's cart store.
//!
//! An in-memory, locally-persisted mapping from product identifier to cart
//! line item, exposing add/remove/update/clear operations and notifying
//! dependent views on every change. This is the one piece of state the
//! storefront owns: there is no backend cart, no order persistence, and no
//! payment processing behind it.
//!
//! # Lifecycle
//!
//! A [`CartStore`] starts `Uninitialized`, hydrates exactly once from its
//! [`CartStorage`] medium (`Uninitialized → Hydrating → Ready`), and only
//! persists mutations once `Ready`. Reads before `Ready` present an empty
//! cart; mutations before `Ready` are discarded. This mirrors the
//! "present as empty until hydration completes" rule the rendering layer
//! depends on to avoid flashing mismatched state.
//!
//! # Persistence
//!
//! The entire cart serializes as a JSON array of line records under the
//! fixed key [`CART_STORAGE_KEY`]. Every successful `Ready`-phase mutation
//! triggers exactly one write to the medium and one observer notification.
//! The single recognized failure is a corrupt snapshot at hydration time,
//! which is logged and treated as "no prior cart" - it is never surfaced
//! to the shopper.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod line;
pub mod snapshot;
pub mod storage;
pub mod store;

pub use error::{SnapshotError, StorageError};
pub use line::{CartLine, CartTotals, Product, default_tax_rate};
pub use snapshot::CART_STORAGE_KEY;
pub use storage::{CartStorage, MemoryStorage};
pub use store::{CartStore, StorePhase};
