//! The cart store: state container, persistence, and change notification.

use rust_decimal::Decimal;
use titan_core::ProductId;

use crate::line::{CartLine, CartTotals, Product};
use crate::snapshot::{self, CART_STORAGE_KEY};
use crate::storage::CartStorage;

/// Observer invoked with the current lines after every cart change.
type Observer = Box<dyn FnMut(&[CartLine]) + Send>;

/// Lifecycle phase of a [`CartStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorePhase {
    /// Constructed, snapshot not yet read.
    Uninitialized,
    /// Snapshot read in progress.
    Hydrating,
    /// Hydrated; mutations persist from here on.
    Ready,
}

/// The cart store.
///
/// An explicit value with a defined lifecycle - injected into consumers,
/// never a module-level singleton. Until [`hydrate`](Self::hydrate) has
/// run, the store presents as empty and discards mutations; afterwards
/// every successful mutation triggers exactly one write to the persistence
/// medium and one notification round to subscribed observers.
pub struct CartStore<S> {
    phase: StorePhase,
    lines: Vec<CartLine>,
    storage: S,
    observers: Vec<Observer>,
}

impl<S: CartStorage> CartStore<S> {
    /// Create an unhydrated store over a persistence medium.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self {
            phase: StorePhase::Uninitialized,
            lines: Vec::new(),
            storage,
            observers: Vec::new(),
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> StorePhase {
        self.phase
    }

    /// One-time load of the persisted snapshot into memory.
    ///
    /// A missing snapshot yields an empty cart. A corrupt snapshot is
    /// logged and discarded - equivalent to "no prior cart", never an
    /// error the shopper sees. Calling this on an already-`Ready` store is
    /// a no-op.
    pub fn hydrate(&mut self) {
        if self.phase == StorePhase::Ready {
            tracing::debug!("cart store already hydrated");
            return;
        }
        self.phase = StorePhase::Hydrating;

        match self.storage.load(CART_STORAGE_KEY) {
            Ok(Some(bytes)) => match snapshot::decode(&bytes) {
                Ok(lines) => self.lines = lines,
                Err(e) => {
                    tracing::warn!("discarding corrupt cart snapshot: {e}");
                    self.lines.clear();
                }
            },
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("cart storage unreadable during hydration, starting empty: {e}");
            }
        }

        self.phase = StorePhase::Ready;
        self.notify();
    }

    /// The current cart lines, in insertion order.
    ///
    /// Empty until the store is `Ready`, regardless of what the medium
    /// holds.
    #[must_use]
    pub fn items(&self) -> &[CartLine] {
        match self.phase {
            StorePhase::Ready => &self.lines,
            StorePhase::Uninitialized | StorePhase::Hydrating => &[],
        }
    }

    /// Total number of units across all lines (the cart badge count).
    #[must_use]
    pub fn quantity_total(&self) -> u32 {
        self.items().iter().map(|line| line.quantity).sum()
    }

    /// Derived order summary at the given tax rate. Recomputed on every
    /// call, never cached.
    #[must_use]
    pub fn totals(&self, tax_rate: Decimal) -> CartTotals {
        CartTotals::compute(self.items(), tax_rate)
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing line in place if the product is already in
    /// the cart, otherwise appends a new line with quantity 1. Always
    /// succeeds.
    pub fn add_to_cart(&mut self, product: &Product) {
        if !self.ready_for("add_to_cart") {
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|line| line.id == product.id) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine::from_product(product));
        }
        self.commit();
    }

    /// Remove the line for `id`. Not an error if absent.
    pub fn remove_from_cart(&mut self, id: &ProductId) {
        if !self.ready_for("remove_from_cart") {
            return;
        }

        let before = self.lines.len();
        self.lines.retain(|line| &line.id != id);
        if self.lines.len() != before {
            self.commit();
        }
    }

    /// Set the quantity of the line for `id`.
    ///
    /// Requests for a quantity below 1 are silently ignored, leaving the
    /// prior quantity unchanged - the line is NOT removed. (Reference
    /// behavior; whether decrementing to zero should remove the line
    /// instead is an open product question.) No-op if the line is absent.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: u32) {
        if !self.ready_for("update_quantity") {
            return;
        }
        if quantity < 1 {
            tracing::debug!(product = %id, "ignoring cart quantity update below 1");
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|line| &line.id == id) {
            line.quantity = quantity;
            self.commit();
        }
    }

    /// Empty the cart unconditionally. Idempotent.
    pub fn clear_cart(&mut self) {
        if !self.ready_for("clear_cart") {
            return;
        }

        self.lines.clear();
        self.commit();
    }

    /// Register an observer called with the lines after every change.
    pub fn subscribe(&mut self, observer: impl FnMut(&[CartLine]) + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Borrow the persistence medium.
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the store, returning the persistence medium.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn ready_for(&self, operation: &str) -> bool {
        if self.phase == StorePhase::Ready {
            return true;
        }
        tracing::debug!(operation, "cart mutation before hydration discarded");
        false
    }

    /// Persist the current lines and notify observers. One write per
    /// successful mutation; a write failure is logged and the in-memory
    /// cart stays authoritative.
    fn commit(&mut self) {
        match snapshot::encode(&self.lines) {
            Ok(bytes) => {
                if let Err(e) = self.storage.store(CART_STORAGE_KEY, &bytes) {
                    tracing::warn!("failed to persist cart snapshot: {e}");
                }
            }
            Err(e) => tracing::warn!("failed to serialize cart snapshot: {e}"),
        }
        self.notify();
    }

    fn notify(&mut self) {
        for observer in &mut self.observers {
            observer(&self.lines);
        }
    }
}
