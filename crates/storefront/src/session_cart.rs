//! Bridges the cart store to the shopper's session.
//!
//! The cart's persistence medium for a browser is its tower-session: a
//! cookie-scoped key-value store that survives page reloads, which is the
//! server-side analogue of the localStorage the original client persisted
//! to. The [`CartStorage`] trait is synchronous while sessions are async,
//! so [`SessionMedium`] pre-fetches the snapshot when opened and buffers
//! the store's write until the handler flushes it back.
//!
//! Every request that touches the cart follows the same lifecycle the
//! store defines: construct over the medium, hydrate, mutate, flush.

use titan_cart::{CART_STORAGE_KEY, CartStorage, CartStore, StorageError};
use tower_sessions::Session;

use crate::error::AppError;

/// A single-slot persistence medium scoped to the fixed cart key,
/// backed by a snapshot pre-fetched from the session.
#[derive(Debug, Default)]
pub struct SessionMedium {
    snapshot: Option<Vec<u8>>,
    pending: Option<Vec<u8>>,
}

impl SessionMedium {
    /// Read the current cart snapshot out of the session.
    ///
    /// An unreadable session is treated like a missing snapshot - the
    /// shopper gets an empty cart, never an error page.
    pub async fn from_session(session: &Session) -> Self {
        let snapshot = match session.get::<String>(CART_STORAGE_KEY).await {
            Ok(value) => value.map(String::into_bytes),
            Err(e) => {
                tracing::warn!("failed to read cart snapshot from session: {e}");
                None
            }
        };

        Self {
            snapshot,
            pending: None,
        }
    }

    /// Write the buffered snapshot back to the session, if the store
    /// wrote one.
    ///
    /// # Errors
    ///
    /// Returns the session error if the write fails; unlike a lost
    /// localStorage write, a failed session write means the response
    /// cookie state is broken, so the request should fail.
    pub async fn flush(self, session: &Session) -> Result<(), tower_sessions::session::Error> {
        if let Some(bytes) = self.pending {
            let text = String::from_utf8_lossy(&bytes).into_owned();
            session.insert(CART_STORAGE_KEY, text).await?;
        }
        Ok(())
    }
}

impl CartStorage for SessionMedium {
    fn load(&self, _key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        // Latest write wins over the pre-fetched snapshot.
        Ok(self.pending.clone().or_else(|| self.snapshot.clone()))
    }

    fn store(&mut self, _key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        self.pending = Some(bytes.to_vec());
        Ok(())
    }
}

/// Open and hydrate the shopper's cart for this request.
pub async fn open_cart(session: &Session) -> CartStore<SessionMedium> {
    let medium = SessionMedium::from_session(session).await;
    let mut store = CartStore::new(medium);
    store.subscribe(|lines| {
        tracing::debug!(lines = lines.len(), "cart changed");
    });
    store.hydrate();
    store
}

/// Flush the cart's persisted snapshot back to the session.
///
/// # Errors
///
/// Returns [`AppError::Session`] if the session write fails.
pub async fn commit_cart(
    store: CartStore<SessionMedium>,
    session: &Session,
) -> Result<(), AppError> {
    store.into_storage().flush(session).await?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use titan_cart::snapshot;

    use super::*;

    #[test]
    fn test_medium_load_prefers_pending_write() {
        let mut medium = SessionMedium {
            snapshot: Some(b"[]".to_vec()),
            pending: None,
        };
        assert_eq!(medium.load(CART_STORAGE_KEY).unwrap(), Some(b"[]".to_vec()));

        medium.store(CART_STORAGE_KEY, b"[1]").unwrap();
        assert_eq!(
            medium.load(CART_STORAGE_KEY).unwrap(),
            Some(b"[1]".to_vec())
        );
    }

    #[test]
    fn test_store_hydrates_from_session_snapshot() {
        let raw = br#"[{"id":"p1","image":"/x.jpg","title":"P1","price":100,"quantity":2}]"#;
        let medium = SessionMedium {
            snapshot: Some(raw.to_vec()),
            pending: None,
        };

        let mut store = CartStore::new(medium);
        store.hydrate();

        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items().first().unwrap().quantity, 2);
    }

    #[test]
    fn test_mutation_buffers_pending_snapshot() {
        let mut store = CartStore::new(SessionMedium::default());
        store.hydrate();
        store.add_to_cart(&titan_cart::Product {
            id: titan_core::ProductId::new("p1"),
            image: "/x.jpg".to_string(),
            title: "P1".to_string(),
            price: titan_core::Price::from_dollars(100),
        });

        let medium = store.into_storage();
        let pending = medium.pending.unwrap();
        assert_eq!(snapshot::decode(&pending).unwrap().len(), 1);
    }
}
