//! Recently viewed products.
//!
//! A bounded history, most recent first. Viewing a product that is already
//! in the history moves it to the front; once the history holds
//! [`MAX_RECENTLY_VIEWED`] products the oldest one is evicted.

use dovini_core::{Product, ProductId};
use tokio::sync::watch;

use crate::storage::{Persistence, keys};
use crate::stores::PersistedState;

/// Maximum number of products kept in the history.
pub const MAX_RECENTLY_VIEWED: usize = 10;

/// Default number of products returned by
/// [`RecentlyViewedStore::get_recently_viewed_products`] callers.
pub const DEFAULT_LIMIT: usize = 10;

/// Move-to-front history of viewed products.
pub struct RecentlyViewedStore {
    products: PersistedState<Vec<Product>>,
}

impl RecentlyViewedStore {
    /// Create the store, hydrating from storage.
    ///
    /// Stored entries that are not valid products (for example, missing an
    /// id) are skipped individually rather than discarding the whole list.
    #[must_use]
    pub fn new(persistence: Persistence) -> Self {
        let initial = load_history(&persistence);
        tracing::debug!(entries = initial.len(), "Hydrated recently viewed");
        Self {
            products: PersistedState::with_initial(persistence, keys::RECENTLY_VIEWED, initial),
        }
    }

    /// Record a view of `product`, moving it to the front.
    pub fn add_to_recently_viewed(&self, product: &Product) {
        self.products.update(|products| {
            products.retain(|p| p.id != product.id);
            products.insert(0, product.clone());
            products.truncate(MAX_RECENTLY_VIEWED);
            true
        });
        tracing::debug!(product_id = %product.id, "Recorded product view");
    }

    /// Forget one product. Returns whether it was present.
    pub fn remove_from_recently_viewed(&self, product_id: ProductId) -> bool {
        self.products.update(|products| {
            let before = products.len();
            products.retain(|p| p.id != product_id);
            products.len() != before
        })
    }

    /// Forget every product.
    pub fn clear_recently_viewed(&self) {
        self.products.update(|products| {
            let changed = !products.is_empty();
            products.clear();
            changed
        });
    }

    #[must_use]
    pub fn is_recently_viewed(&self, product_id: ProductId) -> bool {
        self.products.borrow().iter().any(|p| p.id == product_id)
    }

    /// The `limit` most recently viewed products, most recent first.
    #[must_use]
    pub fn get_recently_viewed_products(&self, limit: usize) -> Vec<Product> {
        self.products.borrow().iter().take(limit).cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.borrow().is_empty()
    }

    /// Receiver notified after every history change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Product>> {
        self.products.subscribe()
    }

    /// Reload the history from storage, discarding in-memory state.
    pub fn rehydrate(&self) {
        self.products.replace(load_history(self.products.persistence()));
        tracing::debug!(key = self.products.key(), "Rehydrated recently viewed");
    }
}

/// Load the stored history, keeping only well-formed, distinct products.
fn load_history(persistence: &Persistence) -> Vec<Product> {
    let Some(entries) = persistence.load::<Vec<serde_json::Value>>(keys::RECENTLY_VIEWED) else {
        return Vec::new();
    };

    let mut products: Vec<Product> = Vec::with_capacity(MAX_RECENTLY_VIEWED);
    for entry in entries {
        match serde_json::from_value::<Product>(entry) {
            Ok(product) if products.iter().all(|p| p.id != product.id) => products.push(product),
            Ok(product) => {
                tracing::debug!(product_id = %product.id, "Skipping duplicate stored view");
            }
            Err(e) => tracing::warn!(error = %e, "Skipping malformed stored view"),
        }
        if products.len() == MAX_RECENTLY_VIEWED {
            break;
        }
    }
    products
}
