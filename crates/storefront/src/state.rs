//! Application state shared across consumers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::error::StorageError;
use crate::storage::{Persistence, StorageArea};
use crate::stores::{CartStore, RecentlyViewedStore, ReviewsStore, ToastStore, WishlistStore};

/// Explicit application context holding every store.
///
/// Consumers receive this handle (or individual store references from it)
/// instead of looking stores up ambiently. It is cheaply cloneable via `Arc`;
/// every clone shares the same stores.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    persistence: Persistence,
    cart: CartStore,
    wishlist: WishlistStore,
    recently_viewed: RecentlyViewedStore,
    reviews: ReviewsStore,
    toasts: ToastStore,
}

impl AppState {
    /// Create application state over the configured storage backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage area cannot be opened.
    pub fn new(config: StorefrontConfig) -> Result<Self, StorageError> {
        let area = config.open_storage()?;
        Ok(Self::with_storage(config, area))
    }

    /// Create application state over an existing storage area.
    ///
    /// All persistent stores hydrate from `area` here, once.
    #[must_use]
    pub fn with_storage(config: StorefrontConfig, area: Arc<dyn StorageArea>) -> Self {
        let persistence = Persistence::new(area);
        let toasts = ToastStore::new(config.toast.duration, config.toast.limit);

        Self {
            inner: Arc::new(AppStateInner {
                cart: CartStore::new(persistence.clone()),
                wishlist: WishlistStore::new(persistence.clone()),
                recently_viewed: RecentlyViewedStore::new(persistence.clone()),
                reviews: ReviewsStore::new(persistence.clone()),
                toasts,
                persistence,
                config,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the persistence bridge.
    #[must_use]
    pub fn persistence(&self) -> &Persistence {
        &self.inner.persistence
    }

    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    #[must_use]
    pub fn wishlist(&self) -> &WishlistStore {
        &self.inner.wishlist
    }

    #[must_use]
    pub fn recently_viewed(&self) -> &RecentlyViewedStore {
        &self.inner.recently_viewed
    }

    #[must_use]
    pub fn reviews(&self) -> &ReviewsStore {
        &self.inner.reviews
    }

    #[must_use]
    pub fn toasts(&self) -> &ToastStore {
        &self.inner.toasts
    }

    /// Reload every persistent store from storage.
    ///
    /// Call this when the host reports that another instance sharing the
    /// same storage area has written to it.
    pub fn rehydrate(&self) {
        self.inner.cart.rehydrate();
        self.inner.wishlist.rehydrate();
        self.inner.recently_viewed.rehydrate();
        self.inner.reviews.rehydrate();
        tracing::debug!("Rehydrated all stores");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use dovini_core::{CategoryId, Price, Product, ProductId};

    use super::*;
    use crate::storage::MemoryStorage;

    fn product(id: i32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            image: format!("/img/{id}.jpg"),
            price: Price::from_units(100),
            original_price: None,
            brand: None,
            rating: 4.0,
            stock: 5,
            category_id: CategoryId::new(1),
        }
    }

    #[test]
    fn test_clones_share_stores() {
        let state = AppState::with_storage(
            StorefrontConfig::default(),
            Arc::new(MemoryStorage::new()),
        );
        let clone = state.clone();

        state.cart().add_to_cart(&product(1), 2);
        assert_eq!(clone.cart().item_count(), 2);
    }

    #[test]
    fn test_instances_over_shared_storage_sync_on_rehydrate() {
        let area: Arc<dyn StorageArea> = Arc::new(MemoryStorage::new());
        let first = AppState::with_storage(StorefrontConfig::default(), area.clone());
        let second = AppState::with_storage(StorefrontConfig::default(), area);

        first.wishlist().toggle_wishlist(&product(3));
        first.recently_viewed().add_to_recently_viewed(&product(4));
        assert!(!second.wishlist().is_in_wishlist(ProductId::new(3)));

        second.rehydrate();
        assert!(second.wishlist().is_in_wishlist(ProductId::new(3)));
        assert!(second.recently_viewed().is_recently_viewed(ProductId::new(4)));
    }

    #[test]
    fn test_toasts_use_configured_limit() {
        let mut config = StorefrontConfig::default();
        config.toast.limit = 1;
        let state = AppState::with_storage(config, Arc::new(MemoryStorage::new()));

        state.toasts().info("one");
        state.toasts().info("two");
        assert_eq!(state.toasts().active().len(), 1);
    }
}
