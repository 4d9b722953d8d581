//! Wishlist store: a set of products keyed by id, in insertion order.

use dovini_core::{Product, ProductId};
use tokio::sync::watch;

use crate::storage::{Persistence, keys};
use crate::stores::PersistedState;

/// Saved-for-later products.
pub struct WishlistStore {
    products: PersistedState<Vec<Product>>,
}

impl WishlistStore {
    /// Create the store, hydrating from storage.
    #[must_use]
    pub fn new(persistence: Persistence) -> Self {
        let products: PersistedState<Vec<Product>> =
            PersistedState::hydrate(persistence, keys::WISHLIST);
        // Collapse duplicate ids written by older or foreign clients.
        products.replace(dedup_by_id(products.snapshot()));
        Self { products }
    }

    /// Add the product if absent, remove it if present.
    ///
    /// Returns whether the product is in the wishlist afterwards.
    pub fn toggle_wishlist(&self, product: &Product) -> bool {
        let mut added = false;
        self.products.update(|products| {
            let before = products.len();
            products.retain(|p| p.id != product.id);
            if products.len() == before {
                products.push(product.clone());
                added = true;
            }
            true
        });
        tracing::debug!(product_id = %product.id, added, "Toggled wishlist");
        added
    }

    /// Remove a product. Returns whether it was present.
    pub fn remove_from_wishlist(&self, product_id: ProductId) -> bool {
        self.products.update(|products| {
            let before = products.len();
            products.retain(|p| p.id != product_id);
            products.len() != before
        })
    }

    /// Remove every product.
    pub fn clear_wishlist(&self) {
        self.products.update(|products| {
            let changed = !products.is_empty();
            products.clear();
            changed
        });
    }

    #[must_use]
    pub fn is_in_wishlist(&self, product_id: ProductId) -> bool {
        self.products.borrow().iter().any(|p| p.id == product_id)
    }

    /// Number of distinct products saved.
    #[must_use]
    pub fn wishlist_count(&self) -> usize {
        self.products.borrow().len()
    }

    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.products.snapshot()
    }

    /// Receiver notified after every wishlist change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Product>> {
        self.products.subscribe()
    }

    /// Reload the wishlist from storage, discarding in-memory state.
    pub fn rehydrate(&self) {
        self.products.rehydrate();
        self.products.replace(dedup_by_id(self.products.snapshot()));
    }
}

fn dedup_by_id(products: Vec<Product>) -> Vec<Product> {
    let mut unique: Vec<Product> = Vec::with_capacity(products.len());
    for product in products {
        if !unique.iter().any(|p| p.id == product.id) {
            unique.push(product);
        }
    }
    unique
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use dovini_core::{CategoryId, Price};

    use super::*;
    use crate::storage::{MemoryStorage, StorageArea};

    fn product(id: i32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            image: format!("/img/{id}.jpg"),
            price: Price::from_units(100),
            original_price: None,
            brand: Some("Dovini".to_string()),
            rating: 5.0,
            stock: 3,
            category_id: CategoryId::new(1),
        }
    }

    fn store() -> (Arc<MemoryStorage>, WishlistStore) {
        let area = Arc::new(MemoryStorage::new());
        let store = WishlistStore::new(Persistence::new(area.clone()));
        (area, store)
    }

    #[test]
    fn test_toggle_returns_resulting_membership() {
        let (_, wishlist) = store();
        let p = product(1);

        assert!(wishlist.toggle_wishlist(&p));
        assert!(wishlist.is_in_wishlist(p.id));
        assert_eq!(wishlist.wishlist_count(), 1);

        assert!(!wishlist.toggle_wishlist(&p));
        assert!(!wishlist.is_in_wishlist(p.id));
        assert_eq!(wishlist.wishlist_count(), 0);
    }

    #[test]
    fn test_double_toggle_restores_membership() {
        let (_, wishlist) = store();
        wishlist.toggle_wishlist(&product(1));

        for id in [1, 2] {
            let p = product(id);
            let before = wishlist.is_in_wishlist(p.id);
            wishlist.toggle_wishlist(&p);
            wishlist.toggle_wishlist(&p);
            assert_eq!(wishlist.is_in_wishlist(p.id), before);
        }
    }

    #[test]
    fn test_count_tracks_distinct_products() {
        let (_, wishlist) = store();
        wishlist.toggle_wishlist(&product(1));
        wishlist.toggle_wishlist(&product(2));
        wishlist.toggle_wishlist(&product(3));
        assert_eq!(wishlist.wishlist_count(), 3);

        assert!(wishlist.remove_from_wishlist(ProductId::new(2)));
        assert!(!wishlist.remove_from_wishlist(ProductId::new(2)));
        assert_eq!(wishlist.wishlist_count(), 2);

        wishlist.clear_wishlist();
        assert_eq!(wishlist.wishlist_count(), 0);
    }

    #[test]
    fn test_hydration_drops_duplicate_ids() {
        let area = Arc::new(MemoryStorage::new());
        let json = serde_json::to_string(&vec![product(1), product(2), product(1)]).unwrap();
        area.set_item(keys::WISHLIST, &json).unwrap();

        let wishlist = WishlistStore::new(Persistence::new(area));
        let ids: Vec<i32> = wishlist.products().iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_wishlist_persists() {
        let (area, wishlist) = store();
        wishlist.toggle_wishlist(&product(7));

        let reloaded = WishlistStore::new(Persistence::new(area));
        assert!(reloaded.is_in_wishlist(ProductId::new(7)));
    }
}
