//! Cart store.
//!
//! Line items are kept in the order products were first added. A product
//! appears on at most one line; adding it again raises that line's quantity.

use dovini_core::{Price, Product, ProductId};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::storage::{Persistence, keys};
use crate::stores::PersistedState;

/// A product in the cart with its quantity (always at least 1).
///
/// Persisted as the product's fields plus a `quantity` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price * self.quantity
    }
}

/// Shopping cart state.
pub struct CartStore {
    items: PersistedState<Vec<CartItem>>,
}

impl CartStore {
    /// Create the store, hydrating from storage.
    ///
    /// Stored lines for the same product are merged and lines with a zero
    /// quantity are dropped.
    #[must_use]
    pub fn new(persistence: Persistence) -> Self {
        let initial = load_cart(&persistence);
        tracing::debug!(lines = initial.len(), "Hydrated cart");
        Self {
            items: PersistedState::with_initial(persistence, keys::CART, initial),
        }
    }

    /// Add `quantity` units of `product`.
    ///
    /// If the product is already in the cart its quantity is increased,
    /// otherwise a new line is appended. Stock is not checked here; a
    /// quantity of zero is ignored.
    pub fn add_to_cart(&self, product: &Product, quantity: u32) {
        if quantity == 0 {
            tracing::debug!(product_id = %product.id, "Ignoring add of zero units");
            return;
        }

        self.items.update(|items| {
            if let Some(item) = items.iter_mut().find(|item| item.product.id == product.id) {
                item.quantity = item.quantity.saturating_add(quantity);
            } else {
                items.push(CartItem {
                    product: product.clone(),
                    quantity,
                });
            }
            true
        });
        tracing::debug!(product_id = %product.id, quantity, "Added to cart");
    }

    /// Set the quantity of a cart line.
    ///
    /// The requested quantity is clamped into `1..=stock` (or exactly 1 for
    /// a product with no recorded stock). Zero does not remove the line; use
    /// [`Self::remove_from_cart`] for that.
    ///
    /// Returns the quantity actually applied, or `None` if the product is
    /// not in the cart.
    pub fn update_quantity(&self, product_id: ProductId, new_quantity: u32) -> Option<u32> {
        let mut applied = None;
        self.items.update(|items| {
            let Some(item) = items.iter_mut().find(|item| item.product.id == product_id) else {
                return false;
            };
            let quantity = new_quantity.clamp(1, item.product.stock.max(1));
            applied = Some(quantity);
            if item.quantity == quantity {
                return false;
            }
            item.quantity = quantity;
            true
        });

        if let Some(quantity) = applied {
            if quantity != new_quantity {
                tracing::debug!(
                    product_id = %product_id,
                    requested = new_quantity,
                    applied = quantity,
                    "Clamped cart quantity"
                );
            }
        }
        applied
    }

    /// Remove a product's line. Returns whether a line was removed.
    pub fn remove_from_cart(&self, product_id: ProductId) -> bool {
        self.items.update(|items| {
            let before = items.len();
            items.retain(|item| item.product.id != product_id);
            items.len() != before
        })
    }

    /// Empty the cart, e.g. after checkout completes.
    pub fn clear_cart(&self) {
        self.items.update(|items| {
            let changed = !items.is_empty();
            items.clear();
            changed
        });
    }

    /// Sum of price times quantity over all lines.
    #[must_use]
    pub fn get_total(&self) -> Price {
        self.items.borrow().iter().map(CartItem::line_total).sum()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .borrow()
            .iter()
            .fold(0, |count, item| count.saturating_add(item.quantity))
    }

    /// Quantity of a product in the cart, if present.
    #[must_use]
    pub fn quantity_of(&self, product_id: ProductId) -> Option<u32> {
        self.items
            .borrow()
            .iter()
            .find(|item| item.product.id == product_id)
            .map(|item| item.quantity)
    }

    /// Whether a product is in the cart.
    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.quantity_of(product_id).is_some()
    }

    /// Current cart lines.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.items.snapshot()
    }

    /// Receiver notified after every cart change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartItem>> {
        self.items.subscribe()
    }

    /// Reload the cart from storage, discarding in-memory state.
    pub fn rehydrate(&self) {
        self.items.replace(load_cart(self.items.persistence()));
        tracing::debug!(key = self.items.key(), "Rehydrated cart");
    }
}

/// Load the stored cart with one line per product and no empty lines.
fn load_cart(persistence: &Persistence) -> Vec<CartItem> {
    let stored: Vec<CartItem> = persistence.load(keys::CART).unwrap_or_default();

    let mut items: Vec<CartItem> = Vec::with_capacity(stored.len());
    for item in stored {
        if item.quantity == 0 {
            tracing::debug!(product_id = %item.product.id, "Skipping empty stored cart line");
            continue;
        }
        if let Some(line) = items.iter_mut().find(|line| line.product.id == item.product.id) {
            line.quantity = line.quantity.saturating_add(item.quantity);
        } else {
            items.push(item);
        }
    }
    items
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use dovini_core::CategoryId;

    use super::*;
    use crate::storage::{MemoryStorage, StorageArea};

    fn product(id: i32, price: i64, stock: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            image: format!("/img/{id}.jpg"),
            price: Price::from_units(price),
            original_price: None,
            brand: None,
            rating: 4.0,
            stock,
            category_id: CategoryId::new(1),
        }
    }

    fn store() -> (Arc<MemoryStorage>, CartStore) {
        let area = Arc::new(MemoryStorage::new());
        let store = CartStore::new(Persistence::new(area.clone()));
        (area, store)
    }

    #[test]
    fn test_repeated_add_merges_into_one_line() {
        let (_, cart) = store();
        let p = product(1, 1000, 10);

        cart.add_to_cart(&p, 1);
        cart.add_to_cart(&p, 2);

        let items = cart.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product.id, ProductId::new(1));
        assert_eq!(items[0].quantity, 3);
        assert_eq!(cart.get_total(), Price::from_units(3000));
    }

    #[test]
    fn test_add_does_not_clamp_to_stock() {
        let (_, cart) = store();
        let p = product(1, 10, 2);

        cart.add_to_cart(&p, 5);
        cart.add_to_cart(&p, 4);
        assert_eq!(cart.quantity_of(p.id), Some(9));
    }

    #[test]
    fn test_add_zero_is_ignored() {
        let (area, cart) = store();
        cart.add_to_cart(&product(1, 10, 5), 0);
        assert!(cart.items().is_empty());
        assert!(area.get_item(keys::CART).unwrap().is_none());
    }

    #[test]
    fn test_lines_keep_first_added_order() {
        let (_, cart) = store();
        cart.add_to_cart(&product(2, 10, 5), 1);
        cart.add_to_cart(&product(1, 10, 5), 1);
        cart.add_to_cart(&product(2, 10, 5), 1);

        let ids: Vec<i32> = cart.items().iter().map(|i| i.product.id.as_i32()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_update_quantity_clamps_into_stock_range() {
        let (_, cart) = store();
        let p = product(1, 100, 4);
        cart.add_to_cart(&p, 2);

        assert_eq!(cart.update_quantity(p.id, 3), Some(3));
        assert_eq!(cart.update_quantity(p.id, 0), Some(1));
        assert_eq!(cart.quantity_of(p.id), Some(1));
        assert_eq!(cart.update_quantity(p.id, 50), Some(4));
        assert_eq!(cart.quantity_of(p.id), Some(4));
    }

    #[test]
    fn test_update_quantity_without_stock_allows_one() {
        let (_, cart) = store();
        let p = product(1, 100, 0);
        cart.add_to_cart(&p, 3);
        assert_eq!(cart.update_quantity(p.id, 2), Some(1));
    }

    #[test]
    fn test_update_quantity_missing_product() {
        let (_, cart) = store();
        assert_eq!(cart.update_quantity(ProductId::new(9), 2), None);
    }

    #[test]
    fn test_remove_reduces_total_by_line() {
        let (_, cart) = store();
        cart.add_to_cart(&product(1, 1000, 10), 2);
        cart.add_to_cart(&product(2, 250, 10), 3);
        assert_eq!(cart.get_total(), Price::from_units(2750));

        assert!(cart.remove_from_cart(ProductId::new(2)));
        assert_eq!(cart.get_total(), Price::from_units(2000));

        // absent id is a no-op
        assert!(!cart.remove_from_cart(ProductId::new(2)));
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_hydration_merges_duplicate_lines_and_drops_empty_ones() {
        let area = Arc::new(MemoryStorage::new());
        let stored = serde_json::json!([
            { "id": 1, "name": "A", "image": "/a.jpg", "price": 10, "categoryId": 1, "quantity": 0 },
            { "id": 2, "name": "B", "image": "/b.jpg", "price": 5, "categoryId": 1, "quantity": 1 },
            { "id": 1, "name": "A", "image": "/a.jpg", "price": 10, "categoryId": 1, "quantity": 2 },
            { "id": 2, "name": "B", "image": "/b.jpg", "price": 5, "categoryId": 1, "quantity": 3 },
        ]);
        area.set_item(keys::CART, &stored.to_string()).unwrap();

        let cart = CartStore::new(Persistence::new(area.clone()));
        let lines: Vec<(i32, u32)> = cart
            .items()
            .iter()
            .map(|i| (i.product.id.as_i32(), i.quantity))
            .collect();
        assert_eq!(lines, vec![(2, 4), (1, 2)]);
        assert_eq!(cart.get_total(), Price::from_units(40));

        cart.add_to_cart(&product(1, 10, 10), 1);
        assert_eq!(cart.quantity_of(ProductId::new(1)), Some(3));
        assert_eq!(cart.items().len(), 2);

        // rehydrate applies the same cleanup
        let stored = serde_json::json!([
            { "id": 3, "name": "C", "image": "/c.jpg", "price": 7, "categoryId": 1, "quantity": 1 },
            { "id": 3, "name": "C", "image": "/c.jpg", "price": 7, "categoryId": 1, "quantity": 1 },
            { "id": 4, "name": "D", "image": "/d.jpg", "price": 9, "categoryId": 1, "quantity": 0 },
        ]);
        area.set_item(keys::CART, &stored.to_string()).unwrap();
        cart.rehydrate();
        assert_eq!(cart.quantity_of(ProductId::new(3)), Some(2));
        assert!(!cart.contains(ProductId::new(4)));
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_item_count_sums_quantities() {
        let (_, cart) = store();
        cart.add_to_cart(&product(1, 10, 10), 2);
        cart.add_to_cart(&product(2, 10, 10), 5);
        assert_eq!(cart.item_count(), 7);

        cart.clear_cart();
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.get_total(), Price::ZERO);
    }

    #[test]
    fn test_cart_persists_and_hydrates() {
        let (area, cart) = store();
        cart.add_to_cart(&product(1, 1000, 10), 3);

        let stored: serde_json::Value =
            serde_json::from_str(&area.get_item(keys::CART).unwrap().unwrap()).unwrap();
        assert_eq!(stored[0]["id"], 1);
        assert_eq!(stored[0]["quantity"], 3);

        let reloaded = CartStore::new(Persistence::new(area));
        assert_eq!(reloaded.items(), cart.items());
    }

    #[test]
    fn test_rehydrate_picks_up_external_write() {
        let (area, cart) = store();
        let other = CartStore::new(Persistence::new(area));
        other.add_to_cart(&product(5, 10, 10), 1);

        assert!(cart.items().is_empty());
        cart.rehydrate();
        assert!(cart.contains(ProductId::new(5)));
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let (_, cart) = store();
        let mut rx = cart.subscribe();

        cart.add_to_cart(&product(1, 10, 10), 1);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().len(), 1);

        // no-op removal does not notify
        cart.remove_from_cart(ProductId::new(42));
        assert!(!rx.has_changed().unwrap());
    }
}
