//! Persistence tests: store state written by one session is hydrated by the
//! next, and broken storage never breaks the session.

#![allow(clippy::unwrap_used)]

use std::fs;

use dovini_core::{Price, Product, ProductId};
use dovini_integration_tests::{file_state, product};
use dovini_storefront::storage::{FileStorage, Persistence, StorageArea, keys};

// =============================================================================
// Round Trips
// =============================================================================

#[test]
fn test_bridge_round_trip_in_fresh_instance() {
    let dir = tempfile::tempdir().unwrap();
    let value = vec![product(1, 1000, 3), product(2, 250, 0)];

    Persistence::new(std::sync::Arc::new(FileStorage::open(dir.path()).unwrap()))
        .save("snapshot", &value);

    let fresh = Persistence::new(std::sync::Arc::new(FileStorage::open(dir.path()).unwrap()));
    assert_eq!(fresh.load::<Vec<Product>>("snapshot"), Some(value));
}

#[test]
fn test_all_stores_survive_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let session = file_state(dir.path());
        session.cart().add_to_cart(&product(1, 1000, 10), 1);
        session.cart().add_to_cart(&product(1, 1000, 10), 2);
        session.wishlist().toggle_wishlist(&product(2, 300, 5));
        for id in 1..=12 {
            session
                .recently_viewed()
                .add_to_recently_viewed(&product(id, 100, 1));
        }
    }

    let next = file_state(dir.path());
    assert_eq!(next.cart().quantity_of(ProductId::new(1)), Some(3));
    assert_eq!(next.cart().get_total(), Price::from_units(3000));
    assert!(next.wishlist().is_in_wishlist(ProductId::new(2)));

    let recent: Vec<i32> = next
        .recently_viewed()
        .get_recently_viewed_products(10)
        .iter()
        .map(|p| p.id.as_i32())
        .collect();
    assert_eq!(recent, vec![12, 11, 10, 9, 8, 7, 6, 5, 4, 3]);
}

// =============================================================================
// Stored Layout
// =============================================================================

#[test]
fn test_recently_viewed_layout_is_json_array_of_products() {
    let dir = tempfile::tempdir().unwrap();
    let session = file_state(dir.path());
    session
        .recently_viewed()
        .add_to_recently_viewed(&product(7, 99, 2));

    let raw = fs::read_to_string(dir.path().join(format!("{}.json", keys::RECENTLY_VIEWED))).unwrap();
    let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let entries = stored.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["id"], 7);
    assert_eq!(entries[0]["categoryId"], 1);
    assert!(entries[0]["price"].is_number());
}

#[test]
fn test_hydrates_data_written_by_other_clients() {
    let dir = tempfile::tempdir().unwrap();
    let area = FileStorage::open(dir.path()).unwrap();
    area.set_item(
        keys::RECENTLY_VIEWED,
        r#"[
            {"id": 4, "name": "Sandals", "image": "s.jpg", "price": 1450, "originalPrice": 1800,
             "brand": "Huarache Co.", "rating": 4.8, "stock": 4, "categoryId": 2},
            {"name": "missing id", "image": "x.jpg", "price": 1, "categoryId": 1},
            {"id": 5, "name": "Jacket", "image": "j.jpg", "price": 1899.99, "rating": 4.6,
             "stock": 12, "categoryId": 1}
        ]"#,
    )
    .unwrap();

    let session = file_state(dir.path());
    let products = session.recently_viewed().get_recently_viewed_products(10);
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].original_price, Some(Price::from_units(1800)));
    assert_eq!(products[1].price.to_string(), "$1899.99");
}

// =============================================================================
// Degraded Storage
// =============================================================================

#[test]
fn test_corrupt_files_start_empty_and_are_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let area = FileStorage::open(dir.path()).unwrap();
    area.set_item(keys::CART, "{{{ corrupt").unwrap();
    area.set_item(keys::WISHLIST, "42").unwrap();

    let session = file_state(dir.path());
    assert!(session.cart().items().is_empty());
    assert_eq!(session.wishlist().wishlist_count(), 0);

    session.cart().add_to_cart(&product(1, 10, 1), 1);
    let next = file_state(dir.path());
    assert_eq!(next.cart().item_count(), 1);
}

#[test]
fn test_external_clear_empties_next_session() {
    let dir = tempfile::tempdir().unwrap();
    let session = file_state(dir.path());
    session.wishlist().toggle_wishlist(&product(1, 10, 1));

    FileStorage::open(dir.path()).unwrap().clear().unwrap();

    // the running session keeps its state; a new one starts empty
    assert_eq!(session.wishlist().wishlist_count(), 1);
    assert_eq!(file_state(dir.path()).wishlist().wishlist_count(), 0);
}
