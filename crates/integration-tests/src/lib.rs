//! Integration tests for the Dovini storefront state layer.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p dovini-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `persistence` - State surviving fresh store instances over file storage
//! - `shopping_flow` - Multi-store scenarios driven through `AppState`
//!
//! This library holds the shared fixtures.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;
use std::sync::Arc;

use dovini_core::{CategoryId, Price, Product, ProductId};
use dovini_storefront::storage::FileStorage;
use dovini_storefront::{AppState, StorefrontConfig};

/// Build a catalog product with the given id, whole-unit price and stock.
#[must_use]
pub fn product(id: i32, price: i64, stock: u32) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        image: format!("/img/products/{id}.jpg"),
        price: Price::from_units(price),
        original_price: None,
        brand: Some("Dovini".to_string()),
        rating: 4.0,
        stock,
        category_id: CategoryId::new(1),
    }
}

/// Create application state persisting to `dir`, as a fresh session would.
///
/// # Panics
///
/// Panics if the directory cannot be opened as file storage.
#[must_use]
#[allow(clippy::expect_used)]
pub fn file_state(dir: &Path) -> AppState {
    let area = FileStorage::open(dir).expect("open file storage");
    AppState::with_storage(StorefrontConfig::default(), Arc::new(area))
}
