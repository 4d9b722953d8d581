//! Catalog product record.

use serde::{Deserialize, Serialize};

use crate::types::id::{CategoryId, ProductId};
use crate::types::price::Price;

/// A catalog product as supplied by the product data source.
///
/// Stores only ever hold snapshots of products; they never mutate them.
/// Field names serialize in camelCase to match the persisted layout
/// (`originalPrice`, `categoryId`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub image: String,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Catalog display average, not a review [`Rating`](crate::Rating).
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub stock: u32,
    pub category_id: CategoryId,
}

impl Product {
    /// Whether the product is discounted against its original price.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.original_price.is_some_and(|original| original > self.price)
    }

    /// Whether any units are available.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}
