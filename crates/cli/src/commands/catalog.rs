//! Product catalog loaded from a YAML file.
//!
//! The catalog stands in for the product data source: a list of products
//! in the same camelCase shape the stores persist.
//!
//! ```yaml
//! - id: 1
//!   name: Linen Shirt
//!   image: /img/linen-shirt.jpg
//!   price: 1000
//!   originalPrice: 1200
//!   brand: Dovini
//!   rating: 4.5
//!   stock: 8
//!   categoryId: 2
//! ```

use std::collections::HashSet;
use std::path::Path;

use dovini_core::{Product, ProductId};
use tracing::info;

use super::CliError;

/// Immutable list of products, looked up by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Read and validate a catalog file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not a product list,
    /// or lists a product id twice.
    pub async fn load(path: &Path) -> Result<Self, CliError> {
        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| CliError::CatalogRead {
                    path: path.display().to_string(),
                    source,
                })?;
        let catalog = Self::from_yaml(&content).map_err(|e| match e {
            CliError::CatalogParse { source, .. } => CliError::CatalogParse {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })?;
        tracing::debug!(path = %path.display(), products = catalog.products.len(), "Loaded catalog");
        Ok(catalog)
    }

    /// Parse a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a product list or lists a
    /// product id twice.
    pub fn from_yaml(content: &str) -> Result<Self, CliError> {
        let products: Vec<Product> =
            serde_yaml::from_str(content).map_err(|source| CliError::CatalogParse {
                path: "<inline>".to_string(),
                source,
            })?;
        Self::new(products)
    }

    /// Build a catalog from products.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::DuplicateProduct`] if an id appears twice.
    pub fn new(products: Vec<Product>) -> Result<Self, CliError> {
        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CliError::DuplicateProduct(product.id));
            }
        }
        Ok(Self { products })
    }

    /// Look up a product.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::UnknownProduct`] if no product has this id.
    pub fn get(&self, id: ProductId) -> Result<&Product, CliError> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or(CliError::UnknownProduct(id))
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

/// List every catalog product.
pub fn list(catalog: &Catalog) {
    info!("Catalog ({} products)", catalog.products().len());
    for product in catalog.products() {
        let sale = product
            .original_price
            .filter(|_| product.is_on_sale())
            .map(|original| format!(" (was {original})"))
            .unwrap_or_default();
        info!(
            "  #{} {} - {}{} [{} in stock]",
            product.id, product.name, product.price, sale, product.stock
        );
    }
}
