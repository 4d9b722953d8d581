//! Command implementations.
//!
//! Each command acts on the stores held by an [`AppState`] and reports the
//! result through `tracing`, the same way the stores report their own
//! activity.
//!
//! [`AppState`]: dovini_storefront::AppState

use dovini_core::{ProductId, RatingError};
use dovini_storefront::stores::ReviewError;
use thiserror::Error;

pub mod cart;
pub mod catalog;
pub mod recent;
pub mod reviews;
pub mod wishlist;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Catalog file could not be read.
    #[error("Failed to read catalog {path}: {source}")]
    CatalogRead {
        path: String,
        source: std::io::Error,
    },

    /// Catalog file is not a valid product list.
    #[error("Invalid catalog {path}: {source}")]
    CatalogParse {
        path: String,
        source: serde_yaml::Error,
    },

    /// Catalog lists the same product id twice.
    #[error("Catalog lists product {0} more than once")]
    DuplicateProduct(ProductId),

    /// No product with this id in the catalog.
    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),

    /// Product is not in the cart.
    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),

    /// Rating outside the accepted range.
    #[error(transparent)]
    Rating(#[from] RatingError),

    /// Review rejected.
    #[error(transparent)]
    Review(#[from] ReviewError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] dovini_storefront::config::ConfigError),

    /// Storage could not be opened.
    #[error(transparent)]
    Storage(#[from] dovini_storefront::error::StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_display() {
        let err = CliError::UnknownProduct(ProductId::new(99));
        assert_eq!(err.to_string(), "Unknown product: 99");

        let err = CliError::NotInCart(ProductId::new(3));
        assert_eq!(err.to_string(), "Product 3 is not in the cart");
    }
}
