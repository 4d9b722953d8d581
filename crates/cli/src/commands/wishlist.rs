//! Wishlist commands.

use dovini_core::ProductId;
use dovini_storefront::AppState;
use tracing::info;

use super::CliError;
use super::catalog::Catalog;

/// Add a product to the wishlist, or remove it if already saved.
///
/// # Errors
///
/// Returns an error if the product is not in the catalog.
pub fn toggle(state: &AppState, catalog: &Catalog, id: ProductId) -> Result<(), CliError> {
    let product = catalog.get(id)?;
    if state.wishlist().toggle_wishlist(product) {
        state
            .toasts()
            .success(format!("{} added to wishlist", product.name));
    } else {
        state
            .toasts()
            .info(format!("{} removed from wishlist", product.name));
    }
    Ok(())
}

/// Show saved products.
pub fn show(state: &AppState) {
    let products = state.wishlist().products();
    if products.is_empty() {
        info!("Your wishlist is empty");
        return;
    }

    info!("Wishlist ({} products)", state.wishlist().wishlist_count());
    for product in &products {
        let stock = if product.in_stock() { "in stock" } else { "sold out" };
        info!("  #{} {} - {} ({stock})", product.id, product.name, product.price);
    }
}
