//! Recently viewed commands.

use dovini_core::ProductId;
use dovini_storefront::AppState;
use tracing::info;

use super::CliError;
use super::catalog::Catalog;

/// View a product: show its details and record the view.
///
/// # Errors
///
/// Returns an error if the product is not in the catalog.
pub fn view(state: &AppState, catalog: &Catalog, id: ProductId) -> Result<(), CliError> {
    let product = catalog.get(id)?;
    state.recently_viewed().add_to_recently_viewed(product);

    info!("#{} {}", product.id, product.name);
    if let Some(brand) = &product.brand {
        info!("  Brand: {brand}");
    }
    info!("  Price: {}", product.price);
    info!("  Rating: {:.1}", product.rating);
    info!("  Stock: {}", product.stock);
    if let Some(average) = state.reviews().average_rating(id) {
        info!(
            "  Customer reviews: {average} ({} reviews)",
            state.reviews().review_count(id)
        );
    }
    if state.wishlist().is_in_wishlist(id) {
        info!("  In your wishlist");
    }
    Ok(())
}

/// Forget one viewed product.
pub fn remove(state: &AppState, id: ProductId) {
    if state.recently_viewed().remove_from_recently_viewed(id) {
        state.toasts().success("Removed from recently viewed");
    }
}

/// Forget all viewed products.
pub fn clear(state: &AppState) {
    state.recently_viewed().clear_recently_viewed();
    state.toasts().success("Recently viewed cleared");
}

/// Show the most recently viewed products.
pub fn show(state: &AppState, limit: usize) {
    let products = state.recently_viewed().get_recently_viewed_products(limit);
    if products.is_empty() {
        info!("No recently viewed products");
        return;
    }

    info!("Recently viewed");
    for product in &products {
        info!("  #{} {} - {}", product.id, product.name, product.price);
    }
}
