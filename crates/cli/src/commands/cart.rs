//! Cart commands.

use dovini_core::ProductId;
use dovini_storefront::AppState;
use tracing::{info, warn};

use super::CliError;
use super::catalog::Catalog;

/// Add a catalog product to the cart.
///
/// The cart itself does not check stock; like a quantity selector, this
/// command warns when the request exceeds what is available.
///
/// # Errors
///
/// Returns an error if the product is not in the catalog.
pub fn add(
    state: &AppState,
    catalog: &Catalog,
    id: ProductId,
    quantity: u32,
) -> Result<(), CliError> {
    let product = catalog.get(id)?;
    let in_cart = state.cart().quantity_of(id).unwrap_or(0);
    if in_cart.saturating_add(quantity) > product.stock {
        warn!(
            product_id = %id,
            stock = product.stock,
            "Requested quantity exceeds available stock"
        );
    }

    state.cart().add_to_cart(product, quantity);
    state
        .toasts()
        .success(format!("Added {quantity} x {} to cart", product.name));
    Ok(())
}

/// Set the quantity of a cart line.
///
/// # Errors
///
/// Returns an error if the product is not in the cart.
pub fn update(state: &AppState, id: ProductId, quantity: u32) -> Result<(), CliError> {
    let applied = state
        .cart()
        .update_quantity(id, quantity)
        .ok_or(CliError::NotInCart(id))?;
    if applied == quantity {
        state.toasts().success(format!("Quantity set to {applied}"));
    } else {
        state
            .toasts()
            .info(format!("Quantity adjusted to {applied} (requested {quantity})"));
    }
    Ok(())
}

/// Remove a product's line from the cart.
pub fn remove(state: &AppState, id: ProductId) {
    if state.cart().remove_from_cart(id) {
        state.toasts().success("Removed from cart");
    } else {
        state.toasts().info(format!("Product {id} was not in the cart"));
    }
}

/// Empty the cart.
pub fn clear(state: &AppState) {
    state.cart().clear_cart();
    state.toasts().success("Cart cleared");
}

/// Show the cart lines and total.
pub fn show(state: &AppState) {
    let items = state.cart().items();
    if items.is_empty() {
        info!("Your cart is empty");
        return;
    }

    info!("Cart ({} items)", state.cart().item_count());
    for item in &items {
        info!(
            "  #{} {} - {} x {} = {}",
            item.product.id,
            item.product.name,
            item.quantity,
            item.product.price,
            item.line_total()
        );
    }
    info!("Total: {}", state.cart().get_total());
}
