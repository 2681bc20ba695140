//! Inspect or clear the local cart snapshot.
//!
//! Operates on the same snapshot file the storefront uses
//! (`CART_STORE_PATH`), so it can be used to debug a stuck cart without
//! the server running.

use tracing::info;

use makiya_core::Price;
use makiya_storefront::cart::{Cart, CartEvents, CartStore};
use makiya_storefront::config::StorefrontConfig;

/// Build a store over the configured snapshot path.
fn open_store() -> Result<CartStore, Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    Ok(CartStore::new(config.cart_store_path, CartEvents::new()))
}

/// Log the current cart snapshot contents.
///
/// # Errors
///
/// Returns an error if configuration is missing.
pub fn show() -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;
    let cart = Cart::load(&store);

    if cart.is_empty() {
        info!(path = %store.path().display(), "Cart is empty");
        return Ok(());
    }

    for line in cart.lines() {
        info!(
            product_id = %line.product_id,
            name = %line.name,
            quantity = line.quantity,
            line_total = %Price::new(line.line_total()),
            "Cart line"
        );
    }
    info!(
        items = cart.item_count(),
        total = %Price::new(cart.total()),
        "Cart total"
    );

    Ok(())
}

/// Reset the cart snapshot to an empty cart.
///
/// # Errors
///
/// Returns an error if configuration is missing or the snapshot cannot be
/// written.
pub fn clear() -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;
    store.clear()?;
    info!(path = %store.path().display(), "Cart cleared");
    Ok(())
}
