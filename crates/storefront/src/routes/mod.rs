//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (pings the orders backend)
//!
//! # Products (menu passthrough)
//! GET  /products               - Maki catalog
//! GET  /products/{id}          - Maki detail
//!
//! # Cart
//! GET  /cart                   - Cart view (lines, total, count)
//! POST /cart/add               - Append a line item
//! POST /cart/update            - Set a line's quantity (clamped to >= 1)
//! POST /cart/remove            - Remove a line by product id
//! GET  /cart/count             - Cart count badge
//! POST /cart/open              - Emit the open-cart-panel signal
//! GET  /cart/events            - Cart sync notifications (SSE)
//!
//! # Checkout
//! POST /checkout               - Place the order set for the current cart
//!
//! # Admin confirmation surface (thin backend passthroughs)
//! GET    /admin/orders         - Order listing (filter: status, user_id)
//! GET    /admin/orders/{id}    - Order detail
//! PUT    /admin/orders/{id}    - Order update
//! DELETE /admin/orders/{id}    - Order delete
//! GET    /admin/ingredients    - Ingredient stock listing
//! ```

pub mod admin;
pub mod cart;
pub mod checkout;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
        .route("/open", post(cart::open))
        .route("/events", get(cart::events))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    use axum::routing::delete;

    Router::new()
        .route("/orders", get(admin::list_orders))
        .route(
            "/orders/{id}",
            get(admin::get_order)
                .put(admin::update_order)
                .delete(admin::delete_order),
        )
        .route("/ingredients", get(admin::list_ingredients))
        .route("/ingredients/{id}", delete(admin::delete_ingredient))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Product routes
        .nest("/products", product_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout
        .route("/checkout", post(checkout::submit))
        // Admin confirmation surface
        .nest("/admin", admin_routes())
}
