//! Application state shared across handlers.

use std::sync::Arc;

use crate::backend::{InventoryClient, MenuClient, OrdersClient};
use crate::cart::{CartEvents, CartStore};
use crate::checkout::CheckoutOrchestrator;
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources: configuration, backend clients, the cart store,
/// and the cart event channel.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    orders: OrdersClient,
    menu: MenuClient,
    inventory: InventoryClient,
    events: CartEvents,
    cart: CartStore,
}

impl AppState {
    /// Create a new application state from configuration.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let orders = OrdersClient::new(config.orders_api_url.clone());
        let menu = MenuClient::new(config.menu_api_url.clone());
        let inventory = InventoryClient::new(config.inventory_api_url.clone());
        let events = CartEvents::new();
        let cart = CartStore::new(config.cart_store_path.clone(), events.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                orders,
                menu,
                inventory,
                events,
                cart,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the orders backend client.
    #[must_use]
    pub fn orders(&self) -> &OrdersClient {
        &self.inner.orders
    }

    /// Get a reference to the menu backend client.
    #[must_use]
    pub fn menu(&self) -> &MenuClient {
        &self.inner.menu
    }

    /// Get a reference to the inventory backend client.
    #[must_use]
    pub fn inventory(&self) -> &InventoryClient {
        &self.inner.inventory
    }

    /// Get a reference to the cart event channel.
    #[must_use]
    pub fn events(&self) -> &CartEvents {
        &self.inner.events
    }

    /// Get a reference to the persisted cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Build a checkout orchestrator over this state's clients and store.
    #[must_use]
    pub fn checkout(&self) -> CheckoutOrchestrator<'_> {
        CheckoutOrchestrator::new(
            self.orders(),
            self.cart(),
            self.inner.config.default_buyer_id,
            self.inner.config.buyer_fallback,
        )
    }
}
