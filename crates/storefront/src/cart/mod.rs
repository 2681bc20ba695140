//! Cart state: the persisted snapshot, the view-model over it, and the
//! change-notification channel that keeps UI surfaces in sync.
//!
//! # Architecture
//!
//! The cart snapshot file is the single source of truth for what the
//! shopper intends to buy. [`CartStore`] owns reads/writes of that file;
//! [`Cart`] is a short-lived view-model loaded per request that derives
//! totals and persists every mutation back through the store; and
//! [`CartEvents`] is an explicit broadcast channel (owned by the app
//! state, injected where needed) that observers use as a signal to
//! re-read the store.

pub mod events;
pub mod store;
pub mod view_model;

pub use events::{CartEvent, CartEvents};
pub use store::{CartLine, CartStore, CartStoreError};
pub use view_model::Cart;
