//! Checkout: buyer form, validation, and the order-placement orchestrator.
//!
//! # Flow
//!
//! A submitted [`CheckoutForm`] plus a non-empty cart drive the
//! [`CheckoutOrchestrator`]: validate locally, resolve or create the buyer
//! against the orders backend, then create one backend order per cart line
//! - sequentially, aborting on the first failure without compensating for
//! orders already created (the backend is the system of record and partial
//! order sets are recoverable by an administrator).

pub mod form;
pub mod orchestrator;
pub mod validate;

pub use form::CheckoutForm;
pub use orchestrator::{CheckoutError, CheckoutOrchestrator, CheckoutReceipt};
pub use validate::{FieldErrors, validate};
