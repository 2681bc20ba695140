//! Checkout orchestrator - turns a cart plus a validated form into backend
//! order records.
//!
//! # Failure policy
//!
//! - Precondition failures (terms, validation, empty cart) abort before any
//!   network call.
//! - A buyer-directory fetch failure aborts the whole attempt.
//! - A duplicate-email rejection on buyer creation is resolved from the
//!   directory, never surfaced.
//! - Any other buyer-creation failure falls back to the configured default
//!   buyer id when the fallback toggle is on (always logged); with the
//!   toggle off it aborts.
//! - Order creation is strictly sequential in cart order; the first failure
//!   aborts the remaining lines and nothing already created is rolled back.
//!   Retrying a failed checkout can therefore duplicate orders - accepted
//!   for a best-effort storefront.

use serde::Serialize;
use thiserror::Error;

use makiya_core::{OrderStatus, UserId};

use crate::backend::{BackendError, NewOrder, NewUser, OrdersClient, RemoteOrder, RemoteUser};
use crate::cart::{CartStore, CartStoreError};

use super::form::{CheckoutForm, strip_separators};
use super::validate::{FieldErrors, validate};

/// Where the shopper is sent after a successful checkout.
pub const CONFIRMATION_PATH: &str = "/admin/orders";

/// Errors that can abort a checkout attempt.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The terms-acceptance flag was not set.
    #[error("terms and conditions must be accepted")]
    TermsNotAccepted,

    /// The form failed validation; per-field messages attached.
    #[error("the checkout form has invalid fields")]
    Invalid(FieldErrors),

    /// The cart has no lines.
    #[error("the cart is empty")]
    EmptyCart,

    /// A backend call failed.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Clearing the persisted cart after success failed.
    #[error(transparent)]
    Store(#[from] CartStoreError),
}

/// Result of a successful checkout.
#[derive(Debug, Serialize)]
pub struct CheckoutReceipt {
    /// The buyer every order was tagged with.
    pub buyer_id: UserId,
    /// Created orders, in cart order.
    pub orders: Vec<RemoteOrder>,
    /// Confirmation redirect target.
    pub redirect: &'static str,
}

/// Orchestrates buyer resolution and per-line order creation.
pub struct CheckoutOrchestrator<'a> {
    orders: &'a OrdersClient,
    store: &'a CartStore,
    default_buyer_id: UserId,
    buyer_fallback: bool,
}

impl<'a> CheckoutOrchestrator<'a> {
    /// Create an orchestrator over the given backend client and cart store.
    #[must_use]
    pub const fn new(
        orders: &'a OrdersClient,
        store: &'a CartStore,
        default_buyer_id: UserId,
        buyer_fallback: bool,
    ) -> Self {
        Self {
            orders,
            store,
            default_buyer_id,
            buyer_fallback,
        }
    }

    /// Run the full checkout for `form` against the current cart.
    ///
    /// On success the persisted cart is cleared (observers are notified)
    /// and the created orders are returned. On failure the cart is left
    /// untouched so the shopper can retry.
    ///
    /// # Errors
    ///
    /// See [`CheckoutError`] and the module-level failure policy.
    pub async fn place_order(&self, form: &CheckoutForm) -> Result<CheckoutReceipt, CheckoutError> {
        if !form.accept_terms {
            return Err(CheckoutError::TermsNotAccepted);
        }

        let errors = validate(form);
        if !errors.is_empty() {
            return Err(CheckoutError::Invalid(errors));
        }

        let lines = self.store.load();
        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        // Full directory up front; only consulted if buyer creation hits a
        // duplicate email. A failure here aborts the whole attempt.
        let directory = self.orders.list_users().await?;

        let buyer_id = self.resolve_buyer(form, &directory).await?;

        let payment_method = form.invoice_type.payment_method();
        let mut created = Vec::with_capacity(lines.len());
        for line in &lines {
            // Sequential on purpose: order records keep cart order and the
            // backend sees at most one in-flight creation per checkout.
            let order = self
                .orders
                .create_order(&NewOrder {
                    user_id: buyer_id,
                    product_id: line.product_id,
                    status: OrderStatus::Pending,
                    total_price: line.line_total(),
                    payment_method,
                })
                .await?;
            created.push(order);
        }

        self.store.clear()?;

        tracing::info!(
            buyer_id = %buyer_id,
            orders = created.len(),
            "checkout completed"
        );

        Ok(CheckoutReceipt {
            buyer_id,
            orders: created,
            redirect: CONFIRMATION_PATH,
        })
    }

    /// Resolve the acting buyer id: create a buyer from the form, falling
    /// back through the directory on a duplicate email.
    async fn resolve_buyer(
        &self,
        form: &CheckoutForm,
        directory: &[RemoteUser],
    ) -> Result<UserId, CheckoutError> {
        let new_user = NewUser {
            name: form.buyer_name(),
            email: form.email.trim().to_string(),
            phone_number: strip_separators(&form.phone),
            address: form.recipient_name.trim().to_string(),
        };

        match self.orders.create_user(&new_user).await {
            Ok(user) => Ok(user.id),
            Err(BackendError::DuplicateEmail) => {
                if let Some(existing) = directory.iter().find(|u| u.email == new_user.email) {
                    Ok(existing.id)
                } else if let Some(last) = directory.last() {
                    // Heuristic, not a guarantee: the duplicate is assumed to
                    // be the most recently registered buyer.
                    tracing::warn!(
                        buyer_id = %last.id,
                        "duplicate email not found in directory, using last directory entry"
                    );
                    Ok(last.id)
                } else {
                    tracing::warn!(
                        buyer_id = %self.default_buyer_id,
                        "duplicate email with empty directory, using default buyer"
                    );
                    Ok(self.default_buyer_id)
                }
            }
            Err(err) if self.buyer_fallback => {
                tracing::warn!(
                    error = %err,
                    buyer_id = %self.default_buyer_id,
                    "buyer creation failed, falling back to default buyer"
                );
                Ok(self.default_buyer_id)
            }
            Err(err) => Err(err.into()),
        }
    }
}
