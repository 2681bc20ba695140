//! Checkout route handler.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::checkout::{CheckoutForm, CheckoutReceipt};
use crate::error::Result;
use crate::state::AppState;

/// Place the order set for the current cart.
///
/// The form is transient: it exists only for this attempt and is dropped
/// afterwards, so a successful checkout leaves the client with a fresh
/// empty form. On success the persisted cart has been cleared and the
/// receipt carries the confirmation redirect target; on failure the cart
/// is untouched so the shopper can retry.
#[instrument(skip(state, form), fields(request_id))]
pub async fn submit(
    State(state): State<AppState>,
    Json(form): Json<CheckoutForm>,
) -> Result<Json<CheckoutReceipt>> {
    let receipt = state.checkout().place_order(&form).await?;
    Ok(Json(receipt))
}
