//! Cart route handlers.
//!
//! Every mutation loads the view-model, applies the change (which persists
//! the snapshot and notifies the event channel), and responds with the
//! fresh cart view so the caller can re-render without a second request.
//! Other surfaces follow `/cart/events` and re-read on each notification.

use std::convert::Infallible;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{
        IntoResponse, Sse,
        sse::{Event, KeepAlive},
    },
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::broadcast::error::RecvError;
use tracing::instrument;

use makiya_core::{AllergyFlag, Price, ProductId};

use crate::cart::{Cart, CartLine};
use crate::error::Result;
use crate::state::AppState;

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub product_id: ProductId,
    pub name: String,
    pub variant_label: String,
    pub allergy_flag: AllergyFlag,
    pub quantity: u32,
    pub image_ref: String,
    pub unit_price: Decimal,
    pub line_total: Decimal,
    pub line_total_display: String,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id,
            name: line.name.clone(),
            variant_label: line.variant_label.clone(),
            allergy_flag: line.allergy_flag,
            quantity: line.quantity,
            image_ref: line.image_ref.clone(),
            unit_price: line.unit_price,
            line_total: line.line_total(),
            line_total_display: Price::new(line.line_total()).display(),
        }
    }
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: Decimal,
    pub subtotal: String,
    pub item_count: u32,
}

impl From<&Cart<'_>> for CartView {
    fn from(cart: &Cart<'_>) -> Self {
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            total: cart.total(),
            subtotal: Price::new(cart.total()).display(),
            item_count: cart.item_count(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: Option<u32>,
    #[serde(default)]
    pub image_ref: String,
    #[serde(default)]
    pub variant_label: String,
    #[serde(default)]
    pub allergy_flag: AllergyFlag,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: ProductId,
}

/// Display the cart.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    let cart = Cart::load(state.cart());
    Json(CartView::from(&cart))
}

/// Add an item to the cart.
///
/// Re-adding a product that is already in the cart appends a second
/// independent line; quantities are not merged.
#[instrument(skip(state, form))]
pub async fn add(
    State(state): State<AppState>,
    Json(form): Json<AddToCartForm>,
) -> Result<Json<CartView>> {
    let mut cart = Cart::load(state.cart());
    cart.add_line(CartLine {
        product_id: form.product_id,
        name: form.name,
        unit_price: form.unit_price,
        quantity: form.quantity.unwrap_or(1).max(1),
        image_ref: form.image_ref,
        variant_label: form.variant_label,
        allergy_flag: form.allergy_flag,
    })?;

    Ok(Json(CartView::from(&cart)))
}

/// Set a cart line's quantity, clamped to a minimum of 1.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Json(form): Json<UpdateCartForm>,
) -> Result<Json<CartView>> {
    let mut cart = Cart::load(state.cart());
    cart.set_quantity(form.product_id, form.quantity)?;

    Ok(Json(CartView::from(&cart)))
}

/// Remove a line from the cart by product id.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Json(form): Json<RemoveFromCartForm>,
) -> Result<Json<CartView>> {
    let mut cart = Cart::load(state.cart());
    cart.remove_line(form.product_id)?;

    Ok(Json(CartView::from(&cart)))
}

/// Get the cart count badge value.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> impl IntoResponse {
    let cart = Cart::load(state.cart());
    Json(json!({ "count": cart.item_count() }))
}

/// Emit the open-cart-panel signal to every subscribed surface.
#[instrument(skip(state))]
pub async fn open(State(state): State<AppState>) -> StatusCode {
    state.events().notify_open_panel();
    StatusCode::NO_CONTENT
}

/// Stream cart sync notifications as server-sent events.
///
/// Events carry no payload beyond their name; subscribers re-read the
/// cart on every notification, so a lagged receiver just re-reads once
/// on the next event.
#[instrument(skip(state))]
pub async fn events(
    State(state): State<AppState>,
) -> Sse<impl futures::Stream<Item = std::result::Result<Event, Infallible>>> {
    let mut rx = state.events().subscribe();

    let stream = async_stream::stream! {
        loop {
            match rx.recv().await {
                Ok(event) => yield Ok(Event::default().event(event.as_str()).data("")),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "cart event subscriber lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}
