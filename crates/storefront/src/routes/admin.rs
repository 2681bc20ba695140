//! Admin route handlers - thin passthroughs over the backend resources.
//!
//! The admin console is a set of plain CRUD screens; the storefront only
//! proxies the listing and mutation calls it needs as the checkout
//! confirmation surface and for basic order management.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use makiya_core::{IngredientId, OrderId, OrderStatus, UserId};

use crate::backend::{Ingredient, OrderFilter, OrderUpdate, RemoteOrder};
use crate::error::Result;
use crate::state::AppState;

/// Query parameters for the order listing.
#[derive(Debug, Default, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<OrderStatus>,
    pub user_id: Option<i32>,
}

/// List orders, optionally filtered by status and/or buyer.
#[instrument(skip(state))]
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<Vec<RemoteOrder>>> {
    let filter = OrderFilter {
        status: query.status,
        user_id: query.user_id.map(UserId::new),
    };
    let orders = state.orders().list_orders(filter).await?;
    Ok(Json(orders))
}

/// Show a single order.
#[instrument(skip(state))]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RemoteOrder>> {
    let order = state.orders().get_order(OrderId::new(id)).await?;
    Ok(Json(order))
}

/// Partially update an order (status transitions, corrections).
#[instrument(skip(state, update))]
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(update): Json<OrderUpdate>,
) -> Result<Json<RemoteOrder>> {
    let order = state.orders().update_order(OrderId::new(id), &update).await?;
    Ok(Json(order))
}

/// Delete an order.
#[instrument(skip(state))]
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    state.orders().delete_order(OrderId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List ingredient stock records.
#[instrument(skip(state))]
pub async fn list_ingredients(
    State(state): State<AppState>,
) -> Result<Json<Vec<Ingredient>>> {
    let ingredients = state.inventory().list_ingredients().await?;
    Ok(Json(ingredients))
}

/// Delete an ingredient stock record.
#[instrument(skip(state))]
pub async fn delete_ingredient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state
        .inventory()
        .delete_ingredient(&IngredientId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
