//! Request and response types for the backend REST services.
//!
//! The orders backend speaks snake_case JSON with numeric prices; the
//! inventory backend speaks camelCase. Monetary fields are decimal on our
//! side and encoded as JSON numbers on the wire via
//! `rust_decimal::serde::float`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use makiya_core::{IngredientId, OrderId, OrderStatus, PaymentMethod, ProductId, UserId};

// =============================================================================
// Orders backend: users
// =============================================================================

/// A buyer record owned by the orders backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub address: String,
}

/// Payload for creating a buyer record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
}

// =============================================================================
// Orders backend: orders
// =============================================================================

/// An order record owned by the orders backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteOrder {
    pub id: OrderId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub status: OrderStatus,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    pub payment_method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for creating an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub status: OrderStatus,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    pub payment_method: PaymentMethod,
}

/// Partial update for an order; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
}

// =============================================================================
// Menu backend: makis
// =============================================================================

/// A maki (sushi roll) from the menu backend catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Maki {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingredients: Vec<i32>,
}

/// Payload for creating or replacing a maki.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMaki {
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingredients: Vec<i32>,
}

// =============================================================================
// Inventory backend: ingredients
// =============================================================================

/// An ingredient stock record from the inventory backend (camelCase wire).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: String,
    pub category: String,
    pub unit: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub current_stock: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub minimum_stock: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    pub active: bool,
}

/// Payload for creating an ingredient stock record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIngredient {
    pub name: String,
    pub category: String,
    pub unit: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub current_stock: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub minimum_stock: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    pub active: bool,
}

/// Partial update for an ingredient; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub current_stock: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub minimum_stock: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub unit_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}
