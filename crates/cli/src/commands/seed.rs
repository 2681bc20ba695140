//! Seed demo records into the backend services.
//!
//! Useful when standing up a fresh environment: the storefront renders
//! whatever the menu backend holds, so an empty catalog makes every other
//! surface look broken.
//!
//! # Environment Variables
//!
//! Uses the same configuration as the storefront binary (`MENU_API_URL`,
//! `INVENTORY_API_URL`, and friends).

use rust_decimal::Decimal;
use tracing::info;

use makiya_storefront::backend::{InventoryClient, MenuClient, NewIngredient, NewMaki};
use makiya_storefront::config::StorefrontConfig;

fn dec(value: &str) -> Decimal {
    value.parse().unwrap_or_default()
}

/// Demo maki catalog.
fn demo_makis() -> Vec<NewMaki> {
    vec![
        NewMaki {
            name: "Acevichado".to_string(),
            description: "Roll topped with acevichada sauce and fresh fish".to_string(),
            price: dec("18.50"),
            ingredients: vec![],
        },
        NewMaki {
            name: "California".to_string(),
            description: "Classic roll with avocado, crab and cucumber".to_string(),
            price: dec("15.90"),
            ingredients: vec![],
        },
        NewMaki {
            name: "Furai".to_string(),
            description: "Breaded hot roll with salmon and cream cheese".to_string(),
            price: dec("17.20"),
            ingredients: vec![],
        },
    ]
}

/// Demo ingredient stock records.
fn demo_ingredients() -> Vec<NewIngredient> {
    vec![
        NewIngredient {
            name: "Nori".to_string(),
            category: "seaweed".to_string(),
            unit: "sheet".to_string(),
            current_stock: dec("120"),
            minimum_stock: dec("40"),
            unit_price: dec("0.35"),
            active: true,
        },
        NewIngredient {
            name: "Sushi rice".to_string(),
            category: "grain".to_string(),
            unit: "kg".to_string(),
            current_stock: dec("25"),
            minimum_stock: dec("10"),
            unit_price: dec("8.90"),
            active: true,
        },
        NewIngredient {
            name: "Salmon".to_string(),
            category: "fish".to_string(),
            unit: "kg".to_string(),
            current_stock: dec("12"),
            minimum_stock: dec("5"),
            unit_price: dec("52.00"),
            active: true,
        },
    ]
}

/// Seed demo makis into the menu backend.
///
/// # Errors
///
/// Returns an error if configuration is missing or a backend call fails.
pub async fn menu() -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let client = MenuClient::new(config.menu_api_url.clone());

    for maki in demo_makis() {
        let created = client.create_maki(&maki).await?;
        info!(id = %created.id, name = %created.name, "Seeded maki");
    }

    info!("Menu seeding complete");
    Ok(())
}

/// Seed demo ingredients into the inventory backend.
///
/// # Errors
///
/// Returns an error if configuration is missing or a backend call fails.
pub async fn inventory() -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let client = InventoryClient::new(config.inventory_api_url.clone());

    for ingredient in demo_ingredients() {
        let created = client.create_ingredient(&ingredient).await?;
        info!(id = %created.id, name = %created.name, "Seeded ingredient");
    }

    info!("Inventory seeding complete");
    Ok(())
}
