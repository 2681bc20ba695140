//! Makiya CLI - Backend seeding and cart management tools.
//!
//! # Usage
//!
//! ```bash
//! # Seed demo makis into the menu backend
//! makiya-cli seed menu
//!
//! # Seed demo ingredients into the inventory backend
//! makiya-cli seed inventory
//!
//! # Seed everything
//! makiya-cli seed all
//!
//! # Inspect the persisted cart snapshot
//! makiya-cli cart show
//!
//! # Empty the persisted cart snapshot
//! makiya-cli cart clear
//! ```
//!
//! # Commands
//!
//! - `seed` - Create demo records in the backend services
//! - `cart` - Inspect or clear the local cart snapshot

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "makiya-cli")]
#[command(author, version, about = "Makiya CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed demo data into the backend services
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
    /// Inspect or clear the local cart snapshot
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Seed demo makis into the menu backend
    Menu,
    /// Seed demo ingredients into the inventory backend
    Inventory,
    /// Seed menu and inventory
    All,
}

#[derive(Subcommand)]
enum CartAction {
    /// Log the current cart snapshot contents
    Show,
    /// Reset the cart snapshot to an empty cart
    Clear,
}

#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed { target } => match target {
            SeedTarget::Menu => commands::seed::menu().await?,
            SeedTarget::Inventory => commands::seed::inventory().await?,
            SeedTarget::All => {
                commands::seed::menu().await?;
                commands::seed::inventory().await?;
            }
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show()?,
            CartAction::Clear => commands::cart::clear()?,
        },
    }
    Ok(())
}
