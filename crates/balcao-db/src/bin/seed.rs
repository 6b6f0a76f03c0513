//! # Seed Data Generator
//!
//! Populates the database with a small demo catalog and stock, then runs one
//! demo checkout so a fresh database has something to look at.
//!
//! ## Usage
//! ```bash
//! # Seed the default database file
//! cargo run -p balcao-db --bin seed
//!
//! # Specify database path
//! cargo run -p balcao-db --bin seed -- --db ./data/balcao.db
//! ```

use std::env;

use balcao_core::{Money, PaymentMethod, SaleLine};
use balcao_db::{migrations, Database, DbConfig};
use tracing_subscriber::EnvFilter;

/// Demo catalog: (name, description, price_cents, stock, cost_cents)
const CATALOG: &[(&str, &str, i64, i64, i64)] = &[
    ("Bolo de Chocolate", "Chocolate cake, 500g", 5000, 3, 1000),
    ("Cafe Coado", "Filter coffee, 200ml", 600, 50, 150),
    ("Pao de Queijo", "Cheese bread, unit", 350, 40, 80),
    ("Suco de Laranja", "Fresh orange juice, 300ml", 900, 20, 300),
    ("Coxinha", "Chicken croquette, unit", 700, 25, 200),
    ("Brigadeiro", "Chocolate truffle, unit", 300, 60, 70),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./balcao_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Balcao POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./balcao_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Balcao POS Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");

    let (total_migrations, applied) = migrations::migration_status(db.pool()).await?;
    println!("✓ Migrations applied ({applied}/{total_migrations})");

    // Check existing products
    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Seed catalog and stock
    println!();
    println!("Seeding catalog...");

    let mut first_product_id = None;
    for (name, description, price_cents, stock, cost_cents) in CATALOG {
        let product = db.products().create(name, description, *price_cents).await?;
        let entry = db
            .storage()
            .create_entry(&product.id, *stock, *cost_cents)
            .await?;

        println!(
            "  {} @ {} ({} on hand, cost {})",
            product.name,
            product.price(),
            stock,
            entry.cost()
        );

        if first_product_id.is_none() {
            first_product_id = Some(product.id);
        }
    }

    // Run one demo checkout: two units of the first catalog item, paid cash.
    let product_id = first_product_id.expect("catalog is non-empty");
    let product = db.products().get_by_id(&product_id).await?;
    let quantity = 2;
    let total = product.price() * quantity;

    println!();
    println!("Running demo checkout...");

    let sale = db
        .checkout()
        .process_sale(total.cents(), &[SaleLine::new(&product_id, quantity)])
        .await?;

    let receipt = PaymentMethod::Cash {
        tendered: Money::from_cents(20000),
    }
    .settle(total)?;

    println!("  Sale {}: {} x{}", sale.id, product.name, quantity);
    println!("  Total: {}", sale.total());
    println!("  {}", receipt.message);
    println!(
        "  Remaining stock: {}",
        db.storage().get_stock(&product_id).await?
    );

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
