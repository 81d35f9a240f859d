//! # Seed Data Generator
//!
//! Populates the database with the default menu for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database (./data/dhaba.db)
//! cargo run -p dhaba-db --bin seed
//!
//! # Specify database path
//! cargo run -p dhaba-db --bin seed -- --db ./dhaba.db
//! ```
//!
//! ## Seeded Items
//! The three items every fresh install of the original system ships with.
//! Seeding is idempotent: items that already exist are skipped.

use std::env;

use dhaba_core::NewMenuItem;
use dhaba_db::{Database, DbConfig};

/// Default menu: (item_id, name, price_cents, category).
const DEFAULT_MENU: &[(&str, &str, i64, &str)] = &[
    ("ITEM001", "Butter Chicken", 25000, "Main Course"),
    ("ITEM002", "Naan", 3000, "Breads"),
    ("ITEM003", "Masala Chai", 2000, "Beverages"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let db_path = parse_db_path().unwrap_or_else(|| "./data/dhaba.db".to_string());

    println!("Seeding menu into {db_path}");

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let menu = db.menu();

    let mut inserted = 0;
    for (item_id, name, price_cents, category) in DEFAULT_MENU {
        if menu.get_by_item_id(item_id).await?.is_some() {
            println!("  {item_id} already present, skipping");
            continue;
        }

        menu.insert(NewMenuItem {
            item_id: Some(item_id.to_string()),
            name: name.to_string(),
            price_cents: *price_cents,
            category: Some(category.to_string()),
            description: None,
        })
        .await?;

        println!("  {item_id}  {name}");
        inserted += 1;
    }

    let total = menu.count().await?;
    println!("Done: {inserted} inserted, {total} items in catalog");

    db.close().await;
    Ok(())
}

/// Parses `--db <path>` from the command line.
fn parse_db_path() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    args.iter()
        .position(|a| a == "--db")
        .and_then(|i| args.get(i + 1))
        .cloned()
}
