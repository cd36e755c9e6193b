//! # Seed Data Generator
//!
//! Populates the database with a demo venue for development: the default
//! categories and menu, six tables, four rooms, three banquet halls, and a
//! cashier login.
//!
//! ## Usage
//! ```bash
//! cargo run -p atrium-db --bin seed
//! cargo run -p atrium-db --bin seed -- --db ./data/atrium.db
//! ```
//!
//! Seeding is skipped when the catalog already has items, so re-running is
//! harmless.

use std::env;

use atrium_core::Role;
use atrium_db::{Database, DbConfig};
use tracing::{info, warn};

/// (name, category, dine-in cents, delivery cents, tax bps override)
const MENU: &[(&str, &str, i64, i64, Option<u32>)] = &[
    ("Classic Burger", "FOOD", 15000, 16000, Some(0)),
    ("Cheese Pizza", "FOOD", 28000, 30000, Some(500)),
    ("Red Sauce Pasta", "FOOD", 22000, 24000, Some(500)),
    ("French Fries", "SNACKS", 9000, 10000, Some(500)),
    ("Coca Cola", "DRINKS", 6000, 6500, Some(0)),
    ("Cold Coffee", "DRINKS", 12000, 13000, Some(1200)),
    ("Vanilla Scoop", "DESSERT", 8000, 9000, Some(1800)),
    ("Brownie", "DESSERT", 15000, 16500, Some(1800)),
];

/// (name, default tax bps)
const CATEGORIES: &[(&str, u32)] = &[
    ("FOOD", 500),
    ("DRINKS", 1200),
    ("SNACKS", 500),
    ("DESSERT", 1800),
];

/// (room number, type, nightly rate cents)
const ROOMS: &[(&str, &str, i64)] = &[
    ("101", "Single", 150000),
    ("102", "Single", 150000),
    ("201", "Double", 250000),
    ("301", "Suite", 500000),
];

/// (name, capacity, day rate cents)
const HALLS: &[(&str, i64, i64)] = &[
    ("Grand Ballroom", 500, 2000000),
    ("Poolside Area", 100, 1000000),
    ("Conference Hall", 50, 500000),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut db_path = "atrium.db".to_string();
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--db" => {
                db_path = args.next().ok_or("--db requires a path")?;
            }
            other => {
                warn!(arg = other, "ignoring unknown argument");
            }
        }
    }

    info!(path = %db_path, "seeding demo venue");
    let db = Database::new(DbConfig::new(&db_path)).await?;

    if !db.catalog().list_items().await?.is_empty() {
        info!("catalog already populated, nothing to do");
        return Ok(());
    }

    for (name, tax_bps) in CATEGORIES {
        db.catalog().add_category(name, *tax_bps).await?;
    }

    for (name, category, dine_in, delivery, tax_bps) in MENU {
        db.catalog()
            .add_item(name, Some(*category), *dine_in, *delivery, None, *tax_bps)
            .await?;
    }

    for n in 1..=6 {
        db.tables().add(&format!("T{n}")).await?;
    }

    for (number, room_type, rate) in ROOMS {
        db.rooms().add(number, room_type, *rate).await?;
    }

    for (name, capacity, rate) in HALLS {
        db.halls().add(name, *capacity, *rate).await?;
    }

    db.settings().add_user("cashier", "4321", Role::Cashier).await?;

    info!(
        items = MENU.len(),
        rooms = ROOMS.len(),
        halls = HALLS.len(),
        "demo venue seeded"
    );

    Ok(())
}
