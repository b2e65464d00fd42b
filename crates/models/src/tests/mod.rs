
/// CRUD and query tests for the product entity
pub mod crud_tests;

use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::{prelude::Decimal, DatabaseConnection};

use crate::db::{connect_with_config, DatabaseConfig};
use crate::product::{Category, Product};

/// Fresh in-memory store with the real schema. One connection, so every
/// statement sees the same database.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
        min_connections: 1,
        ..DatabaseConfig::default()
    };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

const NAMES: [&str; 5] = ["Hat", "Pants", "Shirt", "Apple", "Hammer"];

/// Deterministic stand-in for a fuzzy product factory. Names, availability and
/// categories repeat on different cycles so every filter has mixed results.
pub fn product_factory(i: usize) -> Product {
    let name = NAMES[i % NAMES.len()];
    Product::new(
        name,
        &format!("{name} number {i}"),
        Decimal::new(1025 + 100 * i as i64, 2),
        i % 3 != 0,
        Category::ALL[i % Category::ALL.len()],
    )
}

pub fn product_batch(n: usize) -> Vec<Product> {
    (0..n).map(product_factory).collect()
}
