#![allow(dead_code)]

use axum::Router;
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use server::{startup, ServerState};

pub const BASE_URL: &str = "/products";

/// One-connection in-memory store; `migrate = false` leaves it without tables
/// so any statement the app issues fails.
pub async fn test_db(migrate: bool) -> anyhow::Result<DatabaseConnection> {
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
        min_connections: 1,
        ..DatabaseConfig::default()
    };
    let db = connect_with_config(&cfg).await?;
    if migrate {
        migration::Migrator::up(&db, None).await?;
    }
    Ok(db)
}

pub async fn test_app() -> anyhow::Result<Router> {
    Ok(startup::build_app(ServerState::new(test_db(true).await?)))
}

pub async fn unmigrated_app() -> anyhow::Result<Router> {
    Ok(startup::build_app(ServerState::new(test_db(false).await?)))
}

const NAMES: [&str; 4] = ["Hat", "Shoes", "Hammer", "Bread"];
const CATEGORIES: [&str; 4] = ["CLOTHS", "CLOTHS", "TOOLS", "FOOD"];

/// Product payload for the i-th fixture.
pub fn product_payload(i: usize) -> Value {
    json!({
        "name": NAMES[i % NAMES.len()],
        "description": format!("fixture product {i}"),
        "price": format!("{}.25", 10 + i),
        "available": i % 2 == 0,
        "category": CATEGORIES[i % CATEGORIES.len()],
    })
}
