use models::product::{Category, Product, ProductInput};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tracing::info;

use crate::errors::ServiceError;

/// Which subset of the catalog a listing returns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProductFilter {
    All,
    Name(String),
    Category(Category),
    Available(bool),
}

impl ProductFilter {
    /// Build a filter from raw query values. Only one filter applies; `name`
    /// wins over `category`, which wins over `available`.
    pub fn from_query(name: Option<&str>, category: Option<&str>, available: Option<&str>) -> Result<Self, ServiceError> {
        if let Some(n) = name {
            return Ok(Self::Name(n.to_string()));
        }
        if let Some(c) = category {
            return Ok(Self::Category(c.to_ascii_uppercase().parse()?));
        }
        if let Some(a) = available {
            let flag = matches!(a.to_ascii_lowercase().as_str(), "true" | "yes" | "1");
            return Ok(Self::Available(flag));
        }
        Ok(Self::All)
    }
}

/// Validate the payload and insert it as a new product.
pub async fn create_product(db: &DatabaseConnection, payload: &Value) -> Result<Product, ServiceError> {
    let mut product = Product::from(ProductInput::from_json(payload)?);
    product.create(db).await?;
    info!(id = ?product.id, "product created");
    Ok(product)
}

/// Get product by id.
pub async fn get_product(db: &DatabaseConnection, id: i32) -> Result<Option<Product>, ServiceError> {
    Ok(Product::find(db, id).await?)
}

/// Replace every field of an existing product. Unknown ids are reported as
/// not found before the payload is looked at, and never create a row.
pub async fn update_product(db: &DatabaseConnection, id: i32, payload: &Value) -> Result<Product, ServiceError> {
    let mut product = Product::find(db, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Product", id))?;
    product.deserialize(payload)?;
    product.update(db).await?;
    Ok(product)
}

/// Delete product. Deleting an id that does not exist succeeds.
pub async fn delete_product(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    if let Some(product) = Product::find(db, id).await? {
        product.delete(db).await?;
    }
    Ok(())
}

/// List products matching the filter.
pub async fn list_products(db: &DatabaseConnection, filter: &ProductFilter) -> Result<Vec<Product>, ServiceError> {
    let rows = match filter {
        ProductFilter::All => Product::all(db).await?,
        ProductFilter::Name(name) => Product::find_by_name(db, name).await?,
        ProductFilter::Category(category) => Product::find_by_category(db, *category).await?,
        ProductFilter::Available(flag) => Product::find_by_availability(db, *flag).await?,
    };
    Ok(rows)
}
