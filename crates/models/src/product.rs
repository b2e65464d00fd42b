//! Product entity.
//!
//! `Model` is the row as sea-orm sees it. `Product` is the in-memory record the
//! service works with: it carries an optional id until it has been created, and
//! knows how to read itself from a JSON payload and write itself back out.

use std::{fmt, str::FromStr};

use sea_orm::{
    entity::prelude::*,
    ActiveValue::{NotSet, Set, Unchanged},
    DatabaseConnection, DbErr, QueryFilter, QueryOrder, Select,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::errors::{DataValidationError, ModelError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    #[sea_orm(string_value = "UNKNOWN")]
    Unknown,
    #[sea_orm(string_value = "CLOTHS")]
    Cloths,
    #[sea_orm(string_value = "FOOD")]
    Food,
    #[sea_orm(string_value = "HOUSEWARES")]
    Housewares,
    #[sea_orm(string_value = "AUTOMOTIVE")]
    Automotive,
    #[sea_orm(string_value = "TOOLS")]
    Tools,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Unknown,
        Category::Cloths,
        Category::Food,
        Category::Housewares,
        Category::Automotive,
        Category::Tools,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Unknown => "UNKNOWN",
            Category::Cloths => "CLOTHS",
            Category::Food => "FOOD",
            Category::Housewares => "HOUSEWARES",
            Category::Automotive => "AUTOMOTIVE",
            Category::Tools => "TOOLS",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive match on the enumerated name.
impl FromStr for Category {
    type Err = DataValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DataValidationError::InvalidCategory(s.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: String,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub price: Decimal,
    pub available: bool,
    pub category: Category,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Decimal places of the `price` column.
pub const PRICE_SCALE: u32 = 2;

/// Bring a price to the column scale, rounding half away from zero the way the
/// store does. `12.5` and `12.50` both come out as `12.50`.
pub fn normalize_price(mut price: Decimal) -> Decimal {
    price.rescale(PRICE_SCALE);
    price
}

/// Parse a price the way clients send it: a decimal string (surrounding
/// blanks and quotes are tolerated) or a JSON number.
pub fn parse_price(raw: &str) -> Result<Decimal, DataValidationError> {
    let cleaned = raw.trim_matches(|c: char| c == ' ' || c == '"');
    Decimal::from_str(cleaned)
        .or_else(|_| Decimal::from_scientific(cleaned))
        .map(normalize_price)
        .map_err(|_| DataValidationError::InvalidPrice(raw.to_string()))
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn required<'a>(obj: &'a Map<String, Value>, field: &'static str) -> Result<&'a Value, DataValidationError> {
    obj.get(field).ok_or(DataValidationError::MissingField(field))
}

fn string_field(obj: &Map<String, Value>, field: &'static str) -> Result<String, DataValidationError> {
    required(obj, field)?
        .as_str()
        .map(str::to_string)
        .ok_or(DataValidationError::InvalidType { field, expected: "string" })
}

/// Validated contents of a create/update payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub available: bool,
    pub category: Category,
}

impl ProductInput {
    /// Validate a JSON payload field by field. An `id` key, if present, is ignored.
    pub fn from_json(payload: &Value) -> Result<Self, DataValidationError> {
        let obj = payload
            .as_object()
            .ok_or_else(|| DataValidationError::NotAnObject(json_kind(payload)))?;

        let name = string_field(obj, "name")?;
        let description = string_field(obj, "description")?;
        let price = match required(obj, "price")? {
            Value::String(s) => parse_price(s)?,
            Value::Number(n) => parse_price(&n.to_string())?,
            other => return Err(DataValidationError::InvalidPrice(other.to_string())),
        };
        let available = required(obj, "available")?
            .as_bool()
            .ok_or(DataValidationError::InvalidType { field: "available", expected: "boolean" })?;
        let category = match required(obj, "category")? {
            Value::String(s) => s.parse::<Category>()?,
            _ => return Err(DataValidationError::InvalidType { field: "category", expected: "string" }),
        };

        Ok(Self { name, description, price, available, category })
    }
}

/// Outbound JSON shape of a product. `price` travels as a string so no
/// precision is lost to floating point on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDocument {
    pub id: Option<i32>,
    pub name: String,
    pub description: String,
    pub price: String,
    pub available: bool,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Option<i32>,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub available: bool,
    pub category: Category,
}

impl Default for Product {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: String::new(),
            price: Decimal::ZERO,
            available: true,
            category: Category::Unknown,
        }
    }
}

impl From<Model> for Product {
    fn from(m: Model) -> Self {
        Self {
            id: Some(m.id),
            name: m.name,
            description: m.description,
            price: normalize_price(m.price),
            available: m.available,
            category: m.category,
        }
    }
}

impl From<ProductInput> for Product {
    fn from(input: ProductInput) -> Self {
        let mut p = Product::default();
        p.apply(input);
        p
    }
}

impl Product {
    pub fn new(name: &str, description: &str, price: Decimal, available: bool, category: Category) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            description: description.to_string(),
            price,
            available,
            category,
        }
    }

    /// Overwrite every field except `id`.
    pub fn apply(&mut self, input: ProductInput) {
        self.name = input.name;
        self.description = input.description;
        self.price = input.price;
        self.available = input.available;
        self.category = input.category;
    }

    /// Populate fields from a JSON payload. On error the product is left untouched.
    pub fn deserialize(&mut self, payload: &Value) -> Result<&mut Self, DataValidationError> {
        let input = ProductInput::from_json(payload)?;
        self.apply(input);
        Ok(self)
    }

    pub fn serialize(&self) -> ProductDocument {
        ProductDocument {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            price: normalize_price(self.price).to_string(),
            available: self.available,
            category: self.category,
        }
    }

    /// Insert as a new row. Any id already held is discarded, and every field
    /// is refreshed from the stored row.
    pub async fn create(&mut self, db: &DatabaseConnection) -> Result<(), ModelError> {
        info!(name = %self.name, "creating product");
        let am = ActiveModel {
            id: NotSet,
            name: Set(self.name.clone()),
            description: Set(self.description.clone()),
            price: Set(normalize_price(self.price)),
            available: Set(self.available),
            category: Set(self.category),
        };
        let saved = am.insert(db).await?;
        *self = Product::from(saved);
        Ok(())
    }

    /// Write all fields over the row with this product's id, then refresh from
    /// the stored row.
    pub async fn update(&mut self, db: &DatabaseConnection) -> Result<(), ModelError> {
        let id = self.id.ok_or(ModelError::MissingId)?;
        info!(id, name = %self.name, "saving product");
        let am = ActiveModel {
            id: Unchanged(id),
            name: Set(self.name.clone()),
            description: Set(self.description.clone()),
            price: Set(normalize_price(self.price)),
            available: Set(self.available),
            category: Set(self.category),
        };
        match am.update(db).await {
            Ok(saved) => {
                *self = Product::from(saved);
                Ok(())
            }
            Err(DbErr::RecordNotUpdated | DbErr::RecordNotFound(_)) => Err(ModelError::NotFound { entity: "product", id }),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove this product's row. A row that is already gone is not an error.
    pub async fn delete(&self, db: &DatabaseConnection) -> Result<(), ModelError> {
        let id = self.id.ok_or(ModelError::MissingId)?;
        info!(id, name = %self.name, "deleting product");
        Self::delete_by_id(db, id).await?;
        Ok(())
    }

    /// Returns whether a row was removed.
    pub async fn delete_by_id(db: &DatabaseConnection, id: i32) -> Result<bool, ModelError> {
        let res = Entity::delete_by_id(id).exec(db).await?;
        Ok(res.rows_affected > 0)
    }

    pub async fn find(db: &DatabaseConnection, id: i32) -> Result<Option<Product>, ModelError> {
        debug!(id, "looking up product");
        let found = Entity::find_by_id(id).one(db).await?;
        Ok(found.map(Product::from))
    }

    pub async fn all(db: &DatabaseConnection) -> Result<Vec<Product>, ModelError> {
        debug!("listing all products");
        Self::fetch(db, Entity::find()).await
    }

    pub async fn find_by_name(db: &DatabaseConnection, name: &str) -> Result<Vec<Product>, ModelError> {
        debug!(%name, "products by name");
        Self::fetch(db, Entity::find().filter(Column::Name.eq(name))).await
    }

    pub async fn find_by_availability(db: &DatabaseConnection, available: bool) -> Result<Vec<Product>, ModelError> {
        debug!(available, "products by availability");
        Self::fetch(db, Entity::find().filter(Column::Available.eq(available))).await
    }

    pub async fn find_by_category(db: &DatabaseConnection, category: Category) -> Result<Vec<Product>, ModelError> {
        debug!(%category, "products by category");
        Self::fetch(db, Entity::find().filter(Column::Category.eq(category))).await
    }

    pub async fn find_by_price(db: &DatabaseConnection, price: Decimal) -> Result<Vec<Product>, ModelError> {
        debug!(%price, "products by price");
        Self::fetch(db, Entity::find().filter(Column::Price.eq(price))).await
    }

    /// Same as [`Product::find_by_price`] but takes the price as text.
    pub async fn find_by_price_str(db: &DatabaseConnection, price: &str) -> Result<Vec<Product>, ModelError> {
        let price = parse_price(price)?;
        Self::find_by_price(db, price).await
    }

    async fn fetch(db: &DatabaseConnection, select: Select<Entity>) -> Result<Vec<Product>, ModelError> {
        let rows = select.order_by_asc(Column::Id).all(db).await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }
}
