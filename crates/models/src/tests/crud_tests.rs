use anyhow::Result;
use sea_orm::prelude::Decimal;

use super::{product_batch, product_factory, setup_test_db};
use crate::errors::ModelError;
use crate::product::{Category, Product};

/// Test create assigns an id
#[tokio::test]
async fn test_create_a_product() -> Result<()> {
    let db = setup_test_db().await?;
    let mut product = product_factory(1);
    assert!(product.id.is_none());

    product.create(&db).await?;
    assert!(product.id.is_some());
    assert_eq!(Product::all(&db).await?.len(), 1);
    Ok(())
}

/// Test create ignores a caller supplied id
#[tokio::test]
async fn test_create_ignores_existing_id() -> Result<()> {
    let db = setup_test_db().await?;
    let mut first = product_factory(0);
    first.create(&db).await?;

    let mut second = product_factory(1);
    second.id = first.id;
    second.create(&db).await?;
    assert_ne!(second.id, first.id);
    assert_eq!(Product::all(&db).await?.len(), 2);
    Ok(())
}

/// Test read back every field
#[tokio::test]
async fn test_read_a_product() -> Result<()> {
    let db = setup_test_db().await?;
    let mut product = product_factory(2);
    product.create(&db).await?;

    let found = Product::find(&db, product.id.unwrap()).await?.expect("product exists");
    assert_eq!(found.id, product.id);
    assert_eq!(found.name, product.name);
    assert_eq!(found.description, product.description);
    assert_eq!(found.price, product.price);
    assert_eq!(found.available, product.available);
    assert_eq!(found.category, product.category);
    Ok(())
}

#[tokio::test]
async fn test_find_missing_returns_none() -> Result<()> {
    let db = setup_test_db().await?;
    assert!(Product::find(&db, 99_999).await?.is_none());
    Ok(())
}

/// Test create hands back the price as stored, not as given
#[tokio::test]
async fn test_create_reflects_stored_price() -> Result<()> {
    let db = setup_test_db().await?;
    let mut product = product_factory(0);
    product.price = Decimal::new(12555, 3);
    product.create(&db).await?;
    assert_eq!(product.serialize().price, "12.56");

    let found = Product::find(&db, product.id.unwrap()).await?.expect("product exists");
    assert_eq!(found.serialize(), product.serialize());
    Ok(())
}

/// Test update overwrites fields and keeps the id
#[tokio::test]
async fn test_update_a_product() -> Result<()> {
    let db = setup_test_db().await?;
    let mut product = product_factory(3);
    product.create(&db).await?;
    let original_id = product.id;

    product.description = "Updated Description".into();
    product.category = Category::Tools;
    product.update(&db).await?;
    assert_eq!(product.id, original_id);

    let all = Product::all(&db).await?;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, original_id);
    assert_eq!(all[0].description, "Updated Description");
    assert_eq!(all[0].category, Category::Tools);
    Ok(())
}

#[tokio::test]
async fn test_update_without_id_is_rejected() -> Result<()> {
    let db = setup_test_db().await?;
    let mut product = product_factory(4);
    let err = product.update(&db).await.unwrap_err();
    assert!(matches!(err, ModelError::MissingId));
    Ok(())
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found_and_creates_nothing() -> Result<()> {
    let db = setup_test_db().await?;
    let mut product = product_factory(4);
    product.id = Some(4242);
    let err = product.update(&db).await.unwrap_err();
    assert!(matches!(err, ModelError::NotFound { id: 4242, .. }));
    assert!(Product::all(&db).await?.is_empty());
    Ok(())
}

/// Test delete, including deleting twice
#[tokio::test]
async fn test_delete_a_product() -> Result<()> {
    let db = setup_test_db().await?;
    let mut product = product_factory(5);
    product.create(&db).await?;
    assert_eq!(Product::all(&db).await?.len(), 1);

    product.delete(&db).await?;
    assert_eq!(Product::all(&db).await?.len(), 0);

    // already gone: still fine
    product.delete(&db).await?;
    assert!(!Product::delete_by_id(&db, product.id.unwrap()).await?);
    Ok(())
}

#[tokio::test]
async fn test_delete_without_id_is_rejected() -> Result<()> {
    let db = setup_test_db().await?;
    let err = product_factory(0).delete(&db).await.unwrap_err();
    assert!(matches!(err, ModelError::MissingId));
    Ok(())
}

/// Test listing after N inserts
#[tokio::test]
async fn test_list_all_products() -> Result<()> {
    let db = setup_test_db().await?;
    assert_eq!(Product::all(&db).await?.len(), 0);

    for mut product in product_batch(5) {
        product.create(&db).await?;
    }
    assert_eq!(Product::all(&db).await?.len(), 5);
    Ok(())
}

#[tokio::test]
async fn test_finders_on_empty_store() -> Result<()> {
    let db = setup_test_db().await?;
    assert!(Product::find_by_name(&db, "Hat").await?.is_empty());
    assert!(Product::find_by_availability(&db, true).await?.is_empty());
    assert!(Product::find_by_category(&db, Category::Food).await?.is_empty());
    assert!(Product::find_by_price(&db, Decimal::new(1025, 2)).await?.is_empty());
    Ok(())
}

/// Test find by name returns exactly the matching subset
#[tokio::test]
async fn test_find_by_name() -> Result<()> {
    let db = setup_test_db().await?;
    for mut product in product_batch(10) {
        product.create(&db).await?;
    }
    let all = Product::all(&db).await?;
    let name = all[0].name.clone();
    let expected: Vec<_> = all.iter().filter(|p| p.name == name).cloned().collect();

    let found = Product::find_by_name(&db, &name).await?;
    assert_eq!(found.len(), expected.len());
    assert_eq!(found, expected);
    Ok(())
}

/// Test find by availability for both flags
#[tokio::test]
async fn test_find_by_availability() -> Result<()> {
    let db = setup_test_db().await?;
    for mut product in product_batch(10) {
        product.create(&db).await?;
    }
    let all = Product::all(&db).await?;
    for flag in [true, false] {
        let expected: Vec<_> = all.iter().filter(|p| p.available == flag).cloned().collect();
        let found = Product::find_by_availability(&db, flag).await?;
        assert_eq!(found, expected);
    }
    Ok(())
}

/// Test find by category for every category
#[tokio::test]
async fn test_find_by_category() -> Result<()> {
    let db = setup_test_db().await?;
    for mut product in product_batch(10) {
        product.create(&db).await?;
    }
    let all = Product::all(&db).await?;
    for category in Category::ALL {
        let expected: Vec<_> = all.iter().filter(|p| p.category == category).cloned().collect();
        let found = Product::find_by_category(&db, category).await?;
        assert_eq!(found, expected, "category {category}");
    }
    Ok(())
}

#[tokio::test]
async fn test_find_by_price() -> Result<()> {
    let db = setup_test_db().await?;
    for mut product in product_batch(4) {
        product.create(&db).await?;
    }
    let target = product_factory(2).price;
    let found = Product::find_by_price(&db, target).await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].price, target);

    let by_text = Product::find_by_price_str(&db, &format!(" \"{target}\" ")).await?;
    assert_eq!(by_text, found);

    let err = Product::find_by_price_str(&db, "cheap").await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
    Ok(())
}

/// Test deserialize(serialize(create(p))) gives back p with its id
#[tokio::test]
async fn test_serialize_round_trip_after_create() -> Result<()> {
    let db = setup_test_db().await?;
    let mut product = product_factory(7);
    product.create(&db).await?;

    let doc = serde_json::to_value(product.serialize())?;
    assert_eq!(doc["id"], serde_json::json!(product.id.unwrap()));

    let mut restored = Product { id: product.id, ..Product::default() };
    restored.deserialize(&doc)?;
    assert_eq!(restored, product);
    Ok(())
}
