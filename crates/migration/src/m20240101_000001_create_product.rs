//! Create `product` table.
//!
//! `category` holds the enum name as text so both Postgres and SQLite accept it.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Product::Table)
                    .if_not_exists()
                    .col(pk_auto(Product::Id))
                    .col(string_len(Product::Name, 100).not_null())
                    .col(string_len(Product::Description, 250).not_null())
                    .col(decimal_len(Product::Price, 14, 2).not_null())
                    .col(boolean(Product::Available).not_null().default(true))
                    .col(string_len(Product::Category, 32).not_null().default("UNKNOWN"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Product::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Product { Table, Id, Name, Description, Price, Available, Category }
