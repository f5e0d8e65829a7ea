//! Expenses table.
//!
//! Built with the schema builder so the same migration runs on `PostgreSQL`
//! and `SQLite`.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Expenses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Expenses::Title).string_len(100).not_null())
                    .col(ColumnDef::new(Expenses::Description).text().null())
                    .col(ColumnDef::new(Expenses::Date).date_time().not_null())
                    .col(ColumnDef::new(Expenses::Amount).decimal_len(12, 2).not_null())
                    .col(ColumnDef::new(Expenses::PaymentType).small_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Month filtering scans by date.
        manager
            .create_index(
                Index::create()
                    .name("idx_expenses_date")
                    .table(Expenses::Table)
                    .col(Expenses::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Expenses::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Expenses {
    Table,
    Id,
    Title,
    Description,
    Date,
    Amount,
    PaymentType,
}
