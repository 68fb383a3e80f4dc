//! Migration: Create payment_types table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PaymentTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PaymentTypes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PaymentTypes::PaymentType).string().not_null())
                    .col(
                        ColumnDef::new(PaymentTypes::PaymentTypeKey)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PaymentTypes::Status)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(PaymentTypes::CreatedBy).big_integer().not_null())
                    .col(
                        ColumnDef::new(PaymentTypes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PaymentTypes::UpdatedBy).big_integer().null())
                    .col(
                        ColumnDef::new(PaymentTypes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Names are unique regardless of case
        manager
            .create_index(
                Index::create()
                    .name("idx_payment_types_key")
                    .table(PaymentTypes::Table)
                    .col(PaymentTypes::PaymentTypeKey)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PaymentTypes::Table).if_exists().to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum PaymentTypes {
    Table,
    Id,
    PaymentType,
    PaymentTypeKey,
    Status,
    CreatedBy,
    CreatedAt,
    UpdatedBy,
    UpdatedAt,
}
