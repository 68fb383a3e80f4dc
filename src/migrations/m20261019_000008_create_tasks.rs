//! Migration: Create tasks table

use sea_orm_migration::prelude::*;

use super::m20261019_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tasks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tasks::TitleDescription).text().not_null())
                    .col(ColumnDef::new(Tasks::TaskName).string().not_null())
                    .col(ColumnDef::new(Tasks::TaskAddress).string().not_null())
                    .col(ColumnDef::new(Tasks::TaskType).string().not_null())
                    .col(ColumnDef::new(Tasks::AssignToId).big_integer().null())
                    .col(
                        ColumnDef::new(Tasks::TaskStatus)
                            .string()
                            .not_null()
                            .default("Pending"),
                    )
                    .col(ColumnDef::new(Tasks::PropertyLocationId).big_integer().null())
                    .col(ColumnDef::new(Tasks::PropertyTypeId).big_integer().null())
                    .col(ColumnDef::new(Tasks::TransactionTypeId).big_integer().null())
                    .col(ColumnDef::new(Tasks::PropertySubTypeId).big_integer().null())
                    .col(ColumnDef::new(Tasks::InternalArea).string().null())
                    .col(ColumnDef::new(Tasks::Condition).big_integer().null())
                    .col(ColumnDef::new(Tasks::Washroom).big_integer().null())
                    .col(
                        ColumnDef::new(Tasks::NumberOfParking)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Tasks::LandArea).string().null())
                    .col(
                        ColumnDef::new(Tasks::PriceOfTheProperty)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Tasks::ReferenceNo).string().null())
                    .col(
                        ColumnDef::new(Tasks::TaskReminder)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Tasks::Status)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Tasks::CreatedBy).big_integer().not_null())
                    .col(
                        ColumnDef::new(Tasks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Tasks::UpdatedBy).big_integer().null())
                    .col(
                        ColumnDef::new(Tasks::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Tasks::Table, Tasks::AssignToId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_assignee_status")
                    .table(Tasks::Table)
                    .col(Tasks::AssignToId)
                    .col(Tasks::TaskStatus)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tasks::Table).if_exists().to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Tasks {
    Table,
    Id,
    TitleDescription,
    TaskName,
    TaskAddress,
    TaskType,
    AssignToId,
    TaskStatus,
    PropertyLocationId,
    PropertyTypeId,
    TransactionTypeId,
    PropertySubTypeId,
    InternalArea,
    Condition,
    Washroom,
    NumberOfParking,
    LandArea,
    PriceOfTheProperty,
    ReferenceNo,
    TaskReminder,
    Status,
    CreatedBy,
    CreatedAt,
    UpdatedBy,
    UpdatedAt,
}
