//! Migration: Create membership_map_users table

use sea_orm_migration::prelude::*;

use super::m20261019_000001_create_users::Users;
use super::m20261019_000003_create_membership_packages::MembershipPackages;
use super::m20261019_000004_create_payments::Payments;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MembershipMapUsers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MembershipMapUsers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MembershipMapUsers::PackageId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MembershipMapUsers::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MembershipMapUsers::MembershipExpiryDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MembershipMapUsers::MembershipStatus)
                            .string()
                            .not_null()
                            .default("inactive"),
                    )
                    .col(
                        ColumnDef::new(MembershipMapUsers::PaymentStatus)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(MembershipMapUsers::PaymentId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MembershipMapUsers::TransactionNo)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MembershipMapUsers::Status)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(MembershipMapUsers::CreatedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MembershipMapUsers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MembershipMapUsers::UpdatedBy)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MembershipMapUsers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MembershipMapUsers::Table, MembershipMapUsers::PackageId)
                            .to(MembershipPackages::Table, MembershipPackages::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MembershipMapUsers::Table, MembershipMapUsers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MembershipMapUsers::Table, MembershipMapUsers::PaymentId)
                            .to(Payments::Table, Payments::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_membership_map_users_payment")
                    .table(MembershipMapUsers::Table)
                    .col(MembershipMapUsers::PaymentId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_membership_map_users_user_status")
                    .table(MembershipMapUsers::Table)
                    .col(MembershipMapUsers::UserId)
                    .col(MembershipMapUsers::MembershipStatus)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(MembershipMapUsers::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
pub enum MembershipMapUsers {
    Table,
    Id,
    PackageId,
    UserId,
    MembershipExpiryDate,
    MembershipStatus,
    PaymentStatus,
    PaymentId,
    TransactionNo,
    Status,
    CreatedBy,
    CreatedAt,
    UpdatedBy,
    UpdatedAt,
}
