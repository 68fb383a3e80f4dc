//! Migration: Create membership_package_map_sub_users table

use sea_orm_migration::prelude::*;

use super::m20261019_000001_create_users::Users;
use super::m20261019_000003_create_membership_packages::MembershipPackages;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MembershipPackageMapSubUsers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MembershipPackageMapSubUsers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MembershipPackageMapSubUsers::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MembershipPackageMapSubUsers::MembershipPackageId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MembershipPackageMapSubUsers::Status)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(MembershipPackageMapSubUsers::CreatedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MembershipPackageMapSubUsers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MembershipPackageMapSubUsers::UpdatedBy)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MembershipPackageMapSubUsers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                MembershipPackageMapSubUsers::Table,
                                MembershipPackageMapSubUsers::UserId,
                            )
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                MembershipPackageMapSubUsers::Table,
                                MembershipPackageMapSubUsers::MembershipPackageId,
                            )
                            .to(MembershipPackages::Table, MembershipPackages::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sub_users_package_status")
                    .table(MembershipPackageMapSubUsers::Table)
                    .col(MembershipPackageMapSubUsers::MembershipPackageId)
                    .col(MembershipPackageMapSubUsers::Status)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // At most one active mapping per (user, package). The schema builder
        // has no partial-index support, so this one is raw SQL.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_sub_users_active_unique \
                 ON membership_package_map_sub_users (user_id, membership_package_id) \
                 WHERE status",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(MembershipPackageMapSubUsers::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
pub enum MembershipPackageMapSubUsers {
    Table,
    Id,
    UserId,
    MembershipPackageId,
    Status,
    CreatedBy,
    CreatedAt,
    UpdatedBy,
    UpdatedAt,
}
