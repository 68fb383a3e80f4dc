pub use sea_orm_migration::prelude::*;

mod m20261019_000001_create_users;
mod m20261019_000002_create_payment_types;
mod m20261019_000003_create_membership_packages;
mod m20261019_000004_create_payments;
mod m20261019_000005_create_membership_map_users;
mod m20261019_000006_create_membership_package_map_sub_users;
mod m20261019_000007_create_notifications;
mod m20261019_000008_create_tasks;
mod m20261019_000009_create_reports;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261019_000001_create_users::Migration),
            Box::new(m20261019_000002_create_payment_types::Migration),
            Box::new(m20261019_000003_create_membership_packages::Migration),
            Box::new(m20261019_000004_create_payments::Migration),
            Box::new(m20261019_000005_create_membership_map_users::Migration),
            Box::new(m20261019_000006_create_membership_package_map_sub_users::Migration),
            Box::new(m20261019_000007_create_notifications::Migration),
            Box::new(m20261019_000008_create_tasks::Migration),
            Box::new(m20261019_000009_create_reports::Migration),
        ]
    }
}
