//! Test helpers shared by the integration tests.
//!
//! Every test gets its own in-memory SQLite database with migrations
//! applied, plus seeders for the rows the membership and task flows need.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;

use propdesk::migrations::Migrator;
use propdesk::models::{
    membership_map_user, membership_package, payment, payment_type, task, user,
};
use propdesk::services::clock::FixedClock;
use propdesk::services::security::create_access_token;
use propdesk::state::AppState;

pub const TEST_PASSWORD: &str = "password123";

/// Create an in-memory SQLite database for testing
pub async fn create_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run test migrations");

    db
}

/// Instant every test clock is frozen at
pub fn test_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

/// App state whose clock never moves
pub fn build_test_app_state(db: DatabaseConnection, instant: DateTime<Utc>) -> AppState {
    AppState::new(db, Arc::new(FixedClock(instant)))
}

/// `Authorization` header value for `user_id`
pub fn bearer_token(user_id: i64) -> String {
    let token = create_access_token(user_id).expect("Failed to create test token");
    format!("Bearer {}", token)
}

/// Active user with every notification flag enabled. `mobile` doubles as
/// the unique seed for the email address.
pub async fn create_test_user(db: &DatabaseConnection, name: &str, mobile: &str) -> user::Model {
    create_test_user_with_flags(db, name, mobile, true, true).await
}

pub async fn create_test_user_with_flags(
    db: &DatabaseConnection,
    name: &str,
    mobile: &str,
    notification_active: bool,
    task_reminder: bool,
) -> user::Model {
    let now = test_instant();
    // Low cost keeps the suite fast; verification accepts any cost.
    let hashed = bcrypt::hash(TEST_PASSWORD, 4).unwrap();

    user::ActiveModel {
        name: Set(name.to_string()),
        email: Set(format!("{}@example.com", mobile)),
        mobile: Set(mobile.to_string()),
        hashed_password: Set(hashed),
        role_id: Set(1),
        industry_type: Set("Real Estate".to_string()),
        notification_active: Set(notification_active),
        notification_whatsapp: Set(true),
        task_reminder: Set(task_reminder),
        biometric_authentication: Set(false),
        accept_policy: Set(true),
        status: Set(true),
        created_by: Set(None),
        created_at: Set(now),
        updated_by: Set(None),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn set_industry(db: &DatabaseConnection, user: user::Model, industry: &str) -> user::Model {
    let mut active: user::ActiveModel = user.into();
    active.industry_type = Set(industry.to_string());
    active.update(db).await.unwrap()
}

pub async fn seed_payment_type(db: &DatabaseConnection, name: &str) -> payment_type::Model {
    let now = test_instant();
    payment_type::ActiveModel {
        payment_type: Set(name.to_string()),
        payment_type_key: Set(name.to_lowercase()),
        status: Set(true),
        created_by: Set(1),
        created_at: Set(now),
        updated_by: Set(None),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_package(
    db: &DatabaseConnection,
    name: &str,
    duration: Option<i32>,
    sub_user_limit: i32,
) -> membership_package::Model {
    let now = test_instant();
    membership_package::ActiveModel {
        package_name: Set(name.to_string()),
        amount: Set(499.0),
        duration: Set(duration),
        sub_user_limit: Set(sub_user_limit),
        status: Set(true),
        created_by: Set(1),
        created_at: Set(now),
        updated_by: Set(None),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_payment(
    db: &DatabaseConnection,
    payment_type_id: i64,
    payer_id: i64,
    status: &str,
) -> payment::Model {
    let now = test_instant();
    payment::ActiveModel {
        payment_type_id: Set(payment_type_id),
        payment_by_user_id: Set(payer_id),
        payment_get_by_user_id: Set(payer_id),
        payment_status: Set(status.to_string()),
        transaction_no: Set(None),
        amount: Set(499.0),
        status: Set(true),
        created_by: Set(payer_id),
        created_at: Set(now),
        updated_by: Set(None),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

/// Inactive, pending membership row linked to `payment_id`
pub async fn seed_membership(
    db: &DatabaseConnection,
    package_id: i64,
    user_id: i64,
    payment_id: Option<i64>,
) -> membership_map_user::Model {
    let now = test_instant();
    membership_map_user::ActiveModel {
        package_id: Set(package_id),
        user_id: Set(user_id),
        membership_expiry_date: Set(None),
        membership_status: Set("inactive".to_string()),
        payment_status: Set("pending".to_string()),
        payment_id: Set(payment_id),
        transaction_no: Set(None),
        status: Set(false),
        created_by: Set(user_id),
        created_at: Set(now),
        updated_by: Set(None),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_task(
    db: &DatabaseConnection,
    assignee_id: i64,
    task_type: &str,
    task_status: &str,
    updated_at: DateTime<Utc>,
) -> task::Model {
    task::ActiveModel {
        title_description: Set("Site visit".to_string()),
        task_name: Set(format!("{} visit", task_type)),
        task_address: Set("12 Harbour Road".to_string()),
        task_type: Set(task_type.to_string()),
        assign_to_id: Set(Some(assignee_id)),
        task_status: Set(task_status.to_string()),
        property_location_id: Set(None),
        property_type_id: Set(None),
        transaction_type_id: Set(None),
        property_sub_type_id: Set(None),
        internal_area: Set(None),
        condition: Set(None),
        washroom: Set(None),
        number_of_parking: Set(0),
        land_area: Set(None),
        price_of_the_property: Set(0.0),
        reference_no: Set(None),
        task_reminder: Set(false),
        status: Set(true),
        created_by: Set(assignee_id),
        created_at: Set(updated_at),
        updated_by: Set(None),
        updated_at: Set(updated_at),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}
