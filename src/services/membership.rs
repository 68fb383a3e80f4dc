//! User to package bindings.
//!
//! Rows are never deleted; a row becomes a live membership only through a
//! completed payment cascade. Expiry is not swept: a membership whose
//! expiry date has passed simply stops being returned as active.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Serialize;

use crate::db::DbConn;
use crate::error::{AppError, Result};
use crate::models::membership_map_user::MembershipStatus;
use crate::models::payment::PaymentStatus;
use crate::models::prelude::*;
use crate::schemas::membership::{
    CreateMembershipMapUserRequest, MembershipMapUserListQuery, UpdateMembershipMapUserRequest,
};
use crate::schemas::Pagination;
use crate::services::fetch_page;

/// Active membership joined with its package
#[derive(Debug, Serialize)]
pub struct ActiveMembership {
    #[serde(flatten)]
    pub membership: membership_map_user::Model,
    pub package: Option<membership_package::Model>,
}

async fn ensure_package(db: &DbConn, package_id: i64) -> Result<()> {
    MembershipPackage::find_by_id(package_id)
        .one(db)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::NotFound("Membership package not found".to_string()))
}

async fn ensure_user(db: &DbConn, user_id: i64) -> Result<()> {
    User::find_by_id(user_id)
        .one(db)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

async fn ensure_payment(db: &DbConn, payment_id: i64) -> Result<()> {
    Payment::find_by_id(payment_id)
        .one(db)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::NotFound("Payment not found".to_string()))
}

/// Record a subscription attempt. The row starts inactive and pending until
/// its payment completes.
pub async fn create_membership_map_user(
    db: &DbConn,
    req: CreateMembershipMapUserRequest,
    actor_id: i64,
    now: DateTime<Utc>,
) -> Result<membership_map_user::Model> {
    let package_id = req
        .package_id
        .ok_or_else(|| AppError::BadRequest("Package ID is required".to_string()))?;
    let user_id = req
        .user_id
        .ok_or_else(|| AppError::BadRequest("User ID is required".to_string()))?;

    ensure_package(db, package_id).await?;
    ensure_user(db, user_id).await?;
    if let Some(payment_id) = req.payment_id {
        ensure_payment(db, payment_id).await?;
    }

    let membership = membership_map_user::ActiveModel {
        package_id: Set(package_id),
        user_id: Set(user_id),
        membership_expiry_date: Set(None),
        membership_status: Set(MembershipStatus::Inactive.as_str().to_string()),
        payment_status: Set(PaymentStatus::Pending.as_str().to_string()),
        payment_id: Set(req.payment_id),
        transaction_no: Set(None),
        status: Set(req.status.unwrap_or(false)),
        created_by: Set(actor_id),
        created_at: Set(now),
        updated_by: Set(None),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::info!(
        membership_map_id = membership.id,
        user_id,
        package_id,
        "Membership map user created"
    );
    Ok(membership)
}

pub async fn update_membership_map_user(
    db: &DbConn,
    req: UpdateMembershipMapUserRequest,
    actor_id: i64,
    now: DateTime<Utc>,
) -> Result<membership_map_user::Model> {
    let id = req
        .id
        .ok_or_else(|| AppError::BadRequest("Membership map ID is required".to_string()))?;

    let existing = MembershipMapUser::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Membership map user not found".to_string()))?;

    let mut active: membership_map_user::ActiveModel = existing.into();
    if let Some(package_id) = req.package_id {
        ensure_package(db, package_id).await?;
        active.package_id = Set(package_id);
    }
    if let Some(user_id) = req.user_id {
        ensure_user(db, user_id).await?;
        active.user_id = Set(user_id);
    }
    if let Some(payment_id) = req.payment_id {
        ensure_payment(db, payment_id).await?;
        active.payment_id = Set(Some(payment_id));
    }
    if let Some(status) = req.status {
        active.status = Set(status);
    }
    active.updated_by = Set(Some(actor_id));
    active.updated_at = Set(now);

    let membership = active.update(db).await?;
    tracing::info!(membership_map_id = membership.id, "Membership map user updated");
    Ok(membership)
}

pub async fn get_membership_map_user(db: &DbConn, id: i64) -> Result<membership_map_user::Model> {
    MembershipMapUser::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Membership map user not found".to_string()))
}

pub async fn list_membership_map_users(
    db: &DbConn,
    query: &MembershipMapUserListQuery,
) -> Result<(Vec<membership_map_user::Model>, Pagination)> {
    let mut select = MembershipMapUser::find();

    if let Some(status) = query.status {
        select = select.filter(membership_map_user::Column::Status.eq(status));
    }
    if let Some(package_id) = query.package_id {
        select = select.filter(membership_map_user::Column::PackageId.eq(package_id));
    }
    if let Some(user_id) = query.user_id {
        select = select.filter(membership_map_user::Column::UserId.eq(user_id));
    }

    let select = select
        .order_by_desc(membership_map_user::Column::CreatedAt)
        .order_by_desc(membership_map_user::Column::Id);

    fetch_page(db, select, query.page_query()).await
}

/// Memberships of `user_id` that are active and not yet expired at `now`
pub async fn active_memberships(
    db: &DbConn,
    user_id: i64,
    now: DateTime<Utc>,
) -> Result<Vec<ActiveMembership>> {
    let rows = MembershipMapUser::find()
        .filter(membership_map_user::Column::UserId.eq(user_id))
        .filter(
            membership_map_user::Column::MembershipStatus.eq(MembershipStatus::Active.as_str()),
        )
        .filter(
            Condition::any()
                .add(membership_map_user::Column::MembershipExpiryDate.is_null())
                .add(membership_map_user::Column::MembershipExpiryDate.gt(now)),
        )
        .find_also_related(MembershipPackage)
        .order_by_desc(membership_map_user::Column::CreatedAt)
        .order_by_desc(membership_map_user::Column::Id)
        .all(db)
        .await?;

    tracing::debug!(user_id, count = rows.len(), "Loaded active memberships");

    Ok(rows
        .into_iter()
        .map(|(membership, package)| ActiveMembership {
            membership,
            package,
        })
        .collect())
}
