//! Sub-user seats under a membership package.
//!
//! A package's `sub_user_limit` is its capacity and is never written here.
//! Occupancy is the number of active mappings, counted at decision time
//! inside a transaction that holds the package row lock, so concurrent
//! requests for the same package are decided one at a time.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::db::DbConn;
use crate::error::{AppError, Result};
use crate::models::prelude::*;
use crate::schemas::membership::{CreateSubUserRequest, SubUserListQuery, UpdateSubUserRequest};
use crate::schemas::Pagination;
use crate::services::fetch_page;

const ALREADY_MAPPED: &str = "User is already mapped to this membership package";

/// Number of active sub-user mappings on a package
pub async fn active_sub_user_count<C: ConnectionTrait>(conn: &C, package_id: i64) -> Result<u64> {
    let count = MembershipPackageMapSubUser::find()
        .filter(membership_package_map_sub_user::Column::MembershipPackageId.eq(package_id))
        .filter(membership_package_map_sub_user::Column::Status.eq(true))
        .count(conn)
        .await?;
    Ok(count)
}

/// Load a package and lock its row for the rest of the transaction
async fn lock_package<C: ConnectionTrait>(
    conn: &C,
    package_id: i64,
) -> Result<Option<membership_package::Model>> {
    let package = MembershipPackage::find_by_id(package_id)
        .lock_exclusive()
        .one(conn)
        .await?;
    Ok(package)
}

/// Active mapping of `user_id` on `package_id`, other than `exclude_id`
async fn find_active_mapping<C: ConnectionTrait>(
    conn: &C,
    user_id: i64,
    package_id: i64,
    exclude_id: Option<i64>,
) -> Result<Option<membership_package_map_sub_user::Model>> {
    let mut select = MembershipPackageMapSubUser::find()
        .filter(membership_package_map_sub_user::Column::UserId.eq(user_id))
        .filter(membership_package_map_sub_user::Column::MembershipPackageId.eq(package_id))
        .filter(membership_package_map_sub_user::Column::Status.eq(true));
    if let Some(id) = exclude_id {
        select = select.filter(membership_package_map_sub_user::Column::Id.ne(id));
    }
    Ok(select.one(conn).await?)
}

fn has_free_seat(package: &membership_package::Model, occupied: u64) -> bool {
    let capacity = u64::try_from(package.sub_user_limit).unwrap_or(0);
    occupied < capacity
}

pub async fn create_sub_user(
    db: &DbConn,
    req: CreateSubUserRequest,
    actor_id: i64,
    now: DateTime<Utc>,
) -> Result<membership_package_map_sub_user::Model> {
    let (user_id, package_id) = match (req.user_id, req.membership_package_id) {
        (Some(user_id), Some(package_id)) => (user_id, package_id),
        _ => {
            return Err(AppError::BadRequest(
                "User ID and membership package ID are required".to_string(),
            ))
        }
    };
    let status = req.status.unwrap_or(true);

    let txn = db.begin().await?;

    let package = lock_package(&txn, package_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Membership package not found".to_string()))?;

    User::find_by_id(user_id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if find_active_mapping(&txn, user_id, package_id, None)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest(ALREADY_MAPPED.to_string()));
    }

    if status {
        let occupied = active_sub_user_count(&txn, package_id).await?;
        if !has_free_seat(&package, occupied) {
            tracing::info!(
                package_id,
                occupied,
                capacity = package.sub_user_limit,
                "Sub-user rejected, package full"
            );
            return Err(AppError::BadRequest(format!(
                "Cannot add more sub-users. Package limit ({}) has been reached.",
                package.sub_user_limit
            )));
        }
    }

    let mapping = membership_package_map_sub_user::ActiveModel {
        user_id: Set(user_id),
        membership_package_id: Set(package_id),
        status: Set(status),
        created_by: Set(actor_id),
        created_at: Set(now),
        updated_by: Set(None),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .map_err(|e| AppError::from_unique_violation(e, ALREADY_MAPPED))?;

    txn.commit().await?;

    tracing::info!(
        package_sub_user_id = mapping.id,
        user_id,
        package_id,
        "Sub-user mapped"
    );
    Ok(mapping)
}

/// Update a mapping. Moving it, re-assigning it, or reactivating it
/// re-checks the destination package's free seats.
pub async fn update_sub_user(
    db: &DbConn,
    req: UpdateSubUserRequest,
    actor_id: i64,
    now: DateTime<Utc>,
) -> Result<membership_package_map_sub_user::Model> {
    let id = req
        .package_sub_user_id
        .ok_or_else(|| AppError::BadRequest("Package sub-user ID is required".to_string()))?;

    let txn = db.begin().await?;

    let existing = MembershipPackageMapSubUser::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("Membership package map sub-user not found".to_string())
        })?;

    let target_package_id = req
        .membership_package_id
        .unwrap_or(existing.membership_package_id);
    let target_user_id = req.user_id.unwrap_or(existing.user_id);
    let target_status = req.status.unwrap_or(existing.status);
    let moving = target_package_id != existing.membership_package_id;

    let package = lock_package(&txn, target_package_id).await?;
    let package = match (package, moving) {
        (Some(package), _) => package,
        (None, true) => {
            return Err(AppError::NotFound(
                "New membership package not found".to_string(),
            ))
        }
        (None, false) => {
            return Err(AppError::NotFound(
                "Membership package not found".to_string(),
            ))
        }
    };

    if req.user_id.is_some() && target_user_id != existing.user_id {
        User::find_by_id(target_user_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    }

    let takes_new_seat = target_status && (moving || !existing.status);
    let changes_holder = target_status && target_user_id != existing.user_id;

    if takes_new_seat || changes_holder {
        if find_active_mapping(&txn, target_user_id, target_package_id, Some(id))
            .await?
            .is_some()
        {
            return Err(AppError::BadRequest(ALREADY_MAPPED.to_string()));
        }
    }

    if takes_new_seat {
        let occupied = active_sub_user_count(&txn, target_package_id).await?;
        if !has_free_seat(&package, occupied) {
            let message = if moving {
                format!(
                    "Cannot move to new package. Package limit ({}) has been reached.",
                    package.sub_user_limit
                )
            } else {
                format!(
                    "Cannot add more sub-users. Package limit ({}) has been reached.",
                    package.sub_user_limit
                )
            };
            return Err(AppError::BadRequest(message));
        }
    }

    let mut active: membership_package_map_sub_user::ActiveModel = existing.into();
    active.user_id = Set(target_user_id);
    active.membership_package_id = Set(target_package_id);
    active.status = Set(target_status);
    active.updated_by = Set(Some(actor_id));
    active.updated_at = Set(now);

    let mapping = active
        .update(&txn)
        .await
        .map_err(|e| AppError::from_unique_violation(e, ALREADY_MAPPED))?;

    txn.commit().await?;

    tracing::info!(
        package_sub_user_id = mapping.id,
        package_id = target_package_id,
        moved = moving,
        "Sub-user mapping updated"
    );
    Ok(mapping)
}

pub async fn get_sub_user(
    db: &DbConn,
    id: i64,
) -> Result<membership_package_map_sub_user::Model> {
    MembershipPackageMapSubUser::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Membership package map sub-user not found".to_string()))
}

pub async fn list_sub_users(
    db: &DbConn,
    query: &SubUserListQuery,
) -> Result<(Vec<membership_package_map_sub_user::Model>, Pagination)> {
    let mut select = MembershipPackageMapSubUser::find();

    if let Some(status) = query.status {
        select = select.filter(membership_package_map_sub_user::Column::Status.eq(status));
    }
    if let Some(user_id) = query.user_id {
        select = select.filter(membership_package_map_sub_user::Column::UserId.eq(user_id));
    }
    if let Some(package_id) = query.membership_package_id {
        select = select
            .filter(membership_package_map_sub_user::Column::MembershipPackageId.eq(package_id));
    }

    let select = select
        .order_by_desc(membership_package_map_sub_user::Column::CreatedAt)
        .order_by_desc(membership_package_map_sub_user::Column::Id);

    fetch_page(db, select, query.page_query()).await
}
