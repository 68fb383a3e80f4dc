use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::db::DbConn;
use crate::error::{AppError, Result};
use crate::models::prelude::*;
use crate::schemas::membership::{
    CreatePackageRequest, PackageListQuery, PackageResponse, UpdatePackageRequest,
};
use crate::schemas::Pagination;
use crate::services::sub_user::active_sub_user_count;
use crate::services::{fetch_page, non_blank};

fn validate_amount(amount: f64) -> Result<()> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(AppError::BadRequest(
            "Amount must be greater than 0".to_string(),
        ))
    }
}

fn validate_sub_user_limit(limit: i32) -> Result<()> {
    if limit >= 0 {
        Ok(())
    } else {
        Err(AppError::BadRequest(
            "Sub user limit must be 0 or greater".to_string(),
        ))
    }
}

/// Longest package term accepted, in days
pub const MAX_DURATION_DAYS: i32 = 36_500;

fn validate_duration(days: i32) -> Result<()> {
    if days < 0 {
        return Err(AppError::BadRequest(
            "Duration must be 0 or greater".to_string(),
        ));
    }
    if days > MAX_DURATION_DAYS {
        return Err(AppError::BadRequest(format!(
            "Duration must be at most {} days",
            MAX_DURATION_DAYS
        )));
    }
    Ok(())
}

async fn with_occupancy(db: &DbConn, package: membership_package::Model) -> Result<PackageResponse> {
    let active = active_sub_user_count(db, package.id).await?;
    Ok(PackageResponse::new(package, active))
}

pub async fn create_package(
    db: &DbConn,
    req: CreatePackageRequest,
    actor_id: i64,
    now: DateTime<Utc>,
) -> Result<PackageResponse> {
    let package_name = non_blank(req.package_name)
        .ok_or_else(|| AppError::BadRequest("Package name is required".to_string()))?;
    let amount = req
        .amount
        .ok_or_else(|| AppError::BadRequest("Amount is required".to_string()))?;
    validate_amount(amount)?;
    let sub_user_limit = req.sub_user_limit.unwrap_or(0);
    validate_sub_user_limit(sub_user_limit)?;
    if let Some(days) = req.duration {
        validate_duration(days)?;
    }

    let package = membership_package::ActiveModel {
        package_name: Set(package_name),
        amount: Set(amount),
        duration: Set(req.duration),
        sub_user_limit: Set(sub_user_limit),
        status: Set(req.status.unwrap_or(true)),
        created_by: Set(actor_id),
        created_at: Set(now),
        updated_by: Set(None),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::info!(
        package_id = package.id,
        sub_user_limit,
        "Membership package created"
    );
    Ok(PackageResponse::new(package, 0))
}

/// Partial update. This is the only path that changes a package's capacity.
pub async fn update_package(
    db: &DbConn,
    req: UpdatePackageRequest,
    actor_id: i64,
    now: DateTime<Utc>,
) -> Result<PackageResponse> {
    let id = req
        .id
        .ok_or_else(|| AppError::BadRequest("Package ID is required in request body".to_string()))?;

    if let Some(amount) = req.amount {
        validate_amount(amount)?;
    }
    if let Some(limit) = req.sub_user_limit {
        validate_sub_user_limit(limit)?;
    }
    if let Some(days) = req.duration {
        validate_duration(days)?;
    }

    let existing = MembershipPackage::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Membership package not found".to_string()))?;

    let mut active: membership_package::ActiveModel = existing.into();
    if let Some(name) = non_blank(req.package_name) {
        active.package_name = Set(name);
    }
    if let Some(amount) = req.amount {
        active.amount = Set(amount);
    }
    if let Some(days) = req.duration {
        active.duration = Set(Some(days));
    }
    if let Some(limit) = req.sub_user_limit {
        active.sub_user_limit = Set(limit);
    }
    if let Some(status) = req.status {
        active.status = Set(status);
    }
    active.updated_by = Set(Some(actor_id));
    active.updated_at = Set(now);

    let package = active.update(db).await?;
    tracing::info!(package_id = package.id, "Membership package updated");
    with_occupancy(db, package).await
}

pub async fn get_package(db: &DbConn, id: i64) -> Result<PackageResponse> {
    let package = MembershipPackage::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Membership package not found".to_string()))?;
    with_occupancy(db, package).await
}

pub async fn list_packages(
    db: &DbConn,
    query: &PackageListQuery,
) -> Result<(Vec<PackageResponse>, Pagination)> {
    let mut select = MembershipPackage::find();

    if let Some(status) = query.status {
        select = select.filter(membership_package::Column::Status.eq(status));
    }
    if let Some(search) = non_blank(query.search.clone()) {
        select = select.filter(membership_package::Column::PackageName.contains(search));
    }

    let select = select
        .order_by_desc(membership_package::Column::CreatedAt)
        .order_by_desc(membership_package::Column::Id);

    let (packages, pagination) = fetch_page(db, select, query.page_query()).await?;

    let mut responses = Vec::with_capacity(packages.len());
    for package in packages {
        responses.push(with_occupancy(db, package).await?);
    }
    Ok((responses, pagination))
}
