use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::db::DbConn;
use crate::error::{AppError, Result};
use crate::models::payment_type::normalize_key;
use crate::models::prelude::*;
use crate::schemas::payment::{
    CreatePaymentTypeRequest, PaymentTypeListQuery, UpdatePaymentTypeRequest,
};
use crate::schemas::Pagination;
use crate::services::{fetch_page, non_blank};

const DUPLICATE: &str = "Payment type already exists";

/// Case-insensitive lookup by name, ignoring `exclude_id`
async fn find_by_key(
    db: &DbConn,
    key: &str,
    exclude_id: Option<i64>,
) -> Result<Option<payment_type::Model>> {
    let mut select = PaymentType::find().filter(payment_type::Column::PaymentTypeKey.eq(key));
    if let Some(id) = exclude_id {
        select = select.filter(payment_type::Column::Id.ne(id));
    }
    Ok(select.one(db).await?)
}

pub async fn create_payment_type(
    db: &DbConn,
    req: CreatePaymentTypeRequest,
    actor_id: i64,
    now: DateTime<Utc>,
) -> Result<payment_type::Model> {
    let name = non_blank(req.payment_type)
        .ok_or_else(|| AppError::BadRequest("Payment type is required".to_string()))?;
    let key = normalize_key(&name);

    if find_by_key(db, &key, None).await?.is_some() {
        return Err(AppError::Conflict(DUPLICATE.to_string()));
    }

    let created = payment_type::ActiveModel {
        payment_type: Set(name),
        payment_type_key: Set(key),
        status: Set(true),
        created_by: Set(actor_id),
        created_at: Set(now),
        updated_by: Set(None),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| AppError::from_unique_violation(e, DUPLICATE))?;

    tracing::info!(paymenttype_id = created.id, name = %created.payment_type, "Payment type created");
    Ok(created)
}

pub async fn update_payment_type(
    db: &DbConn,
    req: UpdatePaymentTypeRequest,
    actor_id: i64,
    now: DateTime<Utc>,
) -> Result<payment_type::Model> {
    let id = req
        .paymenttype_id
        .ok_or_else(|| AppError::BadRequest("Payment type ID is required".to_string()))?;

    let existing = PaymentType::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Payment type not found".to_string()))?;

    let mut active: payment_type::ActiveModel = existing.into();
    if let Some(name) = non_blank(req.payment_type) {
        let key = normalize_key(&name);
        if find_by_key(db, &key, Some(id)).await?.is_some() {
            return Err(AppError::Conflict(DUPLICATE.to_string()));
        }
        active.payment_type = Set(name);
        active.payment_type_key = Set(key);
    }
    if let Some(status) = req.status {
        active.status = Set(status);
    }
    active.updated_by = Set(Some(actor_id));
    active.updated_at = Set(now);

    let updated = active
        .update(db)
        .await
        .map_err(|e| AppError::from_unique_violation(e, DUPLICATE))?;
    tracing::info!(paymenttype_id = updated.id, "Payment type updated");
    Ok(updated)
}

pub async fn get_payment_type(db: &DbConn, id: i64) -> Result<payment_type::Model> {
    PaymentType::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Payment type not found".to_string()))
}

pub async fn list_payment_types(
    db: &DbConn,
    query: &PaymentTypeListQuery,
) -> Result<(Vec<payment_type::Model>, Pagination)> {
    let mut select = PaymentType::find();
    if let Some(status) = query.status {
        select = select.filter(payment_type::Column::Status.eq(status));
    }
    if let Some(search) = non_blank(query.search.clone()) {
        select = select.filter(payment_type::Column::PaymentTypeKey.contains(normalize_key(&search)));
    }
    let select = select
        .order_by_desc(payment_type::Column::CreatedAt)
        .order_by_desc(payment_type::Column::Id);

    fetch_page(db, select, query.page_query()).await
}
