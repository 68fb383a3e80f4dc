//! Payment ledger and the membership cascade it drives.
//!
//! A payment reaching `completed` activates every membership row that
//! references it and schedules its expiry from the package duration. Any
//! other transition only mirrors the payment status onto those rows.
//! Payment writes and the cascade always share one transaction.

use chrono::{DateTime, Duration, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::db::DbConn;
use crate::error::{AppError, Result};
use crate::models::membership_map_user::MembershipStatus;
use crate::models::payment::PaymentStatus;
use crate::models::prelude::*;
use crate::schemas::payment::{
    CreatePaymentRequest, PaymentListQuery, PaymentWithCascade, UpdatePaymentRequest,
};
use crate::schemas::{Pagination, SortOrder};
use crate::services::{fetch_page, non_blank, required};

const DUPLICATE_TRANSACTION: &str = "Transaction number already exists";

fn parse_status(value: &str) -> Result<PaymentStatus> {
    PaymentStatus::parse(value).ok_or_else(|| {
        AppError::BadRequest(
            "Invalid payment status. Must be one of: pending, completed, failed, refunded"
                .to_string(),
        )
    })
}

fn ensure_positive_amount(amount: f64) -> Result<()> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(AppError::BadRequest(
            "Amount must be greater than 0".to_string(),
        ))
    }
}

async fn ensure_payment_type<C: ConnectionTrait>(conn: &C, payment_type_id: i64) -> Result<()> {
    PaymentType::find_by_id(payment_type_id)
        .one(conn)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::BadRequest("Payment type not found".to_string()))
}

/// Record a payment. A payment created as `completed` activates its
/// memberships before the transaction commits.
pub async fn create_payment(
    db: &DbConn,
    req: CreatePaymentRequest,
    actor_id: i64,
    now: DateTime<Utc>,
) -> Result<PaymentWithCascade> {
    let payment_type_id = required(req.payment_type_id, "payment_type_id")?;
    let payment_by_user_id = required(req.payment_by_user_id, "payment_by_user_id")?;
    let payment_get_by_user_id = required(req.payment_get_by_user_id, "payment_get_by_user_id")?;
    let amount = required(req.amount, "amount")?;
    ensure_positive_amount(amount)?;

    let status = match req.payment_status.as_deref() {
        Some(value) => parse_status(value)?,
        None => PaymentStatus::Pending,
    };
    let transaction_no = non_blank(req.transaction_no);

    let txn = db.begin().await?;

    ensure_payment_type(&txn, payment_type_id).await?;

    let payment = payment::ActiveModel {
        payment_type_id: Set(payment_type_id),
        payment_by_user_id: Set(payment_by_user_id),
        payment_get_by_user_id: Set(payment_get_by_user_id),
        payment_status: Set(status.as_str().to_string()),
        transaction_no: Set(transaction_no.clone()),
        amount: Set(amount),
        status: Set(true),
        created_by: Set(actor_id),
        created_at: Set(now),
        updated_by: Set(None),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .map_err(|e| AppError::from_unique_violation(e, DUPLICATE_TRANSACTION))?;

    let memberships_updated = if status == PaymentStatus::Completed {
        update_membership_map_users(
            &txn,
            payment.id,
            status,
            transaction_no.as_deref(),
            now,
            actor_id,
        )
        .await?
    } else {
        0
    };

    txn.commit().await?;

    tracing::info!(
        payment_id = payment.id,
        status = %status,
        memberships_updated,
        "Payment created"
    );

    Ok(PaymentWithCascade {
        payment,
        memberships_updated,
    })
}

/// Apply a partial update. A status change re-runs the cascade with the
/// new status and the effective transaction number.
pub async fn update_payment(
    db: &DbConn,
    req: UpdatePaymentRequest,
    actor_id: i64,
    now: DateTime<Utc>,
) -> Result<PaymentWithCascade> {
    let payment_id = req
        .payment_id
        .ok_or_else(|| AppError::BadRequest("Payment ID is required".to_string()))?;

    let txn = db.begin().await?;

    let existing = Payment::find_by_id(payment_id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Payment not found".to_string()))?;

    if let Some(amount) = req.amount {
        ensure_positive_amount(amount)?;
    }
    if let Some(payment_type_id) = req.payment_type_id {
        ensure_payment_type(&txn, payment_type_id).await?;
    }
    let new_status = req.payment_status.as_deref().map(parse_status).transpose()?;

    let previous_status = existing.payment_status.clone();
    let mut active: payment::ActiveModel = existing.into();

    if let Some(payment_type_id) = req.payment_type_id {
        active.payment_type_id = Set(payment_type_id);
    }
    if let Some(payer) = req.payment_by_user_id {
        active.payment_by_user_id = Set(payer);
    }
    if let Some(payee) = req.payment_get_by_user_id {
        active.payment_get_by_user_id = Set(payee);
    }
    if let Some(status) = new_status {
        active.payment_status = Set(status.as_str().to_string());
    }
    if req.transaction_no.is_some() {
        active.transaction_no = Set(non_blank(req.transaction_no));
    }
    if let Some(amount) = req.amount {
        active.amount = Set(amount);
    }
    if let Some(status) = req.status {
        active.status = Set(status);
    }
    active.updated_by = Set(Some(actor_id));
    active.updated_at = Set(now);

    let payment = active
        .update(&txn)
        .await
        .map_err(|e| AppError::from_unique_violation(e, DUPLICATE_TRANSACTION))?;

    let memberships_updated = match new_status {
        Some(status) if status.as_str() != previous_status => {
            update_membership_map_users(
                &txn,
                payment.id,
                status,
                payment.transaction_no.as_deref(),
                now,
                actor_id,
            )
            .await?
        }
        _ => 0,
    };

    txn.commit().await?;

    tracing::info!(
        payment_id = payment.id,
        from = %previous_status,
        to = %payment.payment_status,
        memberships_updated,
        "Payment updated"
    );

    Ok(PaymentWithCascade {
        payment,
        memberships_updated,
    })
}

/// Propagate a payment status onto every membership row carrying
/// `payment_id`. Returns the number of rows written.
///
/// `completed` activates each row and, when its package has a duration,
/// sets the expiry to `now + duration` days. Other statuses only rewrite
/// `payment_status` and `payment_id`.
pub async fn update_membership_map_users<C: ConnectionTrait>(
    conn: &C,
    payment_id: i64,
    status: PaymentStatus,
    transaction_no: Option<&str>,
    now: DateTime<Utc>,
    actor_id: i64,
) -> Result<u64> {
    if status != PaymentStatus::Completed {
        let result = MembershipMapUser::update_many()
            .col_expr(
                membership_map_user::Column::PaymentStatus,
                Expr::value(status.as_str()),
            )
            .col_expr(membership_map_user::Column::PaymentId, Expr::value(payment_id))
            .col_expr(membership_map_user::Column::UpdatedBy, Expr::value(actor_id))
            .col_expr(membership_map_user::Column::UpdatedAt, Expr::value(now))
            .filter(membership_map_user::Column::PaymentId.eq(payment_id))
            .exec(conn)
            .await?;

        tracing::debug!(
            payment_id,
            status = %status,
            rows = result.rows_affected,
            "Mirrored payment status onto memberships"
        );
        return Ok(result.rows_affected);
    }

    let rows = MembershipMapUser::find()
        .filter(membership_map_user::Column::PaymentId.eq(payment_id))
        .order_by_asc(membership_map_user::Column::Id)
        .all(conn)
        .await?;

    let mut updated = 0;
    for row in rows {
        let package = MembershipPackage::find_by_id(row.package_id).one(conn).await?;
        if package.is_none() {
            tracing::warn!(
                membership_map_id = row.id,
                package_id = row.package_id,
                "Membership references a missing package; activating without expiry"
            );
        }

        let mut active: membership_map_user::ActiveModel = row.into();
        active.payment_status = Set(PaymentStatus::Completed.as_str().to_string());
        active.payment_id = Set(Some(payment_id));
        active.transaction_no = Set(transaction_no.map(str::to_string));
        active.status = Set(true);
        active.membership_status = Set(MembershipStatus::Active.as_str().to_string());
        if let Some(days) = package.and_then(|p| p.duration) {
            let expiry = now
                .checked_add_signed(Duration::days(i64::from(days)))
                .ok_or_else(|| {
                    AppError::BadRequest(format!(
                        "Package duration of {} days is out of range",
                        days
                    ))
                })?;
            active.membership_expiry_date = Set(Some(expiry));
        }
        active.updated_by = Set(Some(actor_id));
        active.updated_at = Set(now);
        active.update(conn).await?;
        updated += 1;
    }

    tracing::info!(payment_id, updated, "Activated memberships for completed payment");
    Ok(updated)
}

pub async fn get_payment(db: &DbConn, payment_id: i64) -> Result<payment::Model> {
    Payment::find_by_id(payment_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Payment not found".to_string()))
}

fn sort_column(sort_by: Option<&str>) -> payment::Column {
    match sort_by {
        Some("amount") => payment::Column::Amount,
        Some("payment_status") => payment::Column::PaymentStatus,
        Some("updated_at") => payment::Column::UpdatedAt,
        Some("payment_id") => payment::Column::Id,
        _ => payment::Column::CreatedAt,
    }
}

pub async fn list_payments(
    db: &DbConn,
    query: &PaymentListQuery,
) -> Result<(Vec<payment::Model>, Pagination)> {
    let mut select = Payment::find();

    if let Some(status) = query.status {
        select = select.filter(payment::Column::Status.eq(status));
    }
    if let Some(value) = query.payment_status.as_deref() {
        select = select.filter(payment::Column::PaymentStatus.eq(parse_status(value)?.as_str()));
    }
    if let Some(id) = query.payment_type_id {
        select = select.filter(payment::Column::PaymentTypeId.eq(id));
    }
    if let Some(id) = query.payment_by_user_id {
        select = select.filter(payment::Column::PaymentByUserId.eq(id));
    }
    if let Some(id) = query.payment_get_by_user_id {
        select = select.filter(payment::Column::PaymentGetByUserId.eq(id));
    }
    if let Some(search) = non_blank(query.search.clone()) {
        select = select.filter(payment::Column::TransactionNo.contains(search));
    }

    let order = SortOrder::parse(query.sort_order.as_deref());
    select = select
        .order_by(sort_column(query.sort_by.as_deref()), order.as_sea_order())
        .order_by_desc(payment::Column::Id);

    fetch_page(db, select, query.page_query()).await
}
