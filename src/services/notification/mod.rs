//! In-app notifications: task dispatch, broadcasts and per-user inboxes.
//!
//! A notification is stored once and fanned out through one
//! `notifications_map_users` row per recipient. The row carries the
//! recipient's view state.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::db::DbConn;
use crate::error::{AppError, Result};
use crate::models::notification::{DEFAULT_TYPE, TASK_ASSIGN_TYPE};
use crate::models::prelude::*;
use crate::models::user::IndustryType;
use crate::schemas::notification::{
    BroadcastRecipient, BroadcastResult, CreateNotificationRequest, MarkViewedRequest,
    NotificationListQuery, NotificationMapEntry, NotificationMapListQuery, SendByIndustryRequest,
    SendToUsersRequest, SkippedRecipient, UpdateNotificationRequest,
};
use crate::schemas::Pagination;
use crate::services::{fetch_page, non_blank};

/// Message body sent to the assignee of a task
pub fn task_assignment_message(task_name: &str) -> String {
    format!("You have been assigned a new task: {}", task_name)
}

/// Content copied into each notification a broadcast creates
struct Template {
    title: String,
    message: String,
    notification_type: String,
    notification_view: bool,
    status: bool,
}

impl From<notification::Model> for Template {
    fn from(model: notification::Model) -> Self {
        Self {
            title: model.title,
            message: model.message,
            notification_type: model.notification_type,
            notification_view: model.notification_view,
            status: model.status,
        }
    }
}

#[derive(Clone)]
pub struct NotificationService {
    db: DbConn,
}

impl NotificationService {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    // ========================================================================
    // Task dispatch
    // ========================================================================

    /// Notify `assignee_id` about a task. Only users that are active and have
    /// both notifications and task reminders enabled are notified; for anyone
    /// else this is a no-op returning `false`.
    pub async fn send_task_assignment_notification(
        &self,
        assignee_id: i64,
        task_name: &str,
        title: &str,
        created_by: i64,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let assignee = User::find_by_id(assignee_id).one(&self.db).await?;
        match assignee {
            Some(user) if user.accepts_task_notifications() => {}
            Some(_) => {
                tracing::debug!(
                    assignee_id,
                    "Assignee has task notifications disabled, skipping dispatch"
                );
                return Ok(false);
            }
            None => {
                tracing::warn!(assignee_id, "Task assignee not found, skipping dispatch");
                return Ok(false);
            }
        }

        let txn = self.db.begin().await?;

        let saved = insert_notification(
            &txn,
            Template {
                title: title.to_string(),
                message: task_assignment_message(task_name),
                notification_type: TASK_ASSIGN_TYPE.to_string(),
                notification_view: false,
                status: true,
            },
            Some(created_by),
            now,
        )
        .await?;
        insert_delivery(&txn, saved.id, assignee_id, Some(created_by), now).await?;

        txn.commit().await?;

        tracing::info!(
            notification_id = saved.id,
            assignee_id,
            title,
            "Task notification dispatched"
        );
        Ok(true)
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    pub async fn create(
        &self,
        req: CreateNotificationRequest,
        actor_id: i64,
        now: DateTime<Utc>,
    ) -> Result<notification::Model> {
        let message = non_blank(req.message)
            .ok_or_else(|| AppError::BadRequest("Message is required".to_string()))?;

        let saved = insert_notification(
            &self.db,
            Template {
                title: req.title.unwrap_or_default(),
                message,
                notification_type: non_blank(req.notification_type)
                    .unwrap_or_else(|| DEFAULT_TYPE.to_string()),
                notification_view: req.notification_view.unwrap_or(true),
                status: req.status.unwrap_or(true),
            },
            Some(actor_id),
            now,
        )
        .await?;

        tracing::info!(notification_id = saved.id, "Notification created");
        Ok(saved)
    }

    pub async fn update(
        &self,
        req: UpdateNotificationRequest,
        actor_id: i64,
        now: DateTime<Utc>,
    ) -> Result<notification::Model> {
        let id = req
            .notification_id
            .ok_or_else(|| AppError::BadRequest("Notification ID is required".to_string()))?;

        let existing = self.get(id).await?;
        let mut active: notification::ActiveModel = existing.into();
        if let Some(title) = req.title {
            active.title = Set(title);
        }
        if let Some(message) = non_blank(req.message) {
            active.message = Set(message);
        }
        if let Some(kind) = non_blank(req.notification_type) {
            active.notification_type = Set(kind);
        }
        if let Some(view) = req.notification_view {
            active.notification_view = Set(view);
        }
        if let Some(status) = req.status {
            active.status = Set(status);
        }
        active.updated_by = Set(Some(actor_id));
        active.updated_at = Set(now);

        let updated = active.update(&self.db).await?;
        tracing::info!(notification_id = updated.id, "Notification updated");
        Ok(updated)
    }

    pub async fn get(&self, id: i64) -> Result<notification::Model> {
        Notification::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Notification not found".to_string()))
    }

    pub async fn list(
        &self,
        query: &NotificationListQuery,
    ) -> Result<(Vec<notification::Model>, Pagination)> {
        let mut select = Notification::find();
        if let Some(status) = query.status {
            select = select.filter(notification::Column::Status.eq(status));
        }
        if let Some(kind) = non_blank(query.notification_type.clone()) {
            select = select.filter(notification::Column::NotificationType.eq(kind));
        }
        if let Some(search) = non_blank(query.search.clone()) {
            select = select.filter(notification::Column::Title.contains(search));
        }
        let select = select
            .order_by_desc(notification::Column::CreatedAt)
            .order_by_desc(notification::Column::Id);

        fetch_page(&self.db, select, query.page_query()).await
    }

    // ========================================================================
    // Broadcasts
    // ========================================================================

    /// Copy an existing notification to every active user of an industry
    pub async fn send_by_industry(
        &self,
        req: SendByIndustryRequest,
        actor_id: i64,
        now: DateTime<Utc>,
    ) -> Result<BroadcastResult> {
        let notification_id = req
            .notification_id
            .ok_or_else(|| AppError::BadRequest("Notification ID is required".to_string()))?;
        let industry = non_blank(req.industry_type)
            .ok_or_else(|| AppError::BadRequest("Industry type is required".to_string()))?;

        let template = self.get(notification_id).await?;

        let industry = IndustryType::parse(&industry).ok_or_else(|| {
            AppError::BadRequest(
                "Invalid industry type. Must be one of: Real Estate, Automobile, null".to_string(),
            )
        })?;

        let users = User::find()
            .filter(user::Column::IndustryType.eq(industry.as_str()))
            .filter(user::Column::Status.eq(true))
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;

        self.broadcast(
            template.into(),
            users,
            Some(industry),
            actor_id,
            now,
        )
        .await
    }

    /// Copy an existing notification to an explicit list of active users
    pub async fn send_to_users(
        &self,
        req: SendToUsersRequest,
        actor_id: i64,
        now: DateTime<Utc>,
    ) -> Result<BroadcastResult> {
        let notification_id = req
            .notification_id
            .ok_or_else(|| AppError::BadRequest("Notification ID is required".to_string()))?;
        let user_ids = req.user_ids.filter(|ids| !ids.is_empty()).ok_or_else(|| {
            AppError::BadRequest("User IDs array is required and must not be empty".to_string())
        })?;

        let template = self.get(notification_id).await?;

        let users = User::find()
            .filter(user::Column::Id.is_in(user_ids))
            .filter(user::Column::Status.eq(true))
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;

        self.broadcast(template.into(), users, None, actor_id, now).await
    }

    async fn broadcast(
        &self,
        template: Template,
        users: Vec<user::Model>,
        industry: Option<IndustryType>,
        actor_id: i64,
        now: DateTime<Utc>,
    ) -> Result<BroadcastResult> {
        let (eligible, disabled): (Vec<_>, Vec<_>) =
            users.into_iter().partition(|u| u.notification_active);

        if eligible.is_empty() {
            let message = match industry {
                Some(industry) => format!(
                    "No users found with industry type: {} and notifications enabled",
                    industry
                ),
                None => "No users found with notifications enabled".to_string(),
            };
            return Err(AppError::NotFound(message));
        }

        let txn = self.db.begin().await?;
        let saved = insert_notification(&txn, template, Some(actor_id), now).await?;
        for recipient in &eligible {
            insert_delivery(&txn, saved.id, recipient.id, Some(actor_id), now).await?;
        }
        txn.commit().await?;

        let skipped_users: Vec<SkippedRecipient> = disabled
            .into_iter()
            .map(|u| SkippedRecipient {
                user_id: u.id,
                name: u.name,
                email: u.email,
                reason: "Notifications disabled".to_string(),
            })
            .collect();
        let users_with_notifications: Vec<BroadcastRecipient> = eligible
            .into_iter()
            .map(|u| BroadcastRecipient {
                user_id: u.id,
                name: u.name,
                email: u.email,
                notification_active: u.notification_active,
            })
            .collect();

        tracing::info!(
            notification_id = saved.id,
            delivered = users_with_notifications.len(),
            skipped = skipped_users.len(),
            "Notification broadcast"
        );

        Ok(BroadcastResult {
            notification: saved,
            users_count: users_with_notifications.len(),
            skipped_users_count: skipped_users.len(),
            industry_type: industry.map(|i| i.as_str().to_string()),
            users_with_notifications,
            skipped_users,
        })
    }

    // ========================================================================
    // Deliveries
    // ========================================================================

    /// Mark one of the caller's own deliveries as viewed
    pub async fn mark_viewed(
        &self,
        user_id: i64,
        req: MarkViewedRequest,
        now: DateTime<Utc>,
    ) -> Result<notification_map_user::Model> {
        let map_id = req
            .notification_map_id
            .ok_or_else(|| AppError::BadRequest("Notification map ID is required".to_string()))?;

        let delivery = NotificationMapUser::find_by_id(map_id)
            .filter(notification_map_user::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(
                    "Notification mapping not found or does not belong to you".to_string(),
                )
            })?;

        let mut active: notification_map_user::ActiveModel = delivery.into();
        active.notification_view = Set(true);
        active.updated_at = Set(now);
        Ok(active.update(&self.db).await?)
    }

    /// Every delivery row, newest first
    pub async fn list_deliveries(
        &self,
        query: &NotificationMapListQuery,
    ) -> Result<(Vec<notification_map_user::Model>, Pagination)> {
        let mut select = NotificationMapUser::find();
        if let Some(status) = query.status {
            select = select.filter(notification_map_user::Column::Status.eq(status));
        }
        if let Some(view) = query.notification_view {
            select = select.filter(notification_map_user::Column::NotificationView.eq(view));
        }
        if let Some(id) = query.notification_id {
            select = select.filter(notification_map_user::Column::NotificationId.eq(id));
        }
        if let Some(id) = query.user_id {
            select = select.filter(notification_map_user::Column::UserId.eq(id));
        }
        let select = select
            .order_by_desc(notification_map_user::Column::CreatedAt)
            .order_by_desc(notification_map_user::Column::Id);

        fetch_page(&self.db, select, query.page_query()).await
    }

    /// Inbox of `user_id`, each delivery joined with its notification
    pub async fn inbox(
        &self,
        user_id: i64,
        query: &NotificationMapListQuery,
    ) -> Result<(Vec<NotificationMapEntry>, Pagination)> {
        let page = query.page_query();
        let mut select =
            NotificationMapUser::find().filter(notification_map_user::Column::UserId.eq(user_id));
        if let Some(status) = query.status {
            select = select.filter(notification_map_user::Column::Status.eq(status));
        }
        if let Some(view) = query.notification_view {
            select = select.filter(notification_map_user::Column::NotificationView.eq(view));
        }

        let total = select.clone().count(&self.db).await?;
        let rows = select
            .find_also_related(Notification)
            .order_by_desc(notification_map_user::Column::CreatedAt)
            .order_by_desc(notification_map_user::Column::Id)
            .offset((page.page() - 1) * page.limit())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        let entries = rows
            .into_iter()
            .map(|(delivery, notification)| NotificationMapEntry {
                notification_map_id: delivery.id,
                user_id: delivery.user_id,
                notification_view: delivery.notification_view,
                status: delivery.status,
                notification,
                created_at: delivery.created_at,
            })
            .collect();

        Ok((entries, Pagination::new(total, page.page(), page.limit())))
    }
}

async fn insert_notification<C: ConnectionTrait>(
    conn: &C,
    template: Template,
    created_by: Option<i64>,
    now: DateTime<Utc>,
) -> Result<notification::Model> {
    let saved = notification::ActiveModel {
        title: Set(template.title),
        message: Set(template.message),
        notification_type: Set(template.notification_type),
        notification_view: Set(template.notification_view),
        status: Set(template.status),
        created_by: Set(created_by),
        created_at: Set(now),
        updated_by: Set(None),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await?;
    Ok(saved)
}

async fn insert_delivery<C: ConnectionTrait>(
    conn: &C,
    notification_id: i64,
    user_id: i64,
    created_by: Option<i64>,
    now: DateTime<Utc>,
) -> Result<notification_map_user::Model> {
    let saved = notification_map_user::ActiveModel {
        notification_id: Set(notification_id),
        user_id: Set(user_id),
        notification_view: Set(false),
        status: Set(true),
        created_by: Set(created_by),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(|e| AppError::from_unique_violation(e, "Notification already delivered to user"))?;
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_assignment_message() {
        assert_eq!(
            task_assignment_message("Site visit"),
            "You have been assigned a new task: Site visit"
        );
    }
}
