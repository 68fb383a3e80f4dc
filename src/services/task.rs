//! Task CRUD and the notifications raised on assignment.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::db::DbConn;
use crate::error::{AppError, Result};
use crate::models::membership_map_user::MembershipStatus;
use crate::models::prelude::*;
use crate::models::task::{TaskStatus, TaskType};
use crate::schemas::task::{CreateTaskRequest, DashboardCounts, TaskListQuery, UpdateTaskRequest};
use crate::schemas::{Pagination, SortOrder};
use crate::services::notification::NotificationService;
use crate::services::{fetch_page, non_blank, required_text};

pub const NEW_TASK_TITLE: &str = "New Task Assigned";
pub const REASSIGNED_TITLE: &str = "Task Reassigned";
pub const REMINDER_TITLE: &str = "Task Reminder";

fn parse_task_type(value: &str) -> Result<TaskType> {
    TaskType::parse(value).ok_or_else(|| {
        AppError::BadRequest(
            "Task_type must be either \"Real Estate\" or \"Automobile\"".to_string(),
        )
    })
}

fn parse_task_status(value: &str) -> Result<TaskStatus> {
    TaskStatus::parse(value).ok_or_else(|| {
        AppError::BadRequest(
            "Task_status must be one of: Pending, In Progress, Completed".to_string(),
        )
    })
}

fn validate_amounts(price: Option<f64>, parking: Option<i32>) -> Result<()> {
    if price.is_some_and(|p| p < 0.0) {
        return Err(AppError::BadRequest(
            "Price must be greater than or equal to 0".to_string(),
        ));
    }
    if parking.is_some_and(|p| p < 0) {
        return Err(AppError::BadRequest(
            "Number of parking must be greater than or equal to 0".to_string(),
        ));
    }
    Ok(())
}

/// Dispatch an assignment notification. Failures are logged, never raised:
/// the task write has already succeeded.
async fn dispatch(
    notifications: &NotificationService,
    assignee_id: i64,
    task_name: &str,
    title: &str,
    actor_id: i64,
    now: DateTime<Utc>,
) -> bool {
    match notifications
        .send_task_assignment_notification(assignee_id, task_name, title, actor_id, now)
        .await
    {
        Ok(sent) => sent,
        Err(e) => {
            tracing::warn!(assignee_id, error = %e, "Failed to dispatch task notification");
            false
        }
    }
}

pub async fn create_task(
    db: &DbConn,
    notifications: &NotificationService,
    req: CreateTaskRequest,
    actor_id: i64,
    now: DateTime<Utc>,
) -> Result<task::Model> {
    let title_description = required_text(req.title_description, "Title_Description")?;
    let task_name = required_text(req.task_name, "Task_name")?;
    let task_address = required_text(req.task_address, "Task_address")?;
    let task_type = required_text(req.task_type, "Task_type")?;
    let assign_to_id = req
        .assign_to_id
        .filter(|id| *id != 0)
        .ok_or_else(|| AppError::BadRequest("Assign_to_id is required".to_string()))?;

    let task_type = parse_task_type(&task_type)?;
    let task_status = match non_blank(req.task_status) {
        Some(value) => parse_task_status(&value)?,
        None => TaskStatus::Pending,
    };
    validate_amounts(req.price_of_the_property, req.number_of_parking)?;

    let created = task::ActiveModel {
        title_description: Set(title_description),
        task_name: Set(task_name),
        task_address: Set(task_address),
        task_type: Set(task_type.as_str().to_string()),
        assign_to_id: Set(Some(assign_to_id)),
        task_status: Set(task_status.as_str().to_string()),
        property_location_id: Set(req.property_location_id),
        property_type_id: Set(req.property_type_id),
        transaction_type_id: Set(req.transaction_type_id),
        property_sub_type_id: Set(req.property_sub_type_id),
        internal_area: Set(req.internal_area),
        condition: Set(req.condition),
        washroom: Set(req.washroom),
        number_of_parking: Set(req.number_of_parking.unwrap_or(0)),
        land_area: Set(req.land_area),
        price_of_the_property: Set(req.price_of_the_property.unwrap_or(0.0)),
        reference_no: Set(req.reference_no),
        task_reminder: Set(req.task_reminder.unwrap_or(false)),
        status: Set(req.status.unwrap_or(true)),
        created_by: Set(actor_id),
        created_at: Set(now),
        updated_by: Set(None),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::info!(task_id = created.id, assign_to_id, "Task created");

    dispatch(
        notifications,
        assign_to_id,
        &created.task_name,
        NEW_TASK_TITLE,
        actor_id,
        now,
    )
    .await;

    Ok(created)
}

/// Partial update. Reassigning a task notifies the new assignee only when
/// the request also sets `Task_Reminder` to true.
pub async fn update_task(
    db: &DbConn,
    notifications: &NotificationService,
    req: UpdateTaskRequest,
    actor_id: i64,
    now: DateTime<Utc>,
) -> Result<task::Model> {
    let task_id = req
        .task_id
        .ok_or_else(|| AppError::BadRequest("Task ID is required".to_string()))?;

    let existing = Task::find_by_id(task_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".to_string()))?;

    let task_type = non_blank(req.task_type)
        .map(|v| parse_task_type(&v))
        .transpose()?;
    let task_status = non_blank(req.task_status)
        .map(|v| parse_task_status(&v))
        .transpose()?;
    validate_amounts(req.price_of_the_property, req.number_of_parking)?;

    let assign_to_id = req.assign_to_id.filter(|id| *id != 0);
    let reassigned_to = assign_to_id.filter(|id| existing.assign_to_id != Some(*id));
    let notify = reassigned_to.is_some() && req.task_reminder == Some(true);

    let mut active: task::ActiveModel = existing.into();
    if let Some(v) = non_blank(req.title_description) {
        active.title_description = Set(v);
    }
    if let Some(v) = non_blank(req.task_name) {
        active.task_name = Set(v);
    }
    if let Some(v) = non_blank(req.task_address) {
        active.task_address = Set(v);
    }
    if let Some(v) = task_type {
        active.task_type = Set(v.as_str().to_string());
    }
    if let Some(v) = assign_to_id {
        active.assign_to_id = Set(Some(v));
    }
    if let Some(v) = task_status {
        active.task_status = Set(v.as_str().to_string());
    }
    if let Some(v) = req.property_location_id {
        active.property_location_id = Set(Some(v));
    }
    if let Some(v) = req.property_type_id {
        active.property_type_id = Set(Some(v));
    }
    if let Some(v) = req.transaction_type_id {
        active.transaction_type_id = Set(Some(v));
    }
    if let Some(v) = req.property_sub_type_id {
        active.property_sub_type_id = Set(Some(v));
    }
    if let Some(v) = req.internal_area {
        active.internal_area = Set(Some(v));
    }
    if let Some(v) = req.condition {
        active.condition = Set(Some(v));
    }
    if let Some(v) = req.washroom {
        active.washroom = Set(Some(v));
    }
    if let Some(v) = req.number_of_parking {
        active.number_of_parking = Set(v);
    }
    if let Some(v) = req.land_area {
        active.land_area = Set(Some(v));
    }
    if let Some(v) = req.price_of_the_property {
        active.price_of_the_property = Set(v);
    }
    if let Some(v) = req.reference_no {
        active.reference_no = Set(Some(v));
    }
    if let Some(v) = req.task_reminder {
        active.task_reminder = Set(v);
    }
    if let Some(v) = req.status {
        active.status = Set(v);
    }
    active.updated_by = Set(Some(actor_id));
    active.updated_at = Set(now);

    let updated = active.update(db).await?;
    tracing::info!(task_id = updated.id, "Task updated");

    if let (true, Some(assignee_id)) = (notify, reassigned_to) {
        dispatch(
            notifications,
            assignee_id,
            &updated.task_name,
            REASSIGNED_TITLE,
            actor_id,
            now,
        )
        .await;
    }

    Ok(updated)
}

/// Re-send the assignment notification to the task's current assignee
pub async fn send_task_reminder(
    db: &DbConn,
    notifications: &NotificationService,
    task_id: i64,
    actor_id: i64,
    now: DateTime<Utc>,
) -> Result<()> {
    let task = get_task(db, task_id).await?;
    let assignee_id = task
        .assign_to_id
        .ok_or_else(|| AppError::BadRequest("Task is not assigned to anyone".to_string()))?;

    if dispatch(
        notifications,
        assignee_id,
        &task.task_name,
        REMINDER_TITLE,
        actor_id,
        now,
    )
    .await
    {
        Ok(())
    } else {
        Err(AppError::BadRequest(
            "Failed to send task reminder. User may not have notifications enabled.".to_string(),
        ))
    }
}

pub async fn get_task(db: &DbConn, task_id: i64) -> Result<task::Model> {
    Task::find_by_id(task_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".to_string()))
}

fn sort_column(sort_by: Option<&str>) -> task::Column {
    match sort_by {
        Some("updated_at") => task::Column::UpdatedAt,
        Some("Task_name") | Some("task_name") => task::Column::TaskName,
        Some("Task_status") | Some("task_status") => task::Column::TaskStatus,
        Some("price_of_the_property") => task::Column::PriceOfTheProperty,
        Some("task_id") => task::Column::Id,
        _ => task::Column::CreatedAt,
    }
}

pub async fn list_tasks(
    db: &DbConn,
    query: &TaskListQuery,
) -> Result<(Vec<task::Model>, Pagination)> {
    let mut select = Task::find();

    if let Some(status) = query.status {
        select = select.filter(task::Column::Status.eq(status));
    }
    if let Some(value) = non_blank(query.task_status.clone()) {
        select = select.filter(task::Column::TaskStatus.eq(parse_task_status(&value)?.as_str()));
    }
    if let Some(value) = non_blank(query.task_type.clone()) {
        select = select.filter(task::Column::TaskType.eq(parse_task_type(&value)?.as_str()));
    }
    if let Some(id) = query.assign_to_id {
        select = select.filter(task::Column::AssignToId.eq(id));
    }
    if let Some(id) = query.property_location_id {
        select = select.filter(task::Column::PropertyLocationId.eq(id));
    }
    if let Some(id) = query.property_type_id {
        select = select.filter(task::Column::PropertyTypeId.eq(id));
    }
    if let Some(id) = query.transaction_type_id {
        select = select.filter(task::Column::TransactionTypeId.eq(id));
    }
    if let Some(id) = query.property_sub_type_id {
        select = select.filter(task::Column::PropertySubTypeId.eq(id));
    }
    if let Some(search) = non_blank(query.search.clone()) {
        select = select.filter(
            Condition::any()
                .add(task::Column::TitleDescription.contains(&search))
                .add(task::Column::TaskName.contains(&search))
                .add(task::Column::TaskAddress.contains(&search))
                .add(task::Column::ReferenceNo.contains(&search)),
        );
    }

    let order = SortOrder::parse(query.sort_order.as_deref());
    let select = select
        .order_by(sort_column(query.sort_by.as_deref()), order.as_sea_order())
        .order_by_desc(task::Column::Id);

    fetch_page(db, select, query.page_query()).await
}

/// Platform-wide counters shown on the task dashboard
pub async fn dashboard(db: &DbConn) -> Result<DashboardCounts> {
    let total_member_count = User::find()
        .filter(user::Column::Status.eq(true))
        .count(db)
        .await?;
    let total_member_subscription_count = MembershipMapUser::find()
        .filter(
            membership_map_user::Column::MembershipStatus.eq(MembershipStatus::Active.as_str()),
        )
        .filter(membership_map_user::Column::Status.eq(true))
        .count(db)
        .await?;

    let live = || Task::find().filter(task::Column::Status.eq(true));
    let task_assigned_count = live()
        .filter(task::Column::AssignToId.is_not_null())
        .count(db)
        .await?;
    let task_completed_count = live()
        .filter(task::Column::TaskStatus.eq(TaskStatus::Completed.as_str()))
        .count(db)
        .await?;
    let task_pending_count = live()
        .filter(task::Column::TaskStatus.eq(TaskStatus::Pending.as_str()))
        .count(db)
        .await?;

    Ok(DashboardCounts {
        total_member_count,
        total_member_subscription_count,
        task_assigned_count,
        task_completed_count,
        task_pending_count,
    })
}
