//! Per-user task completion reports.
//!
//! Stored reports are snapshots. Every read recomputes the statistics from
//! the live task table and writes them back before returning the row.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

use crate::db::DbConn;
use crate::error::{AppError, Result};
use crate::models::prelude::*;
use crate::models::task::TaskStatus;
use crate::schemas::report::{CreateReportRequest, ReportListQuery, UpdateReportRequest};
use crate::schemas::{Pagination, SortOrder};
use crate::services::fetch_page;

/// Statistics for one task type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskBreakdownEntry {
    pub task_type: String,
    pub total_tasks: i32,
    pub completed_tasks: i32,
    pub percentage: i32,
}

/// Statistics derived from a user's tasks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportData {
    pub total_task: i32,
    /// Completion percentage, rounded
    pub status: i32,
    pub last_completed_task: Option<DateTime<Utc>>,
    pub task_breakdown: Vec<TaskBreakdownEntry>,
}

fn percentage(completed: usize, total: usize) -> i32 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as i32
}

fn is_completed(task: &task::Model) -> bool {
    TaskStatus::parse(&task.task_status) == Some(TaskStatus::Completed)
}

/// Compute report statistics from a set of tasks. Breakdown entries appear
/// in the order their task type is first seen.
pub fn compute_report(tasks: &[task::Model]) -> ReportData {
    let completed: Vec<&task::Model> = tasks.iter().filter(|t| is_completed(t)).collect();

    let last_completed_task = completed.iter().map(|t| t.updated_at).max();

    let mut task_types: Vec<&str> = Vec::new();
    for task in tasks {
        if !task.task_type.is_empty() && !task_types.contains(&task.task_type.as_str()) {
            task_types.push(&task.task_type);
        }
    }

    let task_breakdown = task_types
        .into_iter()
        .map(|task_type| {
            let total = tasks.iter().filter(|t| t.task_type == task_type).count();
            let done = completed.iter().filter(|t| t.task_type == task_type).count();
            TaskBreakdownEntry {
                task_type: task_type.to_string(),
                total_tasks: total as i32,
                completed_tasks: done as i32,
                percentage: percentage(done, total),
            }
        })
        .collect();

    ReportData {
        total_task: tasks.len() as i32,
        status: percentage(completed.len(), tasks.len()),
        last_completed_task,
        task_breakdown,
    }
}

/// Live tasks assigned to `user_id`
async fn tasks_for_user<C: ConnectionTrait>(conn: &C, user_id: i64) -> Result<Vec<task::Model>> {
    let tasks = Task::find()
        .filter(task::Column::AssignToId.eq(user_id))
        .filter(task::Column::Status.eq(true))
        .order_by_asc(task::Column::Id)
        .all(conn)
        .await?;
    Ok(tasks)
}

fn breakdown_json(entries: &[TaskBreakdownEntry]) -> Result<serde_json::Value> {
    serde_json::to_value(entries)
        .map_err(|e| AppError::Internal(format!("Failed to encode task breakdown: {}", e)))
}

#[derive(Clone)]
pub struct ReportService {
    db: DbConn,
}

impl ReportService {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// Recompute `report` from live tasks and persist the result
    pub async fn refresh(&self, report: report::Model, now: DateTime<Utc>) -> Result<report::Model> {
        let tasks = tasks_for_user(&self.db, report.user_id).await?;
        let data = compute_report(&tasks);

        let mut active: report::ActiveModel = report.into();
        active.total_task = Set(data.total_task);
        active.status = Set(data.status);
        active.last_completed_task = Set(data.last_completed_task);
        active.task_breakdown = Set(breakdown_json(&data.task_breakdown)?);
        active.updated_at = Set(now);

        let refreshed = active.update(&self.db).await?;
        tracing::debug!(
            report_id = refreshed.id,
            total = refreshed.total_task,
            percent = refreshed.status,
            "Report refreshed"
        );
        Ok(refreshed)
    }

    /// Refresh for list reads: a failed refresh keeps the stored row
    async fn refresh_or_stored(&self, report: report::Model, now: DateTime<Utc>) -> report::Model {
        match self.refresh(report.clone(), now).await {
            Ok(refreshed) => refreshed,
            Err(e) => {
                tracing::warn!(report_id = report.id, error = %e, "Report refresh failed");
                report
            }
        }
    }

    pub async fn create(
        &self,
        req: CreateReportRequest,
        actor_id: i64,
        now: DateTime<Utc>,
    ) -> Result<report::Model> {
        let user_id = req
            .user_id
            .ok_or_else(|| AppError::BadRequest("User ID is required".to_string()))?;

        User::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let existing = Report::find()
            .filter(report::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(AppError::Conflict(
                "Report already exists for this user".to_string(),
            ));
        }

        let tasks = tasks_for_user(&self.db, user_id).await?;
        let data = compute_report(&tasks);

        let created = report::ActiveModel {
            user_id: Set(user_id),
            total_task: Set(data.total_task),
            status: Set(data.status),
            last_completed_task: Set(data.last_completed_task),
            task_breakdown: Set(breakdown_json(&data.task_breakdown)?),
            created_by: Set(actor_id),
            created_at: Set(now),
            updated_by: Set(None),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| AppError::from_unique_violation(e, "Report already exists for this user"))?;

        tracing::info!(report_id = created.id, user_id, "Report created");
        Ok(created)
    }

    /// Re-point a report at another user (optionally) and recompute it
    pub async fn update(
        &self,
        req: UpdateReportRequest,
        actor_id: i64,
        now: DateTime<Utc>,
    ) -> Result<report::Model> {
        let report_id = req
            .report_id
            .ok_or_else(|| AppError::BadRequest("Report ID is required".to_string()))?;

        let existing = Report::find_by_id(report_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Report not found".to_string()))?;

        let mut active: report::ActiveModel = existing.clone().into();
        if let Some(user_id) = req.user_id.filter(|id| *id != existing.user_id) {
            User::find_by_id(user_id)
                .one(&self.db)
                .await?
                .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
            active.user_id = Set(user_id);
        }
        active.updated_by = Set(Some(actor_id));
        active.updated_at = Set(now);

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| AppError::from_unique_violation(e, "Report already exists for this user"))?;

        tracing::info!(report_id = updated.id, "Report updated");
        self.refresh(updated, now).await
    }

    pub async fn get(&self, report_id: i64, now: DateTime<Utc>) -> Result<report::Model> {
        let report = Report::find_by_id(report_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Report not found".to_string()))?;
        self.refresh(report, now).await
    }

    pub async fn list(
        &self,
        query: &ReportListQuery,
        now: DateTime<Utc>,
    ) -> Result<(Vec<report::Model>, Pagination)> {
        let mut select = Report::find();
        if let Some(user_id) = query.user_id {
            select = select.filter(report::Column::UserId.eq(user_id));
        }
        if let Some(status) = query.status {
            select = select.filter(report::Column::Status.eq(status));
        }
        self.fetch_and_refresh(select, query, now).await
    }

    /// Reports belonging to `user_id`
    pub async fn list_for_user(
        &self,
        user_id: i64,
        query: &ReportListQuery,
        now: DateTime<Utc>,
    ) -> Result<(Vec<report::Model>, Pagination)> {
        let select = Report::find().filter(report::Column::UserId.eq(user_id));
        self.fetch_and_refresh(select, query, now).await
    }

    async fn fetch_and_refresh(
        &self,
        select: sea_orm::Select<report::Entity>,
        query: &ReportListQuery,
        now: DateTime<Utc>,
    ) -> Result<(Vec<report::Model>, Pagination)> {
        let order = SortOrder::parse(query.sort_order.as_deref()).as_sea_order();
        let select = select
            .order_by(report::Column::CreatedAt, order.clone())
            .order_by(report::Column::Id, order);

        let (reports, pagination) = fetch_page(&self.db, select, query.page_query()).await?;

        let mut refreshed = Vec::with_capacity(reports.len());
        for report in reports {
            refreshed.push(self.refresh_or_stored(report, now).await);
        }
        Ok((refreshed, pagination))
    }
}
