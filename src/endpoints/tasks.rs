use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::endpoints::extractors::ValidJson;
use crate::error::Result;
use crate::middleware::Authenticated;
use crate::models::task;
use crate::schemas::task::{CreateTaskRequest, DashboardCounts, TaskListQuery, UpdateTaskRequest};
use crate::schemas::ApiResponse;
use crate::services::task as tasks;
use crate::state::AppState;

pub fn tasks_routes(state: AppState) -> Router {
    Router::new()
        .route("/task", get(list_tasks).post(create_task).put(update_task))
        .route("/task/dashboard", get(get_dashboard))
        .route("/task/{task_id}", get(get_task))
        .route("/task/{task_id}/reminder", post(send_reminder))
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/task",
    tag = "Tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created; assignee notified when reminders are on"),
        (status = 400, description = "Validation failed")
    )
)]
async fn create_task(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidJson(req): ValidJson<CreateTaskRequest>,
) -> Result<(StatusCode, Json<ApiResponse<task::Model>>)> {
    let created = tasks::create_task(
        &state.db,
        &state.notification,
        req,
        auth.user_id(),
        state.now(),
    )
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Task created successfully", created)),
    ))
}

#[utoipa::path(
    put,
    path = "/task",
    tag = "Tasks",
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task updated"),
        (status = 404, description = "Task not found")
    )
)]
async fn update_task(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidJson(req): ValidJson<UpdateTaskRequest>,
) -> Result<Json<ApiResponse<task::Model>>> {
    let updated = tasks::update_task(
        &state.db,
        &state.notification,
        req,
        auth.user_id(),
        state.now(),
    )
    .await?;
    Ok(Json(ApiResponse::with_message(
        "Task updated successfully",
        updated,
    )))
}

#[utoipa::path(
    get,
    path = "/task/{task_id}",
    tag = "Tasks",
    params(("task_id" = i64, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task"),
        (status = 404, description = "Task not found")
    )
)]
async fn get_task(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(task_id): Path<i64>,
) -> Result<Json<ApiResponse<task::Model>>> {
    let found = tasks::get_task(&state.db, task_id).await?;
    Ok(Json(ApiResponse::data(found)))
}

#[utoipa::path(
    get,
    path = "/task",
    tag = "Tasks",
    params(TaskListQuery),
    responses((status = 200, description = "Paginated tasks"))
)]
async fn list_tasks(
    State(state): State<AppState>,
    _auth: Authenticated,
    Query(query): Query<TaskListQuery>,
) -> Result<Json<ApiResponse<Vec<task::Model>>>> {
    let (items, pagination) = tasks::list_tasks(&state.db, &query).await?;
    Ok(Json(ApiResponse::paginated(items, pagination)))
}

#[utoipa::path(
    get,
    path = "/task/dashboard",
    tag = "Tasks",
    responses((status = 200, description = "Member, subscription and task counters", body = DashboardCounts))
)]
async fn get_dashboard(
    State(state): State<AppState>,
    _auth: Authenticated,
) -> Result<Json<ApiResponse<DashboardCounts>>> {
    let counts = tasks::dashboard(&state.db).await?;
    Ok(Json(ApiResponse::with_message(
        "Task dashboard data retrieved successfully",
        counts,
    )))
}

#[utoipa::path(
    post,
    path = "/task/{task_id}/reminder",
    tag = "Tasks",
    params(("task_id" = i64, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Reminder delivered"),
        (status = 400, description = "Task unassigned or assignee has notifications disabled"),
        (status = 404, description = "Task not found")
    )
)]
async fn send_reminder(
    State(state): State<AppState>,
    auth: Authenticated,
    Path(task_id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    tasks::send_task_reminder(
        &state.db,
        &state.notification,
        task_id,
        auth.user_id(),
        state.now(),
    )
    .await?;
    Ok(Json(ApiResponse::ok("Task reminder sent successfully")))
}
