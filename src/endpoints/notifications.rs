use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::endpoints::extractors::ValidJson;
use crate::error::Result;
use crate::middleware::Authenticated;
use crate::models::notification;
use crate::schemas::notification::{
    BroadcastResult, CreateNotificationRequest, NotificationListQuery, SendByIndustryRequest,
    SendToUsersRequest, UpdateNotificationRequest,
};
use crate::schemas::ApiResponse;
use crate::state::AppState;

pub fn notifications_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/notifications",
            get(list_notifications)
                .post(create_notification)
                .put(update_notification),
        )
        .route("/notifications/send-by-industry", post(send_by_industry))
        .route("/notifications/send-to-users", post(send_to_users))
        .route("/notifications/{id}", get(get_notification))
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/notifications",
    tag = "Notifications",
    request_body = CreateNotificationRequest,
    responses(
        (status = 201, description = "Notification created"),
        (status = 400, description = "Message missing")
    )
)]
async fn create_notification(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidJson(req): ValidJson<CreateNotificationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<notification::Model>>)> {
    let created = state
        .notification
        .create(req, auth.user_id(), state.now())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Notification created successfully",
            created,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/notifications",
    tag = "Notifications",
    request_body = UpdateNotificationRequest,
    responses(
        (status = 200, description = "Notification updated"),
        (status = 404, description = "Notification not found")
    )
)]
async fn update_notification(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidJson(req): ValidJson<UpdateNotificationRequest>,
) -> Result<Json<ApiResponse<notification::Model>>> {
    let updated = state
        .notification
        .update(req, auth.user_id(), state.now())
        .await?;
    Ok(Json(ApiResponse::with_message(
        "Notification updated successfully",
        updated,
    )))
}

#[utoipa::path(
    get,
    path = "/notifications/{id}",
    tag = "Notifications",
    params(("id" = i64, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification"),
        (status = 404, description = "Notification not found")
    )
)]
async fn get_notification(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<notification::Model>>> {
    let found = state.notification.get(id).await?;
    Ok(Json(ApiResponse::data(found)))
}

#[utoipa::path(
    get,
    path = "/notifications",
    tag = "Notifications",
    params(NotificationListQuery),
    responses((status = 200, description = "Paginated notifications"))
)]
async fn list_notifications(
    State(state): State<AppState>,
    _auth: Authenticated,
    Query(query): Query<NotificationListQuery>,
) -> Result<Json<ApiResponse<Vec<notification::Model>>>> {
    let (items, pagination) = state.notification.list(&query).await?;
    Ok(Json(ApiResponse::paginated(items, pagination)))
}

#[utoipa::path(
    post,
    path = "/notifications/send-by-industry",
    tag = "Notifications",
    request_body = SendByIndustryRequest,
    responses(
        (status = 201, description = "Notification copied to eligible users of the industry"),
        (status = 400, description = "Invalid industry type"),
        (status = 404, description = "Notification not found or no eligible users")
    )
)]
async fn send_by_industry(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidJson(req): ValidJson<SendByIndustryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BroadcastResult>>)> {
    let result = state
        .notification
        .send_by_industry(req, auth.user_id(), state.now())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(result.summary(), result)),
    ))
}

#[utoipa::path(
    post,
    path = "/notifications/send-to-users",
    tag = "Notifications",
    request_body = SendToUsersRequest,
    responses(
        (status = 201, description = "Notification copied to the listed users"),
        (status = 400, description = "Empty user list"),
        (status = 404, description = "Notification not found or no eligible users")
    )
)]
async fn send_to_users(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidJson(req): ValidJson<SendToUsersRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BroadcastResult>>)> {
    let result = state
        .notification
        .send_to_users(req, auth.user_id(), state.now())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(result.summary(), result)),
    ))
}
