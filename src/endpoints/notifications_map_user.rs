use axum::{
    extract::{Path, Query, State},
    routing::{get, put},
    Json, Router,
};

use crate::endpoints::extractors::ValidJson;
use crate::error::Result;
use crate::middleware::Authenticated;
use crate::models::notification_map_user;
use crate::schemas::notification::{
    MarkViewedRequest, NotificationMapEntry, NotificationMapListQuery,
};
use crate::schemas::ApiResponse;
use crate::state::AppState;

pub fn notifications_map_user_routes(state: AppState) -> Router {
    Router::new()
        .route("/notifications_map_user", get(list_deliveries))
        .route("/notifications_map_user/my", get(my_notifications))
        .route("/notifications_map_user/user/{user_id}", get(user_notifications))
        .route("/notifications_map_user/mark-viewed", put(mark_viewed))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/notifications_map_user",
    tag = "Notification Deliveries",
    params(NotificationMapListQuery),
    responses((status = 200, description = "Paginated delivery rows"))
)]
async fn list_deliveries(
    State(state): State<AppState>,
    _auth: Authenticated,
    Query(query): Query<NotificationMapListQuery>,
) -> Result<Json<ApiResponse<Vec<notification_map_user::Model>>>> {
    let (items, pagination) = state.notification.list_deliveries(&query).await?;
    Ok(Json(ApiResponse::paginated(items, pagination)))
}

#[utoipa::path(
    get,
    path = "/notifications_map_user/my",
    tag = "Notification Deliveries",
    params(NotificationMapListQuery),
    responses((status = 200, description = "Caller's inbox"))
)]
async fn my_notifications(
    State(state): State<AppState>,
    auth: Authenticated,
    Query(query): Query<NotificationMapListQuery>,
) -> Result<Json<ApiResponse<Vec<NotificationMapEntry>>>> {
    let (items, pagination) = state.notification.inbox(auth.user_id(), &query).await?;
    Ok(Json(
        ApiResponse::paginated(items, pagination)
            .message("Notification mappings retrieved successfully"),
    ))
}

#[utoipa::path(
    get,
    path = "/notifications_map_user/user/{user_id}",
    tag = "Notification Deliveries",
    params(
        ("user_id" = i64, Path, description = "User ID"),
        NotificationMapListQuery
    ),
    responses((status = 200, description = "Inbox of one user"))
)]
async fn user_notifications(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(user_id): Path<i64>,
    Query(query): Query<NotificationMapListQuery>,
) -> Result<Json<ApiResponse<Vec<NotificationMapEntry>>>> {
    let (items, pagination) = state.notification.inbox(user_id, &query).await?;
    Ok(Json(
        ApiResponse::paginated(items, pagination)
            .message("Notification mappings retrieved successfully"),
    ))
}

#[utoipa::path(
    put,
    path = "/notifications_map_user/mark-viewed",
    tag = "Notification Deliveries",
    request_body = MarkViewedRequest,
    responses(
        (status = 200, description = "Delivery marked as viewed"),
        (status = 404, description = "Mapping not found or not owned by the caller")
    )
)]
async fn mark_viewed(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidJson(req): ValidJson<MarkViewedRequest>,
) -> Result<Json<ApiResponse<notification_map_user::Model>>> {
    let delivery = state
        .notification
        .mark_viewed(auth.user_id(), req, state.now())
        .await?;
    Ok(Json(ApiResponse::with_message(
        "Notification marked as viewed successfully",
        delivery,
    )))
}
