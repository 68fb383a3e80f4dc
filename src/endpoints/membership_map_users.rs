use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::endpoints::extractors::ValidJson;
use crate::error::Result;
use crate::middleware::Authenticated;
use crate::models::membership_map_user;
use crate::schemas::membership::{
    CreateMembershipMapUserRequest, MembershipMapUserListQuery, UpdateMembershipMapUserRequest,
};
use crate::schemas::ApiResponse;
use crate::services::membership::{self, ActiveMembership};
use crate::state::AppState;

pub fn membership_map_users_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/membership-map-user",
            get(list_membership_map_users)
                .post(create_membership_map_user)
                .put(update_membership_map_user),
        )
        .route(
            "/membership-map-user/active_membership",
            get(get_active_memberships),
        )
        .route("/membership-map-user/{id}", get(get_membership_map_user))
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/membership-map-user",
    tag = "Membership Map Users",
    request_body = CreateMembershipMapUserRequest,
    responses(
        (status = 201, description = "Membership created inactive and pending"),
        (status = 400, description = "Missing package or user"),
        (status = 404, description = "Package, user or payment not found")
    )
)]
async fn create_membership_map_user(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidJson(req): ValidJson<CreateMembershipMapUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<membership_map_user::Model>>)> {
    let created =
        membership::create_membership_map_user(&state.db, req, auth.user_id(), state.now())
            .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Membership map user created successfully",
            created,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/membership-map-user",
    tag = "Membership Map Users",
    request_body = UpdateMembershipMapUserRequest,
    responses(
        (status = 200, description = "Membership updated"),
        (status = 404, description = "Membership map user not found")
    )
)]
async fn update_membership_map_user(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidJson(req): ValidJson<UpdateMembershipMapUserRequest>,
) -> Result<Json<ApiResponse<membership_map_user::Model>>> {
    let updated =
        membership::update_membership_map_user(&state.db, req, auth.user_id(), state.now())
            .await?;
    Ok(Json(ApiResponse::with_message(
        "Membership map user updated successfully",
        updated,
    )))
}

#[utoipa::path(
    get,
    path = "/membership-map-user/{id}",
    tag = "Membership Map Users",
    params(("id" = i64, Path, description = "Membership map ID")),
    responses(
        (status = 200, description = "Membership map user"),
        (status = 404, description = "Membership map user not found")
    )
)]
async fn get_membership_map_user(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<membership_map_user::Model>>> {
    let found = membership::get_membership_map_user(&state.db, id).await?;
    Ok(Json(ApiResponse::data(found)))
}

#[utoipa::path(
    get,
    path = "/membership-map-user",
    tag = "Membership Map Users",
    params(MembershipMapUserListQuery),
    responses((status = 200, description = "Paginated membership map users"))
)]
async fn list_membership_map_users(
    State(state): State<AppState>,
    _auth: Authenticated,
    Query(query): Query<MembershipMapUserListQuery>,
) -> Result<Json<ApiResponse<Vec<membership_map_user::Model>>>> {
    let (items, pagination) = membership::list_membership_map_users(&state.db, &query).await?;
    let message = format!("Found {} membership map users", items.len());
    let total = pagination.total_docs;
    Ok(Json(
        ApiResponse::paginated(items, pagination)
            .message(message)
            .count(total),
    ))
}

/// Caller's active, unexpired memberships with their packages
#[utoipa::path(
    get,
    path = "/membership-map-user/active_membership",
    tag = "Membership Map Users",
    responses(
        (status = 200, description = "Active memberships"),
        (status = 401, description = "Not authenticated")
    )
)]
async fn get_active_memberships(
    State(state): State<AppState>,
    auth: Authenticated,
) -> Result<Json<ApiResponse<Vec<ActiveMembership>>>> {
    let memberships = membership::active_memberships(&state.db, auth.user_id(), state.now()).await?;
    let message = format!("Found {} active memberships", memberships.len());
    let count = memberships.len() as u64;
    Ok(Json(
        ApiResponse::with_message(message, memberships).count(count),
    ))
}
