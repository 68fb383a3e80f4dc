use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::endpoints::extractors::ValidJson;
use crate::error::Result;
use crate::middleware::Authenticated;
use crate::models::membership_package_map_sub_user;
use crate::schemas::membership::{CreateSubUserRequest, SubUserListQuery, UpdateSubUserRequest};
use crate::schemas::ApiResponse;
use crate::services::sub_user;
use crate::state::AppState;

pub fn sub_users_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/membership-package-map-sub-user",
            get(list_sub_users).post(create_sub_user).put(update_sub_user),
        )
        .route(
            "/membership-package-map-sub-user/package/{membership_package_id}",
            get(list_sub_users_by_package),
        )
        .route("/membership-package-map-sub-user/{id}", get(get_sub_user))
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/membership-package-map-sub-user",
    tag = "Sub Users",
    request_body = CreateSubUserRequest,
    responses(
        (status = 201, description = "Sub-user mapped to package"),
        (status = 400, description = "Duplicate mapping or package at capacity"),
        (status = 404, description = "User or package not found")
    )
)]
async fn create_sub_user(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidJson(req): ValidJson<CreateSubUserRequest>,
) -> Result<(
    StatusCode,
    Json<ApiResponse<membership_package_map_sub_user::Model>>,
)> {
    let created = sub_user::create_sub_user(&state.db, req, auth.user_id(), state.now()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Membership package map sub-user created successfully",
            created,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/membership-package-map-sub-user",
    tag = "Sub Users",
    request_body = UpdateSubUserRequest,
    responses(
        (status = 200, description = "Mapping updated"),
        (status = 400, description = "Destination package at capacity"),
        (status = 404, description = "Mapping not found")
    )
)]
async fn update_sub_user(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidJson(req): ValidJson<UpdateSubUserRequest>,
) -> Result<Json<ApiResponse<membership_package_map_sub_user::Model>>> {
    let updated = sub_user::update_sub_user(&state.db, req, auth.user_id(), state.now()).await?;
    Ok(Json(ApiResponse::with_message(
        "Membership package map sub-user updated successfully",
        updated,
    )))
}

#[utoipa::path(
    get,
    path = "/membership-package-map-sub-user/{id}",
    tag = "Sub Users",
    params(("id" = i64, Path, description = "Package sub-user ID")),
    responses(
        (status = 200, description = "Mapping"),
        (status = 404, description = "Mapping not found")
    )
)]
async fn get_sub_user(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<membership_package_map_sub_user::Model>>> {
    let found = sub_user::get_sub_user(&state.db, id).await?;
    Ok(Json(ApiResponse::data(found)))
}

#[utoipa::path(
    get,
    path = "/membership-package-map-sub-user",
    tag = "Sub Users",
    params(SubUserListQuery),
    responses((status = 200, description = "Paginated mappings"))
)]
async fn list_sub_users(
    State(state): State<AppState>,
    _auth: Authenticated,
    Query(query): Query<SubUserListQuery>,
) -> Result<Json<ApiResponse<Vec<membership_package_map_sub_user::Model>>>> {
    let (items, pagination) = sub_user::list_sub_users(&state.db, &query).await?;
    Ok(Json(ApiResponse::paginated(items, pagination)))
}

#[utoipa::path(
    get,
    path = "/membership-package-map-sub-user/package/{membership_package_id}",
    tag = "Sub Users",
    params(
        ("membership_package_id" = i64, Path, description = "Package ID"),
        SubUserListQuery
    ),
    responses((status = 200, description = "Paginated mappings of one package"))
)]
async fn list_sub_users_by_package(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(membership_package_id): Path<i64>,
    Query(mut query): Query<SubUserListQuery>,
) -> Result<Json<ApiResponse<Vec<membership_package_map_sub_user::Model>>>> {
    query.membership_package_id = Some(membership_package_id);
    let (items, pagination) = sub_user::list_sub_users(&state.db, &query).await?;
    Ok(Json(ApiResponse::paginated(items, pagination)))
}
