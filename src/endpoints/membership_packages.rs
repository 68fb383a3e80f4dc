use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::endpoints::extractors::ValidJson;
use crate::error::Result;
use crate::middleware::Authenticated;
use crate::schemas::membership::{
    CreatePackageRequest, PackageListQuery, PackageResponse, UpdatePackageRequest,
};
use crate::schemas::ApiResponse;
use crate::services::membership_package as packages;
use crate::state::AppState;

pub fn membership_packages_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/membership-package",
            get(list_packages).post(create_package).put(update_package),
        )
        .route("/membership-package/{id}", get(get_package))
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/membership-package",
    tag = "Membership Packages",
    request_body = CreatePackageRequest,
    responses(
        (status = 201, description = "Package created"),
        (status = 400, description = "Validation failed")
    )
)]
async fn create_package(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidJson(req): ValidJson<CreatePackageRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PackageResponse>>)> {
    let created = packages::create_package(&state.db, req, auth.user_id(), state.now()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Membership package created successfully",
            created,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/membership-package",
    tag = "Membership Packages",
    request_body = UpdatePackageRequest,
    responses(
        (status = 200, description = "Package updated"),
        (status = 404, description = "Membership package not found")
    )
)]
async fn update_package(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidJson(req): ValidJson<UpdatePackageRequest>,
) -> Result<Json<ApiResponse<PackageResponse>>> {
    let updated = packages::update_package(&state.db, req, auth.user_id(), state.now()).await?;
    Ok(Json(ApiResponse::with_message(
        "Membership package updated successfully",
        updated,
    )))
}

#[utoipa::path(
    get,
    path = "/membership-package/{id}",
    tag = "Membership Packages",
    params(("id" = i64, Path, description = "Package ID")),
    responses(
        (status = 200, description = "Package with sub-user occupancy"),
        (status = 404, description = "Membership package not found")
    )
)]
async fn get_package(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<PackageResponse>>> {
    let package = packages::get_package(&state.db, id).await?;
    Ok(Json(ApiResponse::data(package)))
}

#[utoipa::path(
    get,
    path = "/membership-package",
    tag = "Membership Packages",
    params(PackageListQuery),
    responses((status = 200, description = "Paginated packages"))
)]
async fn list_packages(
    State(state): State<AppState>,
    _auth: Authenticated,
    Query(query): Query<PackageListQuery>,
) -> Result<Json<ApiResponse<Vec<PackageResponse>>>> {
    let (items, pagination) = packages::list_packages(&state.db, &query).await?;
    let message = format!("Found {} membership packages", items.len());
    Ok(Json(ApiResponse::paginated(items, pagination).message(message)))
}
