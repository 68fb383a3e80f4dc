use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};

use crate::endpoints::extractors::ValidJson;
use crate::error::Result;
use crate::middleware::Authenticated;
use crate::models::user;
use crate::schemas::user::UpdatePreferencesRequest;
use crate::schemas::ApiResponse;
use crate::services::users;
use crate::state::AppState;

pub fn users_routes(state: AppState) -> Router {
    Router::new()
        .route("/users/me", get(get_me))
        .route("/users/preferences", put(update_preferences))
        .route("/users/{user_id}", get(get_user))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    responses((status = 200, description = "The caller's account"))
)]
async fn get_me(auth: Authenticated) -> Json<ApiResponse<user::Model>> {
    Json(ApiResponse::data(auth.0))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}",
    tag = "Users",
    params(("user_id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User"),
        (status = 404, description = "User not found")
    )
)]
async fn get_user(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(user_id): Path<i64>,
) -> Result<Json<ApiResponse<user::Model>>> {
    let user = users::get_user(&state.db, user_id).await?;
    Ok(Json(ApiResponse::data(user)))
}

#[utoipa::path(
    put,
    path = "/users/preferences",
    tag = "Users",
    request_body = UpdatePreferencesRequest,
    responses((status = 200, description = "Preferences updated"))
)]
async fn update_preferences(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidJson(req): ValidJson<UpdatePreferencesRequest>,
) -> Result<Json<ApiResponse<user::Model>>> {
    let user = users::update_preferences(&state.db, auth.0, req, state.now()).await?;
    Ok(Json(ApiResponse::with_message(
        "Preferences updated successfully",
        user,
    )))
}
