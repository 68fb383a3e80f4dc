use axum::{extract::State, http::StatusCode, routing::post, Json, Router};

use crate::endpoints::extractors::ValidJson;
use crate::error::Result;
use crate::models::user;
use crate::schemas::user::{LoginRequest, LoginResponse, RegisterRequest};
use crate::schemas::ApiResponse;
use crate::services::users;
use crate::state::AppState;

pub fn auth_routes(state: AppState) -> Router {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered"),
        (status = 400, description = "Missing fields or duplicate email/mobile")
    )
)]
async fn register(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<user::Model>>)> {
    let user = users::register(&state.db, req, state.now()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("User registered successfully", user)),
    ))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Bearer token and user"),
        (status = 401, description = "Invalid credentials or deactivated account")
    )
)]
async fn login(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>> {
    let response = users::login(&state.db, req).await?;
    Ok(Json(ApiResponse::with_message("Login successful", response)))
}
