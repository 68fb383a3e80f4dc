pub mod auth;
pub mod extractors;
pub mod membership_map_users;
pub mod membership_packages;
pub mod notifications;
pub mod notifications_map_user;
pub mod payment_types;
pub mod payments;
pub mod reports;
pub mod sub_users;
pub mod tasks;
pub mod users;

use axum::{middleware as axum_middleware, routing::get, Json, Router};

use crate::config::CONFIG;
use crate::middleware::require_auth;
use crate::state::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/api/health", get(health_check))
        .merge(auth::auth_routes(state.clone()));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .merge(users::users_routes(state.clone()))
        .merge(payment_types::payment_types_routes(state.clone()))
        .merge(membership_packages::membership_packages_routes(state.clone()))
        .merge(payments::payments_routes(state.clone()))
        .merge(membership_map_users::membership_map_users_routes(state.clone()))
        .merge(sub_users::sub_users_routes(state.clone()))
        .merge(tasks::tasks_routes(state.clone()))
        .merge(notifications::notifications_routes(state.clone()))
        .merge(notifications_map_user::notifications_map_user_routes(state.clone()))
        .merge(reports::reports_routes(state.clone()))
        .layer(axum_middleware::from_fn_with_state(state, require_auth));

    public_routes.merge(protected_routes)
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "success": true,
        "status": "ok",
        "version": CONFIG.version,
    }))
}
