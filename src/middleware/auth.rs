//! Bearer token authentication for protected routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::EntityTrait;

use crate::error::AppError;
use crate::models::prelude::*;
use crate::services::security::{decode_token, TokenError};
use crate::state::AppState;

/// Authenticated user stored in request extensions
#[derive(Clone)]
pub struct AuthenticatedUser(pub user::Model);

/// Validates the bearer token, loads its user and stores it in the request
/// extensions. Every rejection is a 401 with a JSON envelope.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = match extract_bearer_token(&req) {
        Some(t) => t,
        None => return unauthorized_response("Access denied. No token provided."),
    };

    let user = match validate_token_and_get_user(&state, &token).await {
        Ok(u) => u,
        Err(response) => return response,
    };

    req.extensions_mut().insert(AuthenticatedUser(user));

    next.run(req).await
}

fn extract_bearer_token(req: &Request) -> Option<String> {
    let auth_header = req.headers().get(AUTHORIZATION)?;
    let auth_str = auth_header.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

async fn validate_token_and_get_user(
    state: &AppState,
    token: &str,
) -> Result<user::Model, Response> {
    let claims = decode_token(token).map_err(|e| match e {
        TokenError::Expired => unauthorized_response("Token has expired. Please login again."),
        TokenError::Invalid => unauthorized_response("Invalid token."),
    })?;

    let found = User::find_by_id(claims.user_id)
        .one(&state.db)
        .await
        .map_err(|e| AppError::Database(e).into_response())?;

    let user = found.ok_or_else(|| unauthorized_response("Invalid token. User not found."))?;

    if !user.status {
        return Err(unauthorized_response(
            "Account is deactivated. Please contact administrator.",
        ));
    }

    Ok(user)
}

fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "success": false,
            "message": message
        })),
    )
        .into_response()
}

/// Extractor for the user resolved by [`require_auth`]
#[derive(Clone)]
pub struct Authenticated(pub user::Model);

impl Authenticated {
    pub fn user_id(&self) -> i64 {
        self.0.id
    }
}

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("Access denied. No token provided.".to_string()))?;

        Ok(Authenticated(auth_user.0.clone()))
    }
}
