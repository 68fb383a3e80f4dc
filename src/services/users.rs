//! Account registration, login and self-service preferences.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::db::DbConn;
use crate::error::{AppError, Result};
use crate::models::prelude::*;
use crate::models::user::IndustryType;
use crate::schemas::user::{LoginRequest, LoginResponse, RegisterRequest, UpdatePreferencesRequest};
use crate::services::non_blank;
use crate::services::security::{create_access_token, hash_password, verify_password};

const DEFAULT_ROLE_ID: i64 = 1;
const DEACTIVATED: &str = "Account is deactivated. Please contact administrator.";

fn parse_industry(value: &str) -> Result<IndustryType> {
    IndustryType::parse(value).ok_or_else(|| {
        AppError::BadRequest(
            "Invalid industry type. Must be one of: Real Estate, Automobile, null".to_string(),
        )
    })
}

pub async fn register(
    db: &DbConn,
    req: RegisterRequest,
    now: DateTime<Utc>,
) -> Result<user::Model> {
    let (name, email, mobile, password) = match (
        non_blank(req.name),
        non_blank(req.email),
        non_blank(req.mobile),
        req.password.filter(|p| !p.is_empty()),
    ) {
        (Some(name), Some(email), Some(mobile), Some(password)) => {
            (name, email.to_lowercase(), mobile, password)
        }
        _ => {
            return Err(AppError::BadRequest(
                "Name, email, mobile, and password are required".to_string(),
            ))
        }
    };
    let industry = match non_blank(req.industry_type) {
        Some(value) => parse_industry(&value)?,
        None => IndustryType::Unset,
    };

    if User::find()
        .filter(user::Column::Email.eq(email.as_str()))
        .one(db)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "User with this email already exists".to_string(),
        ));
    }
    if User::find()
        .filter(user::Column::Mobile.eq(mobile.as_str()))
        .one(db)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "User with this mobile already exists".to_string(),
        ));
    }

    let created = user::ActiveModel {
        name: Set(name),
        email: Set(email),
        mobile: Set(mobile),
        hashed_password: Set(hash_password(&password)?),
        role_id: Set(DEFAULT_ROLE_ID),
        industry_type: Set(industry.as_str().to_string()),
        notification_active: Set(true),
        notification_whatsapp: Set(true),
        task_reminder: Set(true),
        biometric_authentication: Set(false),
        accept_policy: Set(req.accept_policy.unwrap_or(false)),
        status: Set(true),
        created_by: Set(None),
        created_at: Set(now),
        updated_by: Set(None),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| AppError::from_unique_violation(e, "User already exists"))?;

    tracing::info!(user_id = created.id, "User registered");
    Ok(created)
}

/// Verify mobile and password and issue a bearer token
pub async fn login(db: &DbConn, req: LoginRequest) -> Result<LoginResponse> {
    let (mobile, password) = match (non_blank(req.mobile), req.password) {
        (Some(mobile), Some(password)) if !password.is_empty() => (mobile, password),
        _ => {
            return Err(AppError::BadRequest(
                "Mobile and password are required".to_string(),
            ))
        }
    };

    let found = User::find()
        .filter(user::Column::Mobile.eq(mobile.as_str()))
        .one(db)
        .await?;

    let user = match found {
        Some(user) if verify_password(&password, &user.hashed_password) => user,
        _ => {
            tracing::debug!("Rejected login for unknown mobile or wrong password");
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }
    };

    if !user.status {
        return Err(AppError::Unauthorized(DEACTIVATED.to_string()));
    }

    let token = create_access_token(user.id)?;
    tracing::info!(user_id = user.id, "User logged in");
    Ok(LoginResponse { token, user })
}

pub async fn get_user(db: &DbConn, user_id: i64) -> Result<user::Model> {
    User::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// Update the caller's notification flags and industry
pub async fn update_preferences(
    db: &DbConn,
    current: user::Model,
    req: UpdatePreferencesRequest,
    now: DateTime<Utc>,
) -> Result<user::Model> {
    let industry = non_blank(req.industry_type)
        .map(|v| parse_industry(&v))
        .transpose()?;

    let user_id = current.id;
    let mut active: user::ActiveModel = current.into();
    if let Some(industry) = industry {
        active.industry_type = Set(industry.as_str().to_string());
    }
    if let Some(v) = req.notification_active {
        active.notification_active = Set(v);
    }
    if let Some(v) = req.notification_whatsapp {
        active.notification_whatsapp = Set(v);
    }
    if let Some(v) = req.task_reminder {
        active.task_reminder = Set(v);
    }
    if let Some(v) = req.biometric_authentication {
        active.biometric_authentication = Set(v);
    }
    active.updated_by = Set(Some(user_id));
    active.updated_at = Set(now);

    let updated = active.update(db).await?;
    tracing::info!(user_id, "User preferences updated");
    Ok(updated)
}
