use serde::{Deserialize, Serialize};

use crate::models::user;

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "user_industryType")]
    pub industry_type: Option<String>,
    #[serde(rename = "acceptpolicy")]
    pub accept_policy: Option<bool>,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub mobile: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: user::Model,
}

/// Per-user flags a user may change on their own account
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdatePreferencesRequest {
    #[serde(rename = "user_industryType")]
    pub industry_type: Option<String>,
    pub notification_active: Option<bool>,
    pub notification_whatsapp: Option<bool>,
    #[serde(rename = "Task_Remidner")]
    pub task_reminder: Option<bool>,
    #[serde(rename = "Biometric_Authentications")]
    pub biometric_authentication: Option<bool>,
}
