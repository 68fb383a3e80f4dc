use serde::{Deserialize, Serialize};

use crate::models::notification;
use crate::schemas::PageQuery;

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct CreateNotificationRequest {
    pub title: Option<String>,
    #[serde(alias = "massage")]
    pub message: Option<String>,
    pub notification_type: Option<String>,
    pub notification_view: Option<bool>,
    pub status: Option<bool>,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateNotificationRequest {
    #[serde(alias = "id")]
    pub notification_id: Option<i64>,
    pub title: Option<String>,
    #[serde(alias = "massage")]
    pub message: Option<String>,
    pub notification_type: Option<String>,
    pub notification_view: Option<bool>,
    pub status: Option<bool>,
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NotificationListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<bool>,
    pub notification_type: Option<String>,
    pub search: Option<String>,
}

impl NotificationListQuery {
    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            limit: self.limit,
        }
    }
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct SendByIndustryRequest {
    pub notification_id: Option<i64>,
    #[serde(rename = "industryType")]
    pub industry_type: Option<String>,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct SendToUsersRequest {
    pub notification_id: Option<i64>,
    pub user_ids: Option<Vec<i64>>,
}

/// A recipient of a broadcast
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct BroadcastRecipient {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub notification_active: bool,
}

/// A user excluded from a broadcast
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct SkippedRecipient {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct BroadcastResult {
    pub notification: notification::Model,
    pub users_count: usize,
    pub skipped_users_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry_type: Option<String>,
    pub users_with_notifications: Vec<BroadcastRecipient>,
    pub skipped_users: Vec<SkippedRecipient>,
}

impl BroadcastResult {
    pub fn summary(&self) -> String {
        match &self.industry_type {
            Some(industry) => format!(
                "Notification sent successfully to {} users with industry type: {} ({} users skipped due to disabled notifications)",
                self.users_count, industry, self.skipped_users_count
            ),
            None => format!(
                "Notification sent successfully to {} users ({} users skipped due to disabled notifications)",
                self.users_count, self.skipped_users_count
            ),
        }
    }
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct MarkViewedRequest {
    pub notification_map_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NotificationMapListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<bool>,
    pub notification_view: Option<bool>,
    pub notification_id: Option<i64>,
    pub user_id: Option<i64>,
}

impl NotificationMapListQuery {
    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            limit: self.limit,
        }
    }
}

/// Delivery row joined with its notification
#[derive(Debug, Serialize)]
pub struct NotificationMapEntry {
    pub notification_map_id: i64,
    pub user_id: i64,
    pub notification_view: bool,
    pub status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<notification::Model>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
