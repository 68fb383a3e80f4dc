use serde::{Deserialize, Serialize};

use crate::schemas::PageQuery;

#[derive(Debug, Default, Clone, Deserialize, utoipa::ToSchema)]
pub struct CreateTaskRequest {
    #[serde(rename = "Title_Description")]
    pub title_description: Option<String>,
    #[serde(rename = "Task_name")]
    pub task_name: Option<String>,
    #[serde(rename = "Task_address")]
    pub task_address: Option<String>,
    #[serde(rename = "Task_type")]
    pub task_type: Option<String>,
    #[serde(rename = "Assign_to_id")]
    pub assign_to_id: Option<i64>,
    #[serde(rename = "Task_status")]
    pub task_status: Option<String>,
    pub property_location_id: Option<i64>,
    pub property_type_id: Option<i64>,
    pub transaction_type_id: Option<i64>,
    pub property_sub_type_id: Option<i64>,
    pub internal_area: Option<String>,
    pub condition: Option<i64>,
    pub washroom: Option<i64>,
    #[serde(rename = "number_of_Parking")]
    pub number_of_parking: Option<i32>,
    pub land_area: Option<String>,
    pub price_of_the_property: Option<f64>,
    #[serde(rename = "ReferenceNo")]
    pub reference_no: Option<String>,
    #[serde(rename = "Task_Reminder")]
    pub task_reminder: Option<bool>,
    pub status: Option<bool>,
}

#[derive(Debug, Default, Clone, Deserialize, utoipa::ToSchema)]
pub struct UpdateTaskRequest {
    pub task_id: Option<i64>,
    #[serde(rename = "Title_Description")]
    pub title_description: Option<String>,
    #[serde(rename = "Task_name")]
    pub task_name: Option<String>,
    #[serde(rename = "Task_address")]
    pub task_address: Option<String>,
    #[serde(rename = "Task_type")]
    pub task_type: Option<String>,
    #[serde(rename = "Assign_to_id")]
    pub assign_to_id: Option<i64>,
    #[serde(rename = "Task_status")]
    pub task_status: Option<String>,
    pub property_location_id: Option<i64>,
    pub property_type_id: Option<i64>,
    pub transaction_type_id: Option<i64>,
    pub property_sub_type_id: Option<i64>,
    pub internal_area: Option<String>,
    pub condition: Option<i64>,
    pub washroom: Option<i64>,
    #[serde(rename = "number_of_Parking")]
    pub number_of_parking: Option<i32>,
    pub land_area: Option<String>,
    pub price_of_the_property: Option<f64>,
    #[serde(rename = "ReferenceNo")]
    pub reference_no: Option<String>,
    #[serde(rename = "Task_Reminder")]
    pub task_reminder: Option<bool>,
    pub status: Option<bool>,
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TaskListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<bool>,
    #[serde(rename = "Task_status", alias = "task_status")]
    pub task_status: Option<String>,
    #[serde(rename = "Task_type", alias = "task_type")]
    pub task_type: Option<String>,
    #[serde(rename = "Assign_to_id", alias = "assign_to_id")]
    pub assign_to_id: Option<i64>,
    pub property_location_id: Option<i64>,
    pub property_type_id: Option<i64>,
    pub transaction_type_id: Option<i64>,
    pub property_sub_type_id: Option<i64>,
    /// Matches task name, description, address or reference number
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl TaskListQuery {
    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            limit: self.limit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCounts {
    pub total_member_count: u64,
    pub total_member_subscription_count: u64,
    pub task_assigned_count: u64,
    pub task_completed_count: u64,
    pub task_pending_count: u64,
}
