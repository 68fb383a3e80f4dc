use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, utoipa::ToSchema)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(rename = "task_id")]
    pub id: i64,
    #[serde(rename = "Title_Description")]
    pub title_description: String,
    #[serde(rename = "Task_name")]
    pub task_name: String,
    #[serde(rename = "Task_address")]
    pub task_address: String,
    #[serde(rename = "Task_type")]
    pub task_type: String,
    #[serde(rename = "Assign_to_id")]
    pub assign_to_id: Option<i64>,
    #[serde(rename = "Task_status")]
    pub task_status: String,
    pub property_location_id: Option<i64>,
    pub property_type_id: Option<i64>,
    pub transaction_type_id: Option<i64>,
    pub property_sub_type_id: Option<i64>,
    pub internal_area: Option<String>,
    pub condition: Option<i64>,
    pub washroom: Option<i64>,
    #[serde(rename = "number_of_Parking")]
    pub number_of_parking: i32,
    pub land_area: Option<String>,
    pub price_of_the_property: f64,
    #[serde(rename = "ReferenceNo")]
    pub reference_no: Option<String>,
    #[serde(rename = "Task_Reminder")]
    pub task_reminder: bool,
    pub status: bool,
    pub created_by: i64,
    #[schema(value_type = String)]
    pub created_at: DateTimeUtc,
    pub updated_by: Option<i64>,
    #[schema(value_type = String)]
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AssignToId",
        to = "super::user::Column::Id"
    )]
    Assignee,
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskType {
    #[serde(rename = "Real Estate")]
    RealEstate,
    #[serde(rename = "Automobile")]
    Automobile,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::RealEstate => "Real Estate",
            TaskType::Automobile => "Automobile",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Real Estate" => Some(TaskType::RealEstate),
            "Automobile" => Some(TaskType::Automobile),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(TaskStatus::Pending),
            "In Progress" => Some(TaskStatus::InProgress),
            "Completed" => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
