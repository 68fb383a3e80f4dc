use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, utoipa::ToSchema)]
#[sea_orm(table_name = "reports")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(rename = "report_id")]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    #[serde(rename = "Total_Task")]
    pub total_task: i32,
    /// Completion percentage, 0..=100
    pub status: i32,
    #[serde(rename = "last_completed_Task")]
    #[schema(value_type = Option<String>)]
    pub last_completed_task: Option<DateTimeUtc>,
    #[serde(rename = "TaskBreakdown")]
    #[schema(value_type = Object)]
    pub task_breakdown: Json,
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
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl ActiveModelBehavior for ActiveModel {}
