use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, utoipa::ToSchema)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(rename = "notification_id")]
    pub id: i64,
    pub title: String,
    pub message: String,
    pub notification_type: String,
    pub notification_view: bool,
    pub status: bool,
    pub created_by: Option<i64>,
    #[schema(value_type = String)]
    pub created_at: DateTimeUtc,
    pub updated_by: Option<i64>,
    #[schema(value_type = String)]
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::notification_map_user::Entity")]
    Recipients,
}

impl Related<super::notification_map_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recipients.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Notification type recorded for task dispatch
pub const TASK_ASSIGN_TYPE: &str = "Task Assign";
/// Notification type for everything else
pub const DEFAULT_TYPE: &str = "None";
