use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, utoipa::ToSchema)]
#[sea_orm(table_name = "membership_packages")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(rename = "package_id")]
    pub id: i64,
    pub package_name: String,
    pub amount: f64,
    /// Membership length in days; `None` means the membership never expires
    pub duration: Option<i32>,
    /// Maximum number of active sub-users. Occupancy is always counted, never stored.
    pub sub_user_limit: i32,
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
    #[sea_orm(has_many = "super::membership_map_user::Entity")]
    MembershipMapUsers,
    #[sea_orm(has_many = "super::membership_package_map_sub_user::Entity")]
    SubUsers,
}

impl Related<super::membership_map_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MembershipMapUsers.def()
    }
}

impl Related<super::membership_package_map_sub_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubUsers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
