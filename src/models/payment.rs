use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, utoipa::ToSchema)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(rename = "payment_id")]
    pub id: i64,
    pub payment_type_id: i64,
    pub payment_by_user_id: i64,
    pub payment_get_by_user_id: i64,
    pub payment_status: String,
    #[sea_orm(unique)]
    pub transaction_no: Option<String>,
    pub amount: f64,
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
        belongs_to = "super::payment_type::Entity",
        from = "Column::PaymentTypeId",
        to = "super::payment_type::Column::Id"
    )]
    PaymentType,
    #[sea_orm(has_many = "super::membership_map_user::Entity")]
    MembershipMapUsers,
}

impl Related<super::payment_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaymentType.def()
    }
}

impl Related<super::membership_map_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MembershipMapUsers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Payment settlement state shared by payments and the memberships they settle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(PaymentStatus::Pending),
            "completed" => Some(PaymentStatus::Completed),
            "failed" => Some(PaymentStatus::Failed),
            "refunded" => Some(PaymentStatus::Refunded),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
