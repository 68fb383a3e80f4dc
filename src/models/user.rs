use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, utoipa::ToSchema)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(rename = "user_id")]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub mobile: String,
    #[serde(skip_serializing, default)]
    pub hashed_password: String,
    pub role_id: i64,
    #[serde(rename = "user_industryType")]
    pub industry_type: String,
    pub notification_active: bool,
    pub notification_whatsapp: bool,
    #[serde(rename = "Task_Remidner")]
    pub task_reminder: bool,
    #[serde(rename = "Biometric_Authentications")]
    pub biometric_authentication: bool,
    #[serde(rename = "acceptpolicy")]
    pub accept_policy: bool,
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
    #[sea_orm(has_many = "super::membership_map_user::Entity")]
    MembershipMapUsers,
    #[sea_orm(has_many = "super::notification_map_user::Entity")]
    NotificationMapUsers,
}

impl Related<super::membership_map_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MembershipMapUsers.def()
    }
}

impl Related<super::notification_map_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NotificationMapUsers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Whether task assignment notifications may be delivered to this user
    pub fn accepts_task_notifications(&self) -> bool {
        self.status && self.notification_active && self.task_reminder
    }
}

/// Industry a user (and a task) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndustryType {
    #[serde(rename = "Real Estate")]
    RealEstate,
    #[serde(rename = "Automobile")]
    Automobile,
    #[serde(rename = "null")]
    Unset,
}

impl IndustryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndustryType::RealEstate => "Real Estate",
            IndustryType::Automobile => "Automobile",
            IndustryType::Unset => "null",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Real Estate" => Some(IndustryType::RealEstate),
            "Automobile" => Some(IndustryType::Automobile),
            "null" => Some(IndustryType::Unset),
            _ => None,
        }
    }
}

impl std::fmt::Display for IndustryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_industry_type_parse() {
        assert_eq!(IndustryType::parse("Real Estate"), Some(IndustryType::RealEstate));
        assert_eq!(IndustryType::parse("Automobile"), Some(IndustryType::Automobile));
        assert_eq!(IndustryType::parse("null"), Some(IndustryType::Unset));
        assert_eq!(IndustryType::parse("real estate"), None);
    }

    #[test]
    fn test_industry_type_round_trips_through_str() {
        for industry in [
            IndustryType::RealEstate,
            IndustryType::Automobile,
            IndustryType::Unset,
        ] {
            assert_eq!(IndustryType::parse(industry.as_str()), Some(industry));
        }
    }
}
