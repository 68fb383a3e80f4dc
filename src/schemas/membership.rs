use serde::{Deserialize, Serialize};

use crate::models::membership_package;
use crate::schemas::PageQuery;

// ============================================================================
// Membership packages
// ============================================================================

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct CreatePackageRequest {
    pub package_name: Option<String>,
    pub amount: Option<f64>,
    pub duration: Option<i32>,
    #[serde(alias = "capacity")]
    pub sub_user_limit: Option<i32>,
    pub status: Option<bool>,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdatePackageRequest {
    #[serde(alias = "package_id")]
    pub id: Option<i64>,
    pub package_name: Option<String>,
    pub amount: Option<f64>,
    pub duration: Option<i32>,
    #[serde(alias = "capacity")]
    pub sub_user_limit: Option<i32>,
    pub status: Option<bool>,
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PackageListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<bool>,
    pub search: Option<String>,
}

impl PackageListQuery {
    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            limit: self.limit,
        }
    }
}

/// Package plus its live sub-user occupancy
#[derive(Debug, Serialize)]
pub struct PackageResponse {
    #[serde(flatten)]
    pub package: membership_package::Model,
    pub active_sub_user_count: u64,
    pub remaining_capacity: u64,
}

impl PackageResponse {
    pub fn new(package: membership_package::Model, active_sub_user_count: u64) -> Self {
        let capacity = u64::try_from(package.sub_user_limit).unwrap_or(0);
        Self {
            remaining_capacity: capacity.saturating_sub(active_sub_user_count),
            active_sub_user_count,
            package,
        }
    }
}

// ============================================================================
// Membership map (user <-> package)
// ============================================================================

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct CreateMembershipMapUserRequest {
    pub package_id: Option<i64>,
    pub user_id: Option<i64>,
    pub status: Option<bool>,
    pub payment_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateMembershipMapUserRequest {
    #[serde(rename = "Id", alias = "id", alias = "membership_map_id")]
    pub id: Option<i64>,
    pub package_id: Option<i64>,
    pub user_id: Option<i64>,
    pub status: Option<bool>,
    pub payment_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MembershipMapUserListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<bool>,
    pub package_id: Option<i64>,
    pub user_id: Option<i64>,
}

impl MembershipMapUserListQuery {
    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            limit: self.limit,
        }
    }
}

// ============================================================================
// Sub-user mappings
// ============================================================================

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct CreateSubUserRequest {
    pub user_id: Option<i64>,
    pub membership_package_id: Option<i64>,
    pub status: Option<bool>,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateSubUserRequest {
    pub package_sub_user_id: Option<i64>,
    pub user_id: Option<i64>,
    pub membership_package_id: Option<i64>,
    pub status: Option<bool>,
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SubUserListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<bool>,
    pub user_id: Option<i64>,
    pub membership_package_id: Option<i64>,
}

impl SubUserListQuery {
    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            limit: self.limit,
        }
    }
}
