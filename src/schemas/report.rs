use serde::Deserialize;

use crate::schemas::PageQuery;

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct CreateReportRequest {
    pub user_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateReportRequest {
    pub report_id: Option<i64>,
    pub user_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub user_id: Option<i64>,
    /// Completion percentage
    pub status: Option<i32>,
    pub sort_order: Option<String>,
}

impl ReportListQuery {
    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            limit: self.limit,
        }
    }
}
