use serde::{Deserialize, Serialize};

use crate::models::payment;
use crate::schemas::PageQuery;

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct CreatePaymentRequest {
    pub payment_type_id: Option<i64>,
    pub payment_by_user_id: Option<i64>,
    pub payment_get_by_user_id: Option<i64>,
    pub payment_status: Option<String>,
    pub transaction_no: Option<String>,
    pub amount: Option<f64>,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdatePaymentRequest {
    pub payment_id: Option<i64>,
    pub payment_type_id: Option<i64>,
    pub payment_by_user_id: Option<i64>,
    pub payment_get_by_user_id: Option<i64>,
    pub payment_status: Option<String>,
    pub transaction_no: Option<String>,
    pub amount: Option<f64>,
    pub status: Option<bool>,
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaymentListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<bool>,
    pub payment_status: Option<String>,
    pub payment_type_id: Option<i64>,
    pub payment_by_user_id: Option<i64>,
    pub payment_get_by_user_id: Option<i64>,
    /// Substring match on `transaction_no`
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl PaymentListQuery {
    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            limit: self.limit,
        }
    }
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct CreatePaymentTypeRequest {
    pub payment_type: Option<String>,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdatePaymentTypeRequest {
    pub paymenttype_id: Option<i64>,
    pub payment_type: Option<String>,
    pub status: Option<bool>,
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaymentTypeListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<bool>,
    pub search: Option<String>,
}

impl PaymentTypeListQuery {
    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            limit: self.limit,
        }
    }
}

/// A payment write together with the membership rows its cascade touched
#[derive(Debug, Serialize)]
pub struct PaymentWithCascade {
    #[serde(flatten)]
    pub payment: payment::Model,
    pub memberships_updated: u64,
}
