use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::endpoints::extractors::ValidJson;
use crate::error::Result;
use crate::middleware::Authenticated;
use crate::models::payment;
use crate::schemas::payment::{
    CreatePaymentRequest, PaymentListQuery, PaymentWithCascade, UpdatePaymentRequest,
};
use crate::schemas::ApiResponse;
use crate::services::payment as payments;
use crate::state::AppState;

pub fn payments_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/payment",
            get(list_payments).post(create_payment).put(update_payment),
        )
        .route("/payment/{payment_id}", get(get_payment))
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/payment",
    tag = "Payments",
    request_body = CreatePaymentRequest,
    responses(
        (status = 201, description = "Payment created; memberships activated when completed"),
        (status = 400, description = "Validation failed or unknown payment type")
    )
)]
async fn create_payment(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidJson(req): ValidJson<CreatePaymentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PaymentWithCascade>>)> {
    let created = payments::create_payment(&state.db, req, auth.user_id(), state.now()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Payment created successfully",
            created,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/payment",
    tag = "Payments",
    request_body = UpdatePaymentRequest,
    responses(
        (status = 200, description = "Payment updated; status changes cascade to memberships"),
        (status = 404, description = "Payment not found")
    )
)]
async fn update_payment(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidJson(req): ValidJson<UpdatePaymentRequest>,
) -> Result<Json<ApiResponse<PaymentWithCascade>>> {
    let updated = payments::update_payment(&state.db, req, auth.user_id(), state.now()).await?;
    Ok(Json(ApiResponse::with_message(
        "Payment updated successfully",
        updated,
    )))
}

#[utoipa::path(
    get,
    path = "/payment/{payment_id}",
    tag = "Payments",
    params(("payment_id" = i64, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment"),
        (status = 404, description = "Payment not found")
    )
)]
async fn get_payment(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(payment_id): Path<i64>,
) -> Result<Json<ApiResponse<payment::Model>>> {
    let found = payments::get_payment(&state.db, payment_id).await?;
    Ok(Json(ApiResponse::data(found)))
}

#[utoipa::path(
    get,
    path = "/payment",
    tag = "Payments",
    params(PaymentListQuery),
    responses((status = 200, description = "Paginated payments"))
)]
async fn list_payments(
    State(state): State<AppState>,
    _auth: Authenticated,
    Query(query): Query<PaymentListQuery>,
) -> Result<Json<ApiResponse<Vec<payment::Model>>>> {
    let (items, pagination) = payments::list_payments(&state.db, &query).await?;
    let total = pagination.total_docs;
    Ok(Json(ApiResponse::paginated(items, pagination).count(total)))
}
