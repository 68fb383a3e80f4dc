use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::endpoints::extractors::ValidJson;
use crate::error::Result;
use crate::middleware::Authenticated;
use crate::models::payment_type;
use crate::schemas::payment::{
    CreatePaymentTypeRequest, PaymentTypeListQuery, UpdatePaymentTypeRequest,
};
use crate::schemas::ApiResponse;
use crate::services::payment_type as payment_types;
use crate::state::AppState;

pub fn payment_types_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/payment-type",
            get(list_payment_types)
                .post(create_payment_type)
                .put(update_payment_type),
        )
        .route("/payment-type/{id}", get(get_payment_type))
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/payment-type",
    tag = "Payment Types",
    request_body = CreatePaymentTypeRequest,
    responses(
        (status = 201, description = "Payment type created"),
        (status = 400, description = "Missing or duplicate name")
    )
)]
async fn create_payment_type(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidJson(req): ValidJson<CreatePaymentTypeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<payment_type::Model>>)> {
    let created =
        payment_types::create_payment_type(&state.db, req, auth.user_id(), state.now()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Payment type created successfully",
            created,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/payment-type",
    tag = "Payment Types",
    request_body = UpdatePaymentTypeRequest,
    responses(
        (status = 200, description = "Payment type updated"),
        (status = 404, description = "Payment type not found")
    )
)]
async fn update_payment_type(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidJson(req): ValidJson<UpdatePaymentTypeRequest>,
) -> Result<Json<ApiResponse<payment_type::Model>>> {
    let updated =
        payment_types::update_payment_type(&state.db, req, auth.user_id(), state.now()).await?;
    Ok(Json(ApiResponse::with_message(
        "Payment type updated successfully",
        updated,
    )))
}

#[utoipa::path(
    get,
    path = "/payment-type/{id}",
    tag = "Payment Types",
    params(("id" = i64, Path, description = "Payment type ID")),
    responses(
        (status = 200, description = "Payment type"),
        (status = 404, description = "Payment type not found")
    )
)]
async fn get_payment_type(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<payment_type::Model>>> {
    let found = payment_types::get_payment_type(&state.db, id).await?;
    Ok(Json(ApiResponse::data(found)))
}

#[utoipa::path(
    get,
    path = "/payment-type",
    tag = "Payment Types",
    params(PaymentTypeListQuery),
    responses((status = 200, description = "Paginated payment types"))
)]
async fn list_payment_types(
    State(state): State<AppState>,
    _auth: Authenticated,
    Query(query): Query<PaymentTypeListQuery>,
) -> Result<Json<ApiResponse<Vec<payment_type::Model>>>> {
    let (items, pagination) = payment_types::list_payment_types(&state.db, &query).await?;
    Ok(Json(ApiResponse::paginated(items, pagination)))
}
