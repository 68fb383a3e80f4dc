use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::endpoints::extractors::ValidJson;
use crate::error::Result;
use crate::middleware::Authenticated;
use crate::models::report;
use crate::schemas::report::{CreateReportRequest, ReportListQuery, UpdateReportRequest};
use crate::schemas::ApiResponse;
use crate::state::AppState;

pub fn reports_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/report",
            get(list_reports).post(create_report).put(update_report),
        )
        .route("/report/my", get(my_reports))
        .route("/report/{report_id}", get(get_report))
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/report",
    tag = "Reports",
    request_body = CreateReportRequest,
    responses(
        (status = 201, description = "Report computed and stored"),
        (status = 400, description = "Report already exists for this user"),
        (status = 404, description = "User not found")
    )
)]
async fn create_report(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidJson(req): ValidJson<CreateReportRequest>,
) -> Result<(StatusCode, Json<ApiResponse<report::Model>>)> {
    let created = state
        .reports
        .create(req, auth.user_id(), state.now())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Report created successfully", created)),
    ))
}

#[utoipa::path(
    put,
    path = "/report",
    tag = "Reports",
    request_body = UpdateReportRequest,
    responses(
        (status = 200, description = "Report recomputed"),
        (status = 404, description = "Report not found")
    )
)]
async fn update_report(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidJson(req): ValidJson<UpdateReportRequest>,
) -> Result<Json<ApiResponse<report::Model>>> {
    let updated = state
        .reports
        .update(req, auth.user_id(), state.now())
        .await?;
    Ok(Json(ApiResponse::with_message(
        "Report updated successfully",
        updated,
    )))
}

#[utoipa::path(
    get,
    path = "/report/{report_id}",
    tag = "Reports",
    params(("report_id" = i64, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Report refreshed from live tasks"),
        (status = 404, description = "Report not found")
    )
)]
async fn get_report(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(report_id): Path<i64>,
) -> Result<Json<ApiResponse<report::Model>>> {
    let report = state.reports.get(report_id, state.now()).await?;
    Ok(Json(ApiResponse::with_message(
        "Report retrieved and updated successfully",
        report,
    )))
}

#[utoipa::path(
    get,
    path = "/report",
    tag = "Reports",
    params(ReportListQuery),
    responses((status = 200, description = "Paginated reports, each refreshed"))
)]
async fn list_reports(
    State(state): State<AppState>,
    _auth: Authenticated,
    Query(query): Query<ReportListQuery>,
) -> Result<Json<ApiResponse<Vec<report::Model>>>> {
    let (items, pagination) = state.reports.list(&query, state.now()).await?;
    Ok(Json(
        ApiResponse::paginated(items, pagination)
            .message("Reports retrieved and updated successfully"),
    ))
}

#[utoipa::path(
    get,
    path = "/report/my",
    tag = "Reports",
    params(ReportListQuery),
    responses((status = 200, description = "Caller's reports, each refreshed"))
)]
async fn my_reports(
    State(state): State<AppState>,
    auth: Authenticated,
    Query(query): Query<ReportListQuery>,
) -> Result<Json<ApiResponse<Vec<report::Model>>>> {
    let (items, pagination) = state
        .reports
        .list_for_user(auth.user_id(), &query, state.now())
        .await?;
    Ok(Json(
        ApiResponse::paginated(items, pagination)
            .message("User reports retrieved and updated successfully"),
    ))
}
