//! Report regeneration tests
//!
//! Covers:
//! - Create computes statistics from the assignee's live tasks
//! - Every read recomputes and overwrites the stored row
//! - `GET /report/{report_id}` returns the refreshed document
//! - One report per user

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chrono::Duration;
use http_body_util::BodyExt;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use tower::util::ServiceExt;

mod common;
use common::{
    bearer_token, build_test_app_state, create_test_db, create_test_user, seed_task,
    test_instant,
};

use propdesk::endpoints::create_router;
use propdesk::error::AppError;
use propdesk::models::prelude::*;
use propdesk::schemas::report::{CreateReportRequest, ReportListQuery};
use propdesk::services::report::ReportService;

// ============================================================================
// Service
// ============================================================================

#[tokio::test]
async fn test_create_computes_from_live_tasks() {
    let db = create_test_db().await;
    let now = test_instant();
    let agent = create_test_user(&db, "Agent", "9000000001").await;
    seed_task(&db, agent.id, "Real Estate", "Completed", now).await;
    seed_task(&db, agent.id, "Real Estate", "Pending", now).await;

    let service = ReportService::new(db.clone());
    let report = service
        .create(
            CreateReportRequest {
                user_id: Some(agent.id),
            },
            agent.id,
            now,
        )
        .await
        .unwrap();

    assert_eq!(report.total_task, 2);
    assert_eq!(report.status, 50);
    assert_eq!(report.last_completed_task, Some(now));
}

#[tokio::test]
async fn test_second_report_for_user_rejected() {
    let db = create_test_db().await;
    let agent = create_test_user(&db, "Agent", "9000000001").await;
    let service = ReportService::new(db.clone());

    let request = || CreateReportRequest {
        user_id: Some(agent.id),
    };
    service.create(request(), agent.id, test_instant()).await.unwrap();
    let err = service
        .create(request(), agent.id, test_instant())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(ref m) if m == "Report already exists for this user"));
}

#[tokio::test]
async fn test_list_refreshes_every_row() {
    let db = create_test_db().await;
    let now = test_instant();
    let agent = create_test_user(&db, "Agent", "9000000001").await;
    let service = ReportService::new(db.clone());

    let report = service
        .create(
            CreateReportRequest {
                user_id: Some(agent.id),
            },
            agent.id,
            now,
        )
        .await
        .unwrap();
    assert_eq!(report.total_task, 0);

    seed_task(&db, agent.id, "Automobile", "Completed", now).await;

    let (reports, pagination) = service
        .list_for_user(agent.id, &ReportListQuery::default(), now)
        .await
        .unwrap();
    assert_eq!(pagination.total_docs, 1);
    assert_eq!(reports[0].total_task, 1);
    assert_eq!(reports[0].status, 100);
}

// ============================================================================
// Read-triggers-write through the API
// ============================================================================

#[tokio::test]
async fn test_get_report_overwrites_stale_snapshot() {
    let db = create_test_db().await;
    let now = test_instant();
    let agent = create_test_user(&db, "Agent", "9000000001").await;

    let service = ReportService::new(db.clone());
    let report = service
        .create(
            CreateReportRequest {
                user_id: Some(agent.id),
            },
            agent.id,
            now,
        )
        .await
        .unwrap();

    // Tasks arrive after the snapshot was taken
    let completed_at = now + Duration::hours(2);
    seed_task(&db, agent.id, "Real Estate", "Completed", completed_at).await;
    seed_task(&db, agent.id, "Real Estate", "Pending", now).await;
    seed_task(&db, agent.id, "Automobile", "In Progress", now).await;

    // Make the stored row visibly stale
    let mut stale: propdesk::models::report::ActiveModel = report.clone().into();
    stale.total_task = Set(99);
    stale.update(&db).await.unwrap();

    let app = create_router(build_test_app_state(db.clone(), now));
    let request = Request::builder()
        .uri(format!("/report/{}", report.id))
        .method("GET")
        .header(header::AUTHORIZATION, bearer_token(agent.id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Report retrieved and updated successfully");
    assert_eq!(body["data"]["Total_Task"], 3);
    assert_eq!(body["data"]["status"], 33);

    let breakdown = body["data"]["TaskBreakdown"].as_array().unwrap();
    assert_eq!(breakdown.len(), 2);
    assert_eq!(breakdown[0]["task_type"], "Real Estate");
    assert_eq!(breakdown[0]["total_tasks"], 2);
    assert_eq!(breakdown[0]["completed_tasks"], 1);
    assert_eq!(breakdown[0]["percentage"], 50);
    assert_eq!(breakdown[1]["task_type"], "Automobile");
    assert_eq!(breakdown[1]["percentage"], 0);

    // The stored document now matches what was returned
    let stored = Report::find_by_id(report.id).one(&db).await.unwrap().unwrap();
    assert_eq!(stored.total_task, 3);
    assert_eq!(stored.status, 33);
    assert_eq!(stored.last_completed_task, Some(completed_at));
    assert_eq!(stored.task_breakdown, body["data"]["TaskBreakdown"]);
}

#[tokio::test]
async fn test_get_missing_report_is_not_found() {
    let db = create_test_db().await;
    let agent = create_test_user(&db, "Agent", "9000000001").await;
    let app = create_router(build_test_app_state(db, test_instant()));

    let request = Request::builder()
        .uri("/report/404")
        .method("GET")
        .header(header::AUTHORIZATION, bearer_token(agent.id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
