//! HTTP API integration tests
//!
//! Covers:
//! - Health check and auth enforcement messages on protected routes
//! - Register and login round trip through `/auth/*`
//! - Payment endpoints: envelope shape, completion cascade, validation errors
//! - Undecodable request bodies answered with the error envelope
//! - Membership map and active membership reads
//! - Sub-user capacity surfaced as 400
//! - Task dashboard counters

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use tower::util::ServiceExt;

mod common;
use common::{
    bearer_token, build_test_app_state, create_test_db, create_test_user, seed_membership,
    seed_package, seed_payment_type, seed_task, test_instant, TEST_PASSWORD,
};

use propdesk::endpoints::create_router;
use propdesk::services::security::create_token_with_secret;

// ============================================================================
// Helpers
// ============================================================================

async fn test_app() -> (Router, sea_orm::DatabaseConnection) {
    let db = create_test_db().await;
    let app = create_router(build_test_app_state(db.clone(), test_instant()));
    (app, db)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().uri(uri).method(method);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

// ============================================================================
// Health and auth enforcement
// ============================================================================

#[tokio::test]
async fn test_health_is_public() {
    let (app, _db) = test_app().await;
    let (status, body) = send(&app, "GET", "/api/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_missing_token_is_rejected() {
    let (app, _db) = test_app().await;
    let (status, body) = send(&app, "GET", "/payment", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Access denied. No token provided.");
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let (app, _db) = test_app().await;
    let (status, body) = send(&app, "GET", "/task", Some("Bearer not-a-jwt"), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token.");
}

#[tokio::test]
async fn test_token_for_unknown_user_is_rejected() {
    let (app, _db) = test_app().await;
    let token = bearer_token(404);
    let (status, body) = send(&app, "GET", "/users/me", Some(&token), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token. User not found.");
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let (app, db) = test_app().await;
    let user = create_test_user(&db, "Agent", "9000000001").await;
    let secret = propdesk::config::CONFIG.auth.jwt_secret.clone();
    let expired = create_token_with_secret(user.id, &secret, -1).unwrap();

    let (status, body) = send(
        &app,
        "GET",
        "/users/me",
        Some(&format!("Bearer {}", expired)),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token has expired. Please login again.");
}

// ============================================================================
// Register / login
// ============================================================================

#[tokio::test]
async fn test_register_then_login() {
    let (app, _db) = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(serde_json::json!({
            "name": "Asha",
            "email": "Asha@Example.com",
            "mobile": "9876543210",
            "password": "hunter22",
            "user_industryType": "Automobile",
            "acceptpolicy": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["email"], "asha@example.com");
    assert_eq!(body["data"]["user_industryType"], "Automobile");
    assert!(body["data"].get("hashed_password").is_none());

    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(serde_json::json!({ "mobile": "9876543210", "password": "hunter22" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    let token = format!("Bearer {}", body["data"]["token"].as_str().unwrap());

    let (status, body) = send(&app, "GET", "/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Asha");
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let (app, db) = test_app().await;
    create_test_user(&db, "Agent", "9000000001").await;

    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(serde_json::json!({ "mobile": "9000000001", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(serde_json::json!({ "mobile": "9000000001", "password": TEST_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_register_duplicate_mobile() {
    let (app, db) = test_app().await;
    create_test_user(&db, "Agent", "9000000001").await;

    let (status, body) = send(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(serde_json::json!({
            "name": "Copy",
            "email": "copy@example.com",
            "mobile": "9000000001",
            "password": "hunter22"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User with this mobile already exists");
}

// ============================================================================
// Payments
// ============================================================================

#[tokio::test]
async fn test_completed_payment_activates_membership_over_http() {
    let (app, db) = test_app().await;
    let buyer = create_test_user(&db, "Buyer", "9000000001").await;
    let kind = seed_payment_type(&db, "UPI").await;
    let package = seed_package(&db, "Gold", Some(30), 2).await;
    let token = bearer_token(buyer.id);

    let (status, body) = send(
        &app,
        "POST",
        "/payment",
        Some(&token),
        Some(serde_json::json!({
            "payment_type_id": kind.id,
            "payment_by_user_id": buyer.id,
            "payment_get_by_user_id": buyer.id,
            "amount": 499.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Payment created successfully");
    assert_eq!(body["data"]["payment_status"], "pending");
    let payment_id = body["data"]["payment_id"].as_i64().unwrap();

    seed_membership(&db, package.id, buyer.id, Some(payment_id)).await;

    // Nothing is active before completion
    let (_, body) = send(
        &app,
        "GET",
        "/membership-map-user/active_membership",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body["count"], 0);

    let (status, body) = send(
        &app,
        "PUT",
        "/payment",
        Some(&token),
        Some(serde_json::json!({
            "payment_id": payment_id,
            "payment_status": "completed",
            "transaction_no": "TXN-9"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["memberships_updated"], 1);

    let (status, body) = send(
        &app,
        "GET",
        "/membership-map-user/active_membership",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Found 1 active memberships");
    assert_eq!(body["data"][0]["membership_status"], "active");
    assert_eq!(body["data"][0]["transaction_no"], "TXN-9");
    assert_eq!(body["data"][0]["package"]["package_name"], "Gold");
}

#[tokio::test]
async fn test_payment_missing_amount() {
    let (app, db) = test_app().await;
    let buyer = create_test_user(&db, "Buyer", "9000000001").await;
    let kind = seed_payment_type(&db, "UPI").await;

    let (status, body) = send(
        &app,
        "POST",
        "/payment",
        Some(&bearer_token(buyer.id)),
        Some(serde_json::json!({
            "payment_type_id": kind.id,
            "payment_by_user_id": buyer.id,
            "payment_get_by_user_id": buyer.id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "amount is required");
}

#[tokio::test]
async fn test_mistyped_body_field_uses_error_envelope() {
    let (app, db) = test_app().await;
    let buyer = create_test_user(&db, "Buyer", "9000000001").await;
    let kind = seed_payment_type(&db, "UPI").await;

    let (status, body) = send(
        &app,
        "POST",
        "/payment",
        Some(&bearer_token(buyer.id)),
        Some(serde_json::json!({
            "payment_type_id": kind.id,
            "payment_by_user_id": buyer.id,
            "payment_get_by_user_id": buyer.id,
            "amount": "abc"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("amount"));
}

#[tokio::test]
async fn test_malformed_json_uses_error_envelope() {
    let (app, db) = test_app().await;
    let buyer = create_test_user(&db, "Buyer", "9000000001").await;

    let request = Request::builder()
        .uri("/task")
        .method("POST")
        .header(header::AUTHORIZATION, bearer_token(buyer.id))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"Task_name\": "))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_payment_list_is_paginated() {
    let (app, db) = test_app().await;
    let buyer = create_test_user(&db, "Buyer", "9000000001").await;
    let kind = seed_payment_type(&db, "UPI").await;
    let token = bearer_token(buyer.id);

    for amount in [100.0, 200.0, 300.0] {
        let (status, _) = send(
            &app,
            "POST",
            "/payment",
            Some(&token),
            Some(serde_json::json!({
                "payment_type_id": kind.id,
                "payment_by_user_id": buyer.id,
                "payment_get_by_user_id": buyer.id,
                "amount": amount
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(
        &app,
        "GET",
        "/payment?page=1&limit=2&sort_by=amount&sort_order=asc",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"][0]["amount"], 100.0);
    assert_eq!(body["pagination"]["totalDocs"], 3);
    assert_eq!(body["count"], 3);
}

// ============================================================================
// Membership map and sub-users
// ============================================================================

#[tokio::test]
async fn test_membership_map_create_starts_inactive() {
    let (app, db) = test_app().await;
    let buyer = create_test_user(&db, "Buyer", "9000000001").await;
    let package = seed_package(&db, "Gold", Some(30), 2).await;

    let (status, body) = send(
        &app,
        "POST",
        "/membership-map-user",
        Some(&bearer_token(buyer.id)),
        Some(serde_json::json!({ "package_id": package.id, "user_id": buyer.id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["membership_status"], "inactive");
    assert_eq!(body["data"]["payment_status"], "pending");
    assert!(body["data"]["membership_expiry_date"].is_null());
}

#[tokio::test]
async fn test_membership_map_requires_package() {
    let (app, db) = test_app().await;
    let buyer = create_test_user(&db, "Buyer", "9000000001").await;

    let (status, body) = send(
        &app,
        "POST",
        "/membership-map-user",
        Some(&bearer_token(buyer.id)),
        Some(serde_json::json!({ "user_id": buyer.id })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Package ID is required");
}

#[tokio::test]
async fn test_sub_user_over_capacity_is_bad_request() {
    let (app, db) = test_app().await;
    let owner = create_test_user(&db, "Owner", "9000000000").await;
    let first = create_test_user(&db, "First", "9000000001").await;
    let second = create_test_user(&db, "Second", "9000000002").await;
    let package = seed_package(&db, "Single", Some(30), 1).await;
    let token = bearer_token(owner.id);

    let (status, _) = send(
        &app,
        "POST",
        "/membership-package-map-sub-user",
        Some(&token),
        Some(serde_json::json!({ "user_id": first.id, "membership_package_id": package.id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        "POST",
        "/membership-package-map-sub-user",
        Some(&token),
        Some(serde_json::json!({ "user_id": second.id, "membership_package_id": package.id })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Cannot add more sub-users. Package limit (1) has been reached."
    );

    let (status, body) = send(
        &app,
        "GET",
        &format!("/membership-package/{}", package.id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["sub_user_limit"], 1);
    assert_eq!(body["data"]["active_sub_user_count"], 1);
    assert_eq!(body["data"]["remaining_capacity"], 0);

    let (_, body) = send(
        &app,
        "GET",
        &format!("/membership-package-map-sub-user/package/{}", package.id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

// ============================================================================
// Tasks
// ============================================================================

#[tokio::test]
async fn test_task_dashboard_counts() {
    let (app, db) = test_app().await;
    let agent = create_test_user(&db, "Agent", "9000000001").await;
    seed_task(&db, agent.id, "Real Estate", "Completed", test_instant()).await;
    seed_task(&db, agent.id, "Real Estate", "Pending", test_instant()).await;

    let (status, body) = send(
        &app,
        "GET",
        "/task/dashboard",
        Some(&bearer_token(agent.id)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Task dashboard data retrieved successfully");
    assert_eq!(body["data"]["totalMemberCount"], 1);
    assert_eq!(body["data"]["taskAssignedCount"], 2);
    assert_eq!(body["data"]["taskCompletedCount"], 1);
    assert_eq!(body["data"]["taskPendingCount"], 1);
}

#[tokio::test]
async fn test_create_task_rejects_unknown_type() {
    let (app, db) = test_app().await;
    let agent = create_test_user(&db, "Agent", "9000000001").await;

    let (status, body) = send(
        &app,
        "POST",
        "/task",
        Some(&bearer_token(agent.id)),
        Some(serde_json::json!({
            "Title_Description": "Visit",
            "Task_name": "Visit",
            "Task_address": "1 Main St",
            "Task_type": "Boat",
            "Assign_to_id": agent.id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}
