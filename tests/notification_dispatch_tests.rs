//! Notification dispatch tests
//!
//! Covers:
//! - Task assignment notifications respect the assignee's three flags
//! - Task create and reassignment trigger dispatch without failing the write
//! - Explicit task reminders and their opt-out failure
//! - Industry and explicit-user broadcasts with skipped recipients
//! - Inbox reads and mark-viewed ownership

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

mod common;
use common::{
    create_test_db, create_test_user, create_test_user_with_flags, set_industry, test_instant,
};

use propdesk::error::AppError;
use propdesk::models::prelude::*;
use propdesk::schemas::notification::{
    CreateNotificationRequest, MarkViewedRequest, NotificationMapListQuery, SendByIndustryRequest,
    SendToUsersRequest,
};
use propdesk::schemas::task::{CreateTaskRequest, UpdateTaskRequest};
use propdesk::services::notification::NotificationService;
use propdesk::services::task::{create_task, send_task_reminder, update_task};

async fn row_counts(db: &sea_orm::DatabaseConnection) -> (u64, u64) {
    (
        Notification::find().count(db).await.unwrap(),
        NotificationMapUser::find().count(db).await.unwrap(),
    )
}

fn task_request(assignee_id: i64, reminder: bool) -> CreateTaskRequest {
    CreateTaskRequest {
        title_description: Some("Inspect the flat".to_string()),
        task_name: Some("Flat inspection".to_string()),
        task_address: Some("4 Park Lane".to_string()),
        task_type: Some("Real Estate".to_string()),
        assign_to_id: Some(assignee_id),
        task_reminder: Some(reminder),
        ..Default::default()
    }
}

// ============================================================================
// Eligibility gate
// ============================================================================

#[tokio::test]
async fn test_disabled_notifications_skip_dispatch() {
    let db = create_test_db().await;
    let service = NotificationService::new(db.clone());
    let creator = create_test_user(&db, "Creator", "9000000000").await;
    let assignee = create_test_user_with_flags(&db, "Assignee", "9000000001", false, true).await;

    let sent = service
        .send_task_assignment_notification(
            assignee.id,
            "Flat inspection",
            "New Task Assigned",
            creator.id,
            test_instant(),
        )
        .await
        .unwrap();

    assert!(!sent);
    assert_eq!(row_counts(&db).await, (0, 0));
}

#[tokio::test]
async fn test_disabled_task_reminder_skips_dispatch() {
    let db = create_test_db().await;
    let service = NotificationService::new(db.clone());
    let creator = create_test_user(&db, "Creator", "9000000000").await;
    let assignee = create_test_user_with_flags(&db, "Assignee", "9000000001", true, false).await;

    let sent = service
        .send_task_assignment_notification(assignee.id, "Flat", "New Task Assigned", creator.id, test_instant())
        .await
        .unwrap();

    assert!(!sent);
    assert_eq!(row_counts(&db).await, (0, 0));
}

#[tokio::test]
async fn test_eligible_assignee_gets_one_notification() {
    let db = create_test_db().await;
    let service = NotificationService::new(db.clone());
    let creator = create_test_user(&db, "Creator", "9000000000").await;
    let assignee = create_test_user(&db, "Assignee", "9000000001").await;

    let sent = service
        .send_task_assignment_notification(
            assignee.id,
            "Flat inspection",
            "New Task Assigned",
            creator.id,
            test_instant(),
        )
        .await
        .unwrap();

    assert!(sent);
    assert_eq!(row_counts(&db).await, (1, 1));

    let notification = Notification::find().one(&db).await.unwrap().unwrap();
    assert_eq!(notification.title, "New Task Assigned");
    assert_eq!(
        notification.message,
        "You have been assigned a new task: Flat inspection"
    );

    let delivery = NotificationMapUser::find().one(&db).await.unwrap().unwrap();
    assert_eq!(delivery.user_id, assignee.id);
    assert_eq!(delivery.notification_id, notification.id);
    assert!(!delivery.notification_view);
}

#[tokio::test]
async fn test_missing_assignee_is_a_no_op() {
    let db = create_test_db().await;
    let service = NotificationService::new(db.clone());

    let sent = service
        .send_task_assignment_notification(404, "Flat", "New Task Assigned", 1, test_instant())
        .await
        .unwrap();

    assert!(!sent);
    assert_eq!(row_counts(&db).await, (0, 0));
}

// ============================================================================
// Task side effects
// ============================================================================

#[tokio::test]
async fn test_task_create_notifies_assignee() {
    let db = create_test_db().await;
    let service = NotificationService::new(db.clone());
    let creator = create_test_user(&db, "Creator", "9000000000").await;
    let assignee = create_test_user(&db, "Assignee", "9000000001").await;

    let task = create_task(&db, &service, task_request(assignee.id, true), creator.id, test_instant())
        .await
        .unwrap();

    assert_eq!(task.task_status, "Pending");
    assert_eq!(row_counts(&db).await, (1, 1));
}

#[tokio::test]
async fn test_task_create_succeeds_when_assignee_opted_out() {
    let db = create_test_db().await;
    let service = NotificationService::new(db.clone());
    let creator = create_test_user(&db, "Creator", "9000000000").await;
    let assignee = create_test_user_with_flags(&db, "Assignee", "9000000001", false, false).await;

    let task = create_task(&db, &service, task_request(assignee.id, true), creator.id, test_instant())
        .await
        .unwrap();

    assert_eq!(task.assign_to_id, Some(assignee.id));
    assert_eq!(row_counts(&db).await, (0, 0));
}

#[tokio::test]
async fn test_reassignment_notifies_new_assignee_only_with_reminder() {
    let db = create_test_db().await;
    let service = NotificationService::new(db.clone());
    let creator = create_test_user(&db, "Creator", "9000000000").await;
    let first = create_test_user_with_flags(&db, "First", "9000000001", false, true).await;
    let second = create_test_user(&db, "Second", "9000000002").await;
    let third = create_test_user(&db, "Third", "9000000003").await;

    let task = create_task(&db, &service, task_request(first.id, false), creator.id, test_instant())
        .await
        .unwrap();
    assert_eq!(row_counts(&db).await, (0, 0));

    // Reassigned without the reminder flag: no notification
    update_task(
        &db,
        &service,
        UpdateTaskRequest {
            task_id: Some(task.id),
            assign_to_id: Some(second.id),
            ..Default::default()
        },
        creator.id,
        test_instant(),
    )
    .await
    .unwrap();
    assert_eq!(row_counts(&db).await, (0, 0));

    update_task(
        &db,
        &service,
        UpdateTaskRequest {
            task_id: Some(task.id),
            assign_to_id: Some(third.id),
            task_reminder: Some(true),
            ..Default::default()
        },
        creator.id,
        test_instant(),
    )
    .await
    .unwrap();
    assert_eq!(row_counts(&db).await, (1, 1));

    let delivery = NotificationMapUser::find().one(&db).await.unwrap().unwrap();
    assert_eq!(delivery.user_id, third.id);
}

#[tokio::test]
async fn test_blank_update_fields_keep_existing_values() {
    let db = create_test_db().await;
    let service = NotificationService::new(db.clone());
    let creator = create_test_user(&db, "Creator", "9000000000").await;
    let assignee = create_test_user(&db, "Assignee", "9000000001").await;

    let task = create_task(&db, &service, task_request(assignee.id, true), creator.id, test_instant())
        .await
        .unwrap();

    let updated = update_task(
        &db,
        &service,
        UpdateTaskRequest {
            task_id: Some(task.id),
            title_description: Some("".to_string()),
            task_name: Some("   ".to_string()),
            task_address: Some("".to_string()),
            assign_to_id: Some(0),
            task_reminder: Some(true),
            ..Default::default()
        },
        creator.id,
        test_instant(),
    )
    .await
    .unwrap();

    assert_eq!(updated.title_description, "Inspect the flat");
    assert_eq!(updated.task_name, "Flat inspection");
    assert_eq!(updated.task_address, "4 Park Lane");
    assert_eq!(updated.assign_to_id, Some(assignee.id));
    // Only the creation notice; a zero id is not a reassignment
    assert_eq!(row_counts(&db).await, (1, 1));
}

// ============================================================================
// Explicit reminders
// ============================================================================

#[tokio::test]
async fn test_task_reminder_sends_one_notification() {
    let db = create_test_db().await;
    let service = NotificationService::new(db.clone());
    let creator = create_test_user(&db, "Creator", "9000000000").await;
    let assignee = create_test_user(&db, "Assignee", "9000000001").await;

    let task = create_task(&db, &service, task_request(assignee.id, true), creator.id, test_instant())
        .await
        .unwrap();
    assert_eq!(row_counts(&db).await, (1, 1));

    send_task_reminder(&db, &service, task.id, creator.id, test_instant())
        .await
        .unwrap();
    assert_eq!(row_counts(&db).await, (2, 2));

    let reminders = Notification::find()
        .filter(propdesk::models::notification::Column::Title.eq("Task Reminder"))
        .all(&db)
        .await
        .unwrap();
    assert_eq!(reminders.len(), 1);
    assert_eq!(
        reminders[0].message,
        "You have been assigned a new task: Flat inspection"
    );

    let delivery = NotificationMapUser::find()
        .filter(propdesk::models::notification_map_user::Column::NotificationId.eq(reminders[0].id))
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(delivery.user_id, assignee.id);
}

#[tokio::test]
async fn test_task_reminder_fails_for_opted_out_assignee() {
    let db = create_test_db().await;
    let service = NotificationService::new(db.clone());
    let creator = create_test_user(&db, "Creator", "9000000000").await;
    let assignee = create_test_user_with_flags(&db, "Assignee", "9000000001", true, false).await;

    let task = create_task(&db, &service, task_request(assignee.id, true), creator.id, test_instant())
        .await
        .unwrap();

    let err = send_task_reminder(&db, &service, task.id, creator.id, test_instant())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::BadRequest(ref m)
            if m == "Failed to send task reminder. User may not have notifications enabled."
    ));
    assert_eq!(row_counts(&db).await, (0, 0));
}

#[tokio::test]
async fn test_task_reminder_for_missing_task() {
    let db = create_test_db().await;
    let service = NotificationService::new(db.clone());

    let err = send_task_reminder(&db, &service, 404, 1, test_instant())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

// ============================================================================
// Broadcasts
// ============================================================================

async fn seed_template(service: &NotificationService, actor_id: i64) -> i64 {
    service
        .create(
            CreateNotificationRequest {
                title: Some("Price drop".to_string()),
                message: Some("Listings in your area dropped 5%".to_string()),
                ..Default::default()
            },
            actor_id,
            test_instant(),
        )
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn test_send_by_industry_skips_disabled_users() {
    let db = create_test_db().await;
    let service = NotificationService::new(db.clone());
    let admin = create_test_user(&db, "Admin", "9000000000").await;
    let admin = set_industry(&db, admin, "Automobile").await;
    let reader = create_test_user(&db, "Reader", "9000000001").await;
    let muted = create_test_user_with_flags(&db, "Muted", "9000000002", false, true).await;

    let template_id = seed_template(&service, admin.id).await;

    let result = service
        .send_by_industry(
            SendByIndustryRequest {
                notification_id: Some(template_id),
                industry_type: Some("Real Estate".to_string()),
            },
            admin.id,
            test_instant(),
        )
        .await
        .unwrap();

    assert_eq!(result.users_count, 1);
    assert_eq!(result.skipped_users_count, 1);
    assert_eq!(result.users_with_notifications[0].user_id, reader.id);
    assert_eq!(result.skipped_users[0].user_id, muted.id);
    assert_eq!(result.skipped_users[0].reason, "Notifications disabled");
    assert_eq!(result.notification.title, "Price drop");
    assert_eq!(
        result.summary(),
        "Notification sent successfully to 1 users with industry type: Real Estate (1 users skipped due to disabled notifications)"
    );

    let deliveries = NotificationMapUser::find()
        .filter(propdesk::models::notification_map_user::Column::NotificationId.eq(result.notification.id))
        .all(&db)
        .await
        .unwrap();
    assert_eq!(deliveries.len(), 1);
    assert_eq!(deliveries[0].user_id, reader.id);
}

#[tokio::test]
async fn test_send_by_industry_with_no_eligible_users() {
    let db = create_test_db().await;
    let service = NotificationService::new(db.clone());
    let admin = create_test_user(&db, "Admin", "9000000000").await;
    let template_id = seed_template(&service, admin.id).await;

    let err = service
        .send_by_industry(
            SendByIndustryRequest {
                notification_id: Some(template_id),
                industry_type: Some("Automobile".to_string()),
            },
            admin.id,
            test_instant(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(NotificationMapUser::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_send_by_industry_rejects_unknown_industry() {
    let db = create_test_db().await;
    let service = NotificationService::new(db.clone());
    let admin = create_test_user(&db, "Admin", "9000000000").await;
    let template_id = seed_template(&service, admin.id).await;

    let err = service
        .send_by_industry(
            SendByIndustryRequest {
                notification_id: Some(template_id),
                industry_type: Some("Aviation".to_string()),
            },
            admin.id,
            test_instant(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn test_send_to_users_requires_ids() {
    let db = create_test_db().await;
    let service = NotificationService::new(db.clone());
    let admin = create_test_user(&db, "Admin", "9000000000").await;
    let template_id = seed_template(&service, admin.id).await;

    let err = service
        .send_to_users(
            SendToUsersRequest {
                notification_id: Some(template_id),
                user_ids: Some(vec![]),
            },
            admin.id,
            test_instant(),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::BadRequest(ref m) if m == "User IDs array is required and must not be empty"
    ));
}

// ============================================================================
// Inbox
// ============================================================================

#[tokio::test]
async fn test_inbox_and_mark_viewed() {
    let db = create_test_db().await;
    let service = NotificationService::new(db.clone());
    let admin = create_test_user(&db, "Admin", "9000000000").await;
    let reader = create_test_user(&db, "Reader", "9000000001").await;
    let template_id = seed_template(&service, admin.id).await;

    service
        .send_to_users(
            SendToUsersRequest {
                notification_id: Some(template_id),
                user_ids: Some(vec![reader.id]),
            },
            admin.id,
            test_instant(),
        )
        .await
        .unwrap();

    let (entries, pagination) = service
        .inbox(reader.id, &NotificationMapListQuery::default())
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(pagination.total_docs, 1);
    assert!(!entries[0].notification_view);
    let map_id = entries[0].notification_map_id;
    assert_eq!(
        entries[0].notification.as_ref().map(|n| n.title.as_str()),
        Some("Price drop")
    );

    // Another user cannot mark it
    let err = service
        .mark_viewed(
            admin.id,
            MarkViewedRequest {
                notification_map_id: Some(map_id),
            },
            test_instant(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let viewed = service
        .mark_viewed(
            reader.id,
            MarkViewedRequest {
                notification_map_id: Some(map_id),
            },
            test_instant(),
        )
        .await
        .unwrap();
    assert!(viewed.notification_view);
}
