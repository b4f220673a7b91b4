/// Integration tests for the HiveDesk API
///
/// These tests drive the real router end-to-end: access policy enforcement,
/// assignment lifecycle, document verification, training progress, the
/// pagination contract, and cascading deletes.
///
/// They need a running PostgreSQL (`DATABASE_URL`) and are `#[ignore]`d so
/// `cargo test` stays green without one. Run them with:
///
/// ```bash
/// DATABASE_URL=postgresql://localhost/hivedesk_test cargo test -p hivedesk-api -- --ignored
/// ```

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{create_test_module, create_test_task, TestContext};
use hivedesk_shared::models::assignment::{AssignmentStatus, CreateAssignment, TaskAssignment};
use hivedesk_shared::models::document::{CreateDocument, Document, DocumentType};
use hivedesk_shared::models::training_progress::TrainingProgress;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    auth: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if !auth.is_empty() {
        builder = builder.header("authorization", auth);
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_path_identity_binding() {
    let ctx = TestContext::new().await.unwrap();

    // Matching identity succeeds
    let uri = format!("/{}/employee/dashboard", ctx.employee.name);
    let (status, body) = send(&ctx.app, "GET", &uri, &ctx.employee_auth(), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "employee");

    // Role segment is matched case-insensitively
    let uri = format!("/{}/EMPLOYEE/dashboard", ctx.employee.name);
    let (status, _) = send(&ctx.app, "GET", &uri, &ctx.employee_auth(), None).await;
    assert_eq!(status, StatusCode::OK);

    // Someone else's name in the path is denied
    let uri = format!("/{}/employee/dashboard", ctx.hr.name);
    let (status, _) = send(&ctx.app, "GET", &uri, &ctx.employee_auth(), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Claiming the wrong role is denied
    let uri = format!("/{}/hr/dashboard", ctx.employee.name);
    let (status, _) = send(&ctx.app, "GET", &uri, &ctx.employee_auth(), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_hr_gate_on_employee_listing() {
    let ctx = TestContext::new().await.unwrap();

    // An employee with a perfectly matching identity still lacks the HR gate
    let uri = format!("/{}/employee/employees", ctx.employee.name);
    let (status, _) = send(&ctx.app, "GET", &uri, &ctx.employee_auth(), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let uri = format!("/{}/hr/employees", ctx.hr.name);
    let (status, _) = send(&ctx.app, "GET", &uri, &ctx.hr_auth(), None).await;
    assert_eq!(status, StatusCode::OK);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_duplicate_assignment_is_conflict() {
    let ctx = TestContext::new().await.unwrap();
    let task = create_test_task(&ctx, "Sign NDA").await.unwrap();

    let uri = format!("/{}/hr/assign-task", ctx.hr.name);
    let body = json!({ "task_id": task.id, "employee_id": ctx.employee.id });

    let (status, _) = send(&ctx.app, "POST", &uri, &ctx.hr_auth(), Some(body.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let count = TaskAssignment::count_by_employee(&ctx.db, ctx.employee.id)
        .await
        .unwrap();
    assert_eq!(count, 1);

    // Second identical assignment is rejected, count unchanged
    let (status, _) = send(&ctx.app, "POST", &uri, &ctx.hr_auth(), Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let count = TaskAssignment::count_by_employee(&ctx.db, ctx.employee.id)
        .await
        .unwrap();
    assert_eq!(count, 1);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_assigning_unknown_references_is_not_found() {
    let ctx = TestContext::new().await.unwrap();
    let task = create_test_task(&ctx, "Order badge").await.unwrap();
    let uri = format!("/{}/hr/assign-task", ctx.hr.name);

    // Unknown task
    let body = json!({ "task_id": uuid::Uuid::new_v4(), "employee_id": ctx.employee.id });
    let (status, _) = send(&ctx.app, "POST", &uri, &ctx.hr_auth(), Some(body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // An HR id where an employee id belongs is "employee not found"
    let body = json!({ "task_id": task.id, "employee_id": ctx.hr.id });
    let (status, _) = send(&ctx.app, "POST", &uri, &ctx.hr_auth(), Some(body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_complete_own_assignment() {
    let ctx = TestContext::new().await.unwrap();
    let task = create_test_task(&ctx, "Read handbook").await.unwrap();

    let assignment = TaskAssignment::assign(
        &ctx.db,
        CreateAssignment {
            task_id: task.id,
            employee_id: ctx.employee.id,
            assigned_by: ctx.hr.id,
        },
    )
    .await
    .unwrap();
    assert_eq!(assignment.status, AssignmentStatus::Pending);
    assert!(assignment.completed_at.is_none());

    let uri = format!("/{}/employee/tasks/complete", ctx.employee.name);
    let body = json!({ "assignment_id": assignment.id });
    let (status, _) = send(&ctx.app, "POST", &uri, &ctx.employee_auth(), Some(body.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let completed = TaskAssignment::find_by_id(&ctx.db, assignment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(completed.status, AssignmentStatus::Completed);
    assert!(completed.completed_at.is_some());

    // Re-completion is allowed and simply re-stamps completed_at
    let (status, _) = send(&ctx.app, "POST", &uri, &ctx.employee_auth(), Some(body)).await;
    assert_eq!(status, StatusCode::OK);

    let again = TaskAssignment::find_by_id(&ctx.db, assignment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(again.status, AssignmentStatus::Completed);
    assert!(again.completed_at.unwrap() >= completed.completed_at.unwrap());

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_completing_foreign_assignment_is_not_found() {
    let ctx = TestContext::new().await.unwrap();
    let other = ctx.create_employee("other").await.unwrap();
    let task = create_test_task(&ctx, "Set up laptop").await.unwrap();

    let assignment = TaskAssignment::assign(
        &ctx.db,
        CreateAssignment {
            task_id: task.id,
            employee_id: other.id,
            assigned_by: ctx.hr.id,
        },
    )
    .await
    .unwrap();

    // The context employee does not own this assignment
    let uri = format!("/{}/employee/tasks/complete", ctx.employee.name);
    let body = json!({ "assignment_id": assignment.id });
    let (status, _) = send(&ctx.app, "POST", &uri, &ctx.employee_auth(), Some(body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Still pending
    let unchanged = TaskAssignment::find_by_id(&ctx.db, assignment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.status, AssignmentStatus::Pending);

    hivedesk_shared::models::user::User::delete(&ctx.db, other.id)
        .await
        .unwrap();
    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_training_progress_completion_and_regression() {
    let ctx = TestContext::new().await.unwrap();
    let module = create_test_module(&ctx, "Security basics").await.unwrap();

    let uri = format!("/{}/employee/training/progress", ctx.employee.name);

    // Fresh record at 100%: completed, with both timestamps
    let body = json!({ "module_id": module.id, "progress_percentage": 100 });
    let (status, progress) = send(&ctx.app, "POST", &uri, &ctx.employee_auth(), Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(progress["status"], "completed");
    assert!(!progress["started_at"].is_null());
    assert!(!progress["completed_at"].is_null());
    let first_completed_at = progress["completed_at"].clone();

    // Regressing to 40% flips status back to pending but keeps completed_at
    let body = json!({ "module_id": module.id, "progress_percentage": 40 });
    let (status, progress) = send(&ctx.app, "POST", &uri, &ctx.employee_auth(), Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(progress["status"], "pending");
    assert_eq!(progress["progress_percentage"], 40);
    assert_eq!(progress["completed_at"], first_completed_at);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_training_progress_range_is_validated() {
    let ctx = TestContext::new().await.unwrap();
    let module = create_test_module(&ctx, "Compliance").await.unwrap();

    let uri = format!("/{}/employee/training/progress", ctx.employee.name);

    for bad in [-1, 101, 150] {
        let body = json!({ "module_id": module.id, "progress_percentage": bad });
        let (status, _) = send(&ctx.app, "POST", &uri, &ctx.employee_auth(), Some(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "percentage {}", bad);
    }

    assert!(TrainingProgress::find(&ctx.db, ctx.employee.id, module.id)
        .await
        .unwrap()
        .is_none());

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_document_listing_pagination_contract() {
    let ctx = TestContext::new().await.unwrap();

    for i in 0..120 {
        Document::create(
            &ctx.db,
            CreateDocument {
                employee_id: ctx.employee.id,
                document_type: DocumentType::Other,
                original_filename: format!("doc-{}.pdf", i),
                file_path: format!("/tmp/doc-{}.pdf", i),
                file_size: 1,
                mime_type: Some("application/pdf".to_string()),
                task_id: None,
            },
        )
        .await
        .unwrap();
    }

    let base = format!("/{}/employee/documents", ctx.employee.name);

    let (status, body) = send(
        &ctx.app,
        "GET",
        &format!("{}?page=1&page_size=50", base),
        &ctx.employee_auth(),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 50);
    assert_eq!(body["total"], 120);

    let (_, body) = send(
        &ctx.app,
        "GET",
        &format!("{}?page=3&page_size=50", base),
        &ctx.employee_auth(),
        None,
    )
    .await;
    assert_eq!(body["items"].as_array().unwrap().len(), 20);
    assert_eq!(body["total"], 120);

    // Past the last page: empty items, total unchanged
    let (_, body) = send(
        &ctx.app,
        "GET",
        &format!("{}?page=4&page_size=50", base),
        &ctx.employee_auth(),
        None,
    )
    .await;
    assert_eq!(body["items"].as_array().unwrap().len(), 0);
    assert_eq!(body["total"], 120);
    assert_eq!(body["page"], 4);
    assert_eq!(body["page_size"], 50);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_unknown_document_type_is_rejected() {
    let ctx = TestContext::new().await.unwrap();

    let boundary = "hivedesk-test-boundary";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"document_type\"\r\n\r\nalien_registration\r\n\
         --{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"x.txt\"\r\nContent-Type: text/plain\r\n\r\nhello\r\n\
         --{b}--\r\n",
        b = boundary
    );

    let uri = format!("/{}/employee/documents/upload", ctx.employee.name);
    let request = Request::builder()
        .method("POST")
        .uri(&uri)
        .header("authorization", ctx.employee_auth())
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap();

    let response = ctx.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_document_verification_is_one_shot() {
    let ctx = TestContext::new().await.unwrap();

    let document = Document::create(
        &ctx.db,
        CreateDocument {
            employee_id: ctx.employee.id,
            document_type: DocumentType::Contract,
            original_filename: "contract.pdf".to_string(),
            file_path: "/tmp/contract.pdf".to_string(),
            file_size: 1,
            mime_type: None,
            task_id: None,
        },
    )
    .await
    .unwrap();

    let uri = format!("/{}/hr/documents/{}/verify", ctx.hr.name, document.id);

    // "pending" is not a decision
    let (status, _) = send(
        &ctx.app,
        "POST",
        &uri,
        &ctx.hr_auth(),
        Some(json!({ "decision": "pending" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = send(
        &ctx.app,
        "POST",
        &uri,
        &ctx.hr_auth(),
        Some(json!({ "decision": "approved" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["verification_status"], "approved");
    assert!(!body["verified_at"].is_null());

    // Re-review is refused; verified_at never changes
    let (status, _) = send(
        &ctx.app,
        "POST",
        &uri,
        &ctx.hr_auth(),
        Some(json!({ "decision": "rejected" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Employees cannot verify at all
    let employee_uri = format!(
        "/{}/employee/documents/{}/verify",
        ctx.employee.name, document.id
    );
    let (status, _) = send(
        &ctx.app,
        "POST",
        &employee_uri,
        &ctx.employee_auth(),
        Some(json!({ "decision": "approved" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_deleting_employee_cascades() {
    let ctx = TestContext::new().await.unwrap();
    let victim = ctx.create_employee("victim").await.unwrap();
    let task = create_test_task(&ctx, "Fill tax forms").await.unwrap();
    let module = create_test_module(&ctx, "Orientation").await.unwrap();

    TaskAssignment::assign(
        &ctx.db,
        CreateAssignment {
            task_id: task.id,
            employee_id: victim.id,
            assigned_by: ctx.hr.id,
        },
    )
    .await
    .unwrap();

    Document::create(
        &ctx.db,
        CreateDocument {
            employee_id: victim.id,
            document_type: DocumentType::TaxForm,
            original_filename: "w2.pdf".to_string(),
            file_path: "/tmp/w2.pdf".to_string(),
            file_size: 1,
            mime_type: None,
            task_id: Some(task.id),
        },
    )
    .await
    .unwrap();

    TrainingProgress::upsert(&ctx.db, victim.id, module.id, 50)
        .await
        .unwrap();

    let uri = format!("/{}/hr/manage/{}", ctx.hr.name, victim.id);
    let (status, _) = send(&ctx.app, "DELETE", &uri, &ctx.hr_auth(), None).await;
    assert_eq!(status, StatusCode::OK);

    // Every owned row is gone
    assert_eq!(
        TaskAssignment::count_by_employee(&ctx.db, victim.id)
            .await
            .unwrap(),
        0
    );
    assert_eq!(
        Document::count_by_employee(&ctx.db, victim.id).await.unwrap(),
        0
    );
    assert_eq!(
        TrainingProgress::count_by_employee(&ctx.db, victim.id)
            .await
            .unwrap(),
        0
    );
    assert!(
        hivedesk_shared::models::user::User::find_by_id(&ctx.db, victim.id)
            .await
            .unwrap()
            .is_none()
    );

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_reports_are_hr_only() {
    let ctx = TestContext::new().await.unwrap();

    let uri = format!("/{}/hr/reports/overview", ctx.hr.name);
    let (status, body) = send(&ctx.app, "GET", &uri, &ctx.hr_auth(), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["total_employees"].is_number());
    assert!(body["task_completion_rate"].is_number());
    assert!(body["training_completion_rate"].is_number());

    // A fresh employee: all counts zero, every rate exactly 0, no average
    let uri = format!(
        "/{}/hr/reports/employee/{}",
        ctx.hr.name, ctx.employee.id
    );
    let (status, body) = send(&ctx.app, "GET", &uri, &ctx.hr_auth(), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_tasks"], 0);
    assert_eq!(body["task_completion_rate"], 0.0);
    assert!(body["avg_task_completion_days"].is_null());

    // Employees cannot reach reports
    let uri = format!("/{}/employee/reports/overview", ctx.employee.name);
    let (status, _) = send(&ctx.app, "GET", &uri, &ctx.employee_auth(), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_login_and_zero_rate_dashboard() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = send(
        &ctx.app,
        "POST",
        "/auth/login",
        "", // no auth needed
        Some(json!({ "email": ctx.employee.email, "password": common::TEST_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");
    let token = body["access_token"].as_str().unwrap().to_string();

    // A fresh employee has no assignments; the rate is exactly 0, not an error
    let uri = format!("/{}/employee/dashboard", ctx.employee.name);
    let (status, body) = send(&ctx.app, "GET", &uri, &format!("Bearer {}", token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_tasks"], 0);
    assert_eq!(body["completion_rate"], 0.0);

    ctx.cleanup().await.unwrap();
}
