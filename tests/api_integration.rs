use anyhow::{Context, Result};
use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot`

use garrison::create_app;

async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    payload: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let request = match payload {
        Some(payload) => builder
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };

    Ok((status, value))
}

async fn register(app: &Router, name: &str, email: &str, role: &str, unit: &str) -> Result<(String, String)> {
    let (status, response) = request(
        app,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "name": name,
            "email": email,
            "password": "password123",
            "role": role,
            "unit": unit,
        })),
    )
    .await?;
    anyhow::ensure!(status == StatusCode::CREATED, "register failed: {response}");

    let token = response["token"].as_str().context("missing token")?.to_string();
    let id = response["user"]["id"].as_str().context("missing user id")?.to_string();
    Ok((token, id))
}

async fn test_app() -> Result<Router> {
    std::env::set_var("JWT_SECRET", "test-secret");
    std::env::set_var("AUTHZ_MODE", "strict");
    Ok(create_app().await?)
}

#[tokio::test]
async fn task_lifecycle_respects_assignment_scope() -> Result<()> {
    let app = test_app().await?;

    let (commander, _) = register(&app, "Петров П.П.", "petrov@example.com", "company_commander", "1-я рота").await?;
    let (soldier, soldier_id) = register(&app, "Иванов И.И.", "ivanov@example.com", "soldier", "1-я рота").await?;
    let (outsider, _) = register(&app, "Сидоров С.С.", "sidorov@example.com", "soldier", "2-я рота").await?;

    // Commander assigns a task to the soldier.
    let (status, task) = request(
        &app,
        "POST",
        "/tasks",
        Some(&commander),
        Some(json!({
            "title": "Проверка техники",
            "assigned_to": soldier_id,
            "due_date": "2025-10-10T10:00:00Z",
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED, "{task}");
    let task_id = task["id"].as_str().context("missing task id")?.to_string();
    assert_eq!(task["status"], "pending");
    assert_eq!(task["unit"], "1-я рота");

    // The assignee sees the task, a soldier from another unit does not.
    let (status, listed) = request(&app, "GET", "/tasks", Some(&soldier), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(|a| a.len()), Some(1));

    let (status, listed) = request(&app, "GET", "/tasks", Some(&outsider), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(|a| a.len()), Some(0));

    // The assignee can update their own task; the outsider is refused.
    let (status, updated) = request(
        &app,
        "PUT",
        &format!("/tasks/{task_id}"),
        Some(&soldier),
        Some(json!({"status": "in_progress"})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "in_progress");

    let (status, _) = request(
        &app,
        "PUT",
        &format!("/tasks/{task_id}"),
        Some(&outsider),
        Some(json!({"status": "completed"})),
    )
    .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = request(&app, "GET", &format!("/tasks/{task_id}"), Some(&outsider), None).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Completion is signed off by the assigner.
    let (status, _) = request(
        &app,
        "POST",
        &format!("/tasks/{task_id}/approve"),
        Some(&soldier),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, approved) = request(
        &app,
        "POST",
        &format!("/tasks/{task_id}/approve"),
        Some(&commander),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved["status"], "completed");

    Ok(())
}

#[tokio::test]
async fn report_decision_flow() -> Result<()> {
    let app = test_app().await?;

    let (commander, commander_id) = register(&app, "Петров П.П.", "petrov@example.com", "company_commander", "1-я рота").await?;
    let (soldier, _) = register(&app, "Иванов И.И.", "ivanov@example.com", "soldier", "1-я рота").await?;
    let (outsider, _) = register(&app, "Сидоров С.С.", "sidorov@example.com", "soldier", "2-я рота").await?;

    let (status, report) = request(
        &app,
        "POST",
        "/reports",
        Some(&soldier),
        Some(json!({
            "title": "Сводка за сутки",
            "body": "Без происшествий",
            "approvers": [commander_id],
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED, "{report}");
    let report_id = report["id"].as_str().context("missing report id")?.to_string();
    assert_eq!(report["status"], "draft");

    // A draft is not decidable yet.
    let (status, _) = request(
        &app,
        "POST",
        &format!("/reports/{report_id}/decision"),
        Some(&commander),
        Some(json!({"decision": "approve"})),
    )
    .await?;
    assert_eq!(status, StatusCode::CONFLICT);

    // Author submits; a verdict cannot be smuggled through the update route.
    let (status, _) = request(
        &app,
        "PUT",
        &format!("/reports/{report_id}"),
        Some(&soldier),
        Some(json!({"status": "approved"})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, submitted) = request(
        &app,
        "PUT",
        &format!("/reports/{report_id}"),
        Some(&soldier),
        Some(json!({"status": "submitted"})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(submitted["status"], "submitted");

    // Visible to the same-unit commander, hidden from the other unit.
    let (status, _) = request(&app, "GET", &format!("/reports/{report_id}"), Some(&commander), None).await?;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = request(&app, "GET", &format!("/reports/{report_id}"), Some(&outsider), None).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The approver queue lists it; a soldier cannot decide.
    let (status, pending) = request(&app, "GET", "/reports?pending=true", Some(&commander), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pending.as_array().map(|a| a.len()), Some(1));

    let (status, _) = request(
        &app,
        "POST",
        &format!("/reports/{report_id}/decision"),
        Some(&soldier),
        Some(json!({"decision": "approve"})),
    )
    .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, decided) = request(
        &app,
        "POST",
        &format!("/reports/{report_id}/decision"),
        Some(&commander),
        Some(json!({"decision": "approve"})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decided["status"], "approved");

    // Deciding twice conflicts.
    let (status, _) = request(
        &app,
        "POST",
        &format!("/reports/{report_id}/decision"),
        Some(&commander),
        Some(json!({"decision": "reject"})),
    )
    .await?;
    assert_eq!(status, StatusCode::CONFLICT);

    Ok(())
}

#[tokio::test]
async fn events_chat_and_analytics() -> Result<()> {
    let app = test_app().await?;

    let (commander, _) = register(&app, "Петров П.П.", "petrov@example.com", "company_commander", "1-я рота").await?;
    let (soldier, _) = register(&app, "Иванов И.И.", "ivanov@example.com", "soldier", "1-я рота").await?;

    // Invalid span is rejected before anything is stored.
    let (status, _) = request(
        &app,
        "POST",
        "/events",
        Some(&commander),
        Some(json!({
            "title": "Строевой смотр",
            "starts_at": "2099-10-05T10:00:00Z",
            "ends_at": "2099-10-05T08:00:00Z",
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, event) = request(
        &app,
        "POST",
        "/events",
        Some(&commander),
        Some(json!({
            "title": "Строевой смотр",
            "starts_at": "2099-10-05T08:00:00Z",
            "ends_at": "2099-10-05T10:00:00Z",
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED, "{event}");
    let event_id = event["id"].as_str().context("missing event id")?.to_string();

    // Soldiers see the calendar but cannot edit it.
    let (status, listed) = request(&app, "GET", "/events?date=2099-10-05", Some(&soldier), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(|a| a.len()), Some(1));

    let (status, _) = request(
        &app,
        "PUT",
        &format!("/events/{event_id}"),
        Some(&soldier),
        Some(json!({"location": "Плац"})),
    )
    .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Unit chat is shared within the unit.
    let (status, message) = request(
        &app,
        "POST",
        "/chat",
        Some(&soldier),
        Some(json!({"body": "Построение в 08:00"})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(message["unit"], "1-я рота");

    let (status, feed) = request(&app, "GET", "/chat", Some(&commander), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(feed.as_array().map(|a| a.len()), Some(1));

    // Analytics is command-level only.
    let (status, summary) = request(&app, "GET", "/analytics/summary", Some(&commander), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["upcoming_events"], 1);
    let (status, _) = request(&app, "GET", "/analytics/summary", Some(&soldier), None).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    Ok(())
}
