use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::app::AppState;
use crate::authz::{can_approve_task, can_assign_task, can_create_task, can_delete_task, can_read_task, can_update_task};
use crate::errors::{AppError, AppResult};
use crate::jwt::AuthUser;
use crate::models::task::{Task, TaskAssignRequest, TaskCreateRequest, TaskStatus, TaskUpdateRequest};
use crate::utils::utc_now;

#[derive(Debug, Deserialize)]
pub struct TaskListQuery {
    pub assignee: Option<Uuid>,
    pub due: Option<NaiveDate>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub overdue: Option<bool>,
    pub q: Option<String>,
}

#[utoipa::path(
    get,
    path = "/tasks",
    tag = "Tasks",
    responses((status = 200, description = "Tasks visible to the caller", body = [Task]))
)]
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<TaskListQuery>,
    auth: AuthUser,
) -> AppResult<Json<Vec<Task>>> {
    let tasks = if let Some(date) = query.due {
        state.tasks.by_date(date)
    } else if let (Some(from), Some(to)) = (query.from, query.to) {
        state.tasks.by_range(from, to)
    } else if query.overdue.unwrap_or(false) {
        state.tasks.overdue(utc_now())
    } else if let Some(assignee) = query.assignee {
        state.tasks.by_assignee(assignee)
    } else if let Some(q) = &query.q {
        state.tasks.search(q)
    } else {
        state.tasks.list()
    };

    let visible = tasks
        .into_iter()
        .filter(|task| state.permits(can_read_task(Some(&auth.actor), task)))
        .collect();

    Ok(Json(visible))
}

#[utoipa::path(
    post,
    path = "/tasks",
    tag = "Tasks",
    request_body = TaskCreateRequest,
    responses((status = 201, description = "Task created", body = Task))
)]
pub async fn create_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<TaskCreateRequest>,
) -> AppResult<(StatusCode, Json<Task>)> {
    state.enforce(can_create_task(Some(&auth.actor)), "create tasks")?;

    if payload.title.trim().is_empty() {
        return Err(AppError::bad_request("title must not be empty"));
    }

    let task = state.tasks.add(auth.actor.id, &auth.actor.unit, payload);
    Ok((StatusCode::CREATED, Json(task)))
}

#[utoipa::path(
    get,
    path = "/tasks/{id}",
    tag = "Tasks",
    params(("id" = Uuid, Path, description = "Task id")),
    responses((status = 200, description = "Task detail", body = Task))
)]
pub async fn get_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Task>> {
    let task = fetch_task(&state, id)?;
    state.enforce(can_read_task(Some(&auth.actor), &task), "read this task")?;
    Ok(Json(task))
}

#[utoipa::path(
    put,
    path = "/tasks/{id}",
    tag = "Tasks",
    params(("id" = Uuid, Path, description = "Task id")),
    request_body = TaskUpdateRequest,
    responses((status = 200, description = "Task updated", body = Task))
)]
pub async fn update_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<TaskUpdateRequest>,
) -> AppResult<Json<Task>> {
    let task = fetch_task(&state, id)?;
    state.enforce(can_update_task(Some(&auth.actor), &task), "update this task")?;

    let task = state
        .tasks
        .update(id, payload)
        .ok_or_else(|| AppError::not_found("task not found"))?;
    Ok(Json(task))
}

#[utoipa::path(
    delete,
    path = "/tasks/{id}",
    tag = "Tasks",
    params(("id" = Uuid, Path, description = "Task id")),
    responses((status = 204, description = "Task deleted"))
)]
pub async fn delete_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let task = fetch_task(&state, id)?;
    state.enforce(can_delete_task(Some(&auth.actor), &task), "delete this task")?;

    if !state.tasks.delete(id) {
        return Err(AppError::not_found("task not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/tasks/{id}/assign",
    tag = "Tasks",
    params(("id" = Uuid, Path, description = "Task id")),
    request_body = TaskAssignRequest,
    responses((status = 200, description = "Task reassigned", body = Task))
)]
pub async fn assign_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<TaskAssignRequest>,
) -> AppResult<Json<Task>> {
    let task = fetch_task(&state, id)?;
    state.enforce(can_assign_task(Some(&auth.actor), &task), "assign this task")?;

    let task = state
        .tasks
        .update(
            id,
            TaskUpdateRequest {
                assigned_to: Some(payload.assignee),
                ..Default::default()
            },
        )
        .ok_or_else(|| AppError::not_found("task not found"))?;
    Ok(Json(task))
}

#[utoipa::path(
    post,
    path = "/tasks/{id}/approve",
    tag = "Tasks",
    params(("id" = Uuid, Path, description = "Task id")),
    responses((status = 200, description = "Task completion approved", body = Task))
)]
pub async fn approve_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Task>> {
    let task = fetch_task(&state, id)?;
    state.enforce(can_approve_task(Some(&auth.actor), &task), "approve this task")?;

    if task.status == TaskStatus::Cancelled {
        return Err(AppError::conflict("cancelled tasks cannot be approved"));
    }

    let task = state
        .tasks
        .update(
            id,
            TaskUpdateRequest {
                status: Some(TaskStatus::Completed),
                ..Default::default()
            },
        )
        .ok_or_else(|| AppError::not_found("task not found"))?;
    Ok(Json(task))
}

fn fetch_task(state: &AppState, id: Uuid) -> AppResult<Task> {
    state
        .tasks
        .get(id)
        .ok_or_else(|| AppError::not_found("task not found"))
}
