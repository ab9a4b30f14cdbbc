use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::app::AppState;
use crate::authz::{can_approve_report, can_create_report, can_delete_report, can_read_report, can_update_report};
use crate::errors::{AppError, AppResult};
use crate::jwt::AuthUser;
use crate::models::report::{
    Report, ReportCreateRequest, ReportDecision, ReportDecisionRequest, ReportStatus,
    ReportUpdateRequest,
};

#[derive(Debug, Deserialize)]
pub struct ReportListQuery {
    pub author: Option<Uuid>,
    pub status: Option<ReportStatus>,
    pub pending: Option<bool>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub q: Option<String>,
}

#[utoipa::path(
    get,
    path = "/reports",
    tag = "Reports",
    responses((status = 200, description = "Reports visible to the caller", body = [Report]))
)]
pub async fn list_reports(
    State(state): State<AppState>,
    Query(query): Query<ReportListQuery>,
    auth: AuthUser,
) -> AppResult<Json<Vec<Report>>> {
    let reports = if query.pending.unwrap_or(false) {
        state.reports.pending_for_approver(auth.actor.id)
    } else if let Some(author) = query.author {
        state.reports.by_author(author)
    } else if let Some(status) = query.status {
        state.reports.by_status(status)
    } else if let (Some(from), Some(to)) = (query.from, query.to) {
        state.reports.by_range(from, to)
    } else if let Some(q) = &query.q {
        state.reports.search(q)
    } else {
        state.reports.list()
    };

    let visible = reports
        .into_iter()
        .filter(|report| state.permits(can_read_report(Some(&auth.actor), report)))
        .collect();

    Ok(Json(visible))
}

#[utoipa::path(
    post,
    path = "/reports",
    tag = "Reports",
    request_body = ReportCreateRequest,
    responses((status = 201, description = "Report created", body = Report))
)]
pub async fn create_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<ReportCreateRequest>,
) -> AppResult<(StatusCode, Json<Report>)> {
    state.enforce(can_create_report(Some(&auth.actor)), "create reports")?;

    if payload.title.trim().is_empty() {
        return Err(AppError::bad_request("title must not be empty"));
    }

    let report = state.reports.add(auth.actor.id, &auth.actor.unit, payload);
    Ok((StatusCode::CREATED, Json(report)))
}

#[utoipa::path(
    get,
    path = "/reports/{id}",
    tag = "Reports",
    params(("id" = Uuid, Path, description = "Report id")),
    responses((status = 200, description = "Report detail", body = Report))
)]
pub async fn get_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Report>> {
    let report = fetch_report(&state, id)?;
    state.enforce(can_read_report(Some(&auth.actor), &report), "read this report")?;
    Ok(Json(report))
}

#[utoipa::path(
    put,
    path = "/reports/{id}",
    tag = "Reports",
    params(("id" = Uuid, Path, description = "Report id")),
    request_body = ReportUpdateRequest,
    responses((status = 200, description = "Report updated", body = Report))
)]
pub async fn update_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReportUpdateRequest>,
) -> AppResult<Json<Report>> {
    let report = fetch_report(&state, id)?;
    state.enforce(can_update_report(Some(&auth.actor), &report), "update this report")?;

    // Verdicts are issued through the decision endpoint, not a field write.
    if matches!(payload.status, Some(ReportStatus::Approved | ReportStatus::Rejected)) {
        return Err(AppError::bad_request(
            "approval status is set via the decision endpoint",
        ));
    }

    let report = state
        .reports
        .update(id, payload)
        .ok_or_else(|| AppError::not_found("report not found"))?;
    Ok(Json(report))
}

#[utoipa::path(
    delete,
    path = "/reports/{id}",
    tag = "Reports",
    params(("id" = Uuid, Path, description = "Report id")),
    responses((status = 204, description = "Report deleted"))
)]
pub async fn delete_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let report = fetch_report(&state, id)?;
    state.enforce(can_delete_report(Some(&auth.actor), &report), "delete this report")?;

    if !state.reports.delete(id) {
        return Err(AppError::not_found("report not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/reports/{id}/decision",
    tag = "Reports",
    params(("id" = Uuid, Path, description = "Report id")),
    request_body = ReportDecisionRequest,
    responses(
        (status = 200, description = "Decision recorded", body = Report),
        (status = 409, description = "Report is not awaiting a decision")
    )
)]
pub async fn decide_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReportDecisionRequest>,
) -> AppResult<Json<Report>> {
    let report = fetch_report(&state, id)?;
    state.enforce(can_approve_report(Some(&auth.actor), &report), "decide on this report")?;

    if report.status != ReportStatus::Submitted {
        return Err(AppError::conflict("report is not awaiting a decision"));
    }

    let status = match payload.decision {
        ReportDecision::Approve => ReportStatus::Approved,
        ReportDecision::Reject => ReportStatus::Rejected,
    };

    let report = state
        .reports
        .update(
            id,
            ReportUpdateRequest {
                status: Some(status),
                ..Default::default()
            },
        )
        .ok_or_else(|| AppError::not_found("report not found"))?;
    Ok(Json(report))
}

fn fetch_report(state: &AppState, id: Uuid) -> AppResult<Report> {
    state
        .reports
        .get(id)
        .ok_or_else(|| AppError::not_found("report not found"))
}
