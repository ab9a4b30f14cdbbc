use axum::extract::State;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app::AppState;
use crate::authz::can_read_analytics;
use crate::errors::AppResult;
use crate::jwt::AuthUser;
use crate::models::report::ReportStatus;
use crate::models::task::TaskStatus;
use crate::utils::utc_now;

#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyticsSummary {
    pub tasks_pending: usize,
    pub tasks_in_progress: usize,
    pub tasks_completed: usize,
    pub tasks_overdue: usize,
    pub reports_draft: usize,
    pub reports_submitted: usize,
    pub reports_approved: usize,
    pub reports_rejected: usize,
    pub upcoming_events: usize,
}

#[utoipa::path(
    get,
    path = "/analytics/summary",
    tag = "Analytics",
    responses((status = 200, description = "Aggregate counters", body = AnalyticsSummary))
)]
pub async fn summary(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<AnalyticsSummary>> {
    state.enforce(can_read_analytics(Some(&auth.actor)), "read analytics")?;

    let now = utc_now();
    let tasks = state.tasks.list();
    let count_tasks =
        |status: TaskStatus| tasks.iter().filter(|t| t.status == status).count();

    let summary = AnalyticsSummary {
        tasks_pending: count_tasks(TaskStatus::Pending),
        tasks_in_progress: count_tasks(TaskStatus::InProgress),
        tasks_completed: count_tasks(TaskStatus::Completed),
        tasks_overdue: state.tasks.overdue(now).len(),
        reports_draft: state.reports.by_status(ReportStatus::Draft).len(),
        reports_submitted: state.reports.by_status(ReportStatus::Submitted).len(),
        reports_approved: state.reports.by_status(ReportStatus::Approved).len(),
        reports_rejected: state.reports.by_status(ReportStatus::Rejected).len(),
        upcoming_events: state
            .events
            .list()
            .iter()
            .filter(|e| e.starts_at >= now)
            .count(),
    };

    Ok(Json(summary))
}
