use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Draft,
    Submitted,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Report {
    pub id: Uuid,
    #[schema(example = "Сводка за сутки")]
    pub title: String,
    pub body: String,
    pub author: Uuid,
    #[schema(example = "1-я рота")]
    pub unit: String,
    pub status: ReportStatus,
    pub approvers: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReportCreateRequest {
    #[schema(example = "Сводка за сутки")]
    pub title: String,
    pub body: String,
    pub approvers: Option<Vec<Uuid>>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ReportUpdateRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub status: Option<ReportStatus>,
    pub approvers: Option<Vec<Uuid>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportDecision {
    Approve,
    Reject,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReportDecisionRequest {
    pub decision: ReportDecision,
}
