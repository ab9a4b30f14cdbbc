use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::models::report::{Report, ReportCreateRequest, ReportStatus, ReportUpdateRequest};
use crate::utils::utc_now;

#[derive(Debug, Default)]
pub struct ReportStore {
    inner: RwLock<Vec<Report>>,
}

impl ReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, author: Uuid, unit: &str, req: ReportCreateRequest) -> Report {
        let now = utc_now();
        let report = Report {
            id: Uuid::new_v4(),
            title: req.title,
            body: req.body,
            author,
            unit: unit.to_string(),
            status: ReportStatus::Draft,
            approvers: req.approvers.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        self.inner.write().push(report.clone());
        report
    }

    pub fn update(&self, id: Uuid, req: ReportUpdateRequest) -> Option<Report> {
        let mut reports = self.inner.write();
        let report = reports.iter_mut().find(|r| r.id == id)?;

        if let Some(title) = req.title {
            report.title = title;
        }
        if let Some(body) = req.body {
            report.body = body;
        }
        if let Some(status) = req.status {
            report.status = status;
        }
        if let Some(approvers) = req.approvers {
            report.approvers = approvers;
        }
        report.updated_at = utc_now();

        Some(report.clone())
    }

    pub fn delete(&self, id: Uuid) -> bool {
        let mut reports = self.inner.write();
        let before = reports.len();
        reports.retain(|r| r.id != id);
        reports.len() < before
    }

    pub fn get(&self, id: Uuid) -> Option<Report> {
        self.inner.read().iter().find(|r| r.id == id).cloned()
    }

    pub fn list(&self) -> Vec<Report> {
        self.inner.read().clone()
    }

    pub fn by_author(&self, author: Uuid) -> Vec<Report> {
        self.inner
            .read()
            .iter()
            .filter(|r| r.author == author)
            .cloned()
            .collect()
    }

    pub fn by_status(&self, status: ReportStatus) -> Vec<Report> {
        self.inner
            .read()
            .iter()
            .filter(|r| r.status == status)
            .cloned()
            .collect()
    }

    /// Submitted reports waiting on the given approver.
    pub fn pending_for_approver(&self, approver: Uuid) -> Vec<Report> {
        self.inner
            .read()
            .iter()
            .filter(|r| r.status == ReportStatus::Submitted && r.approvers.contains(&approver))
            .cloned()
            .collect()
    }

    pub fn by_range(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<Report> {
        self.inner
            .read()
            .iter()
            .filter(|r| r.created_at >= from && r.created_at < to)
            .cloned()
            .collect()
    }

    /// Case-insensitive substring match over title and body.
    pub fn search(&self, query: &str) -> Vec<Report> {
        let needle = query.to_lowercase();
        self.inner
            .read()
            .iter()
            .filter(|r| {
                r.title.to_lowercase().contains(&needle) || r.body.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }
}
