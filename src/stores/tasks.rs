use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::models::task::{Task, TaskCreateRequest, TaskStatus, TaskUpdateRequest};
use crate::utils::{day_bounds, utc_now};

#[derive(Debug, Default)]
pub struct TaskStore {
    inner: RwLock<Vec<Task>>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, assigned_by: Uuid, default_unit: &str, req: TaskCreateRequest) -> Task {
        let now = utc_now();
        let task = Task {
            id: Uuid::new_v4(),
            title: req.title,
            description: req.description,
            status: TaskStatus::Pending,
            assigned_to: req.assigned_to,
            assigned_by,
            unit: req.unit.unwrap_or_else(|| default_unit.to_string()),
            due_date: req.due_date,
            created_at: now,
            updated_at: now,
        };
        self.inner.write().push(task.clone());
        task
    }

    pub fn update(&self, id: Uuid, req: TaskUpdateRequest) -> Option<Task> {
        let mut tasks = self.inner.write();
        let task = tasks.iter_mut().find(|t| t.id == id)?;

        if let Some(title) = req.title {
            task.title = title;
        }
        if let Some(description) = req.description {
            task.description = Some(description);
        }
        if let Some(status) = req.status {
            task.status = status;
        }
        if let Some(assignee) = req.assigned_to {
            task.assigned_to = Some(assignee);
        }
        if let Some(due_date) = req.due_date {
            task.due_date = Some(due_date);
        }
        task.updated_at = utc_now();

        Some(task.clone())
    }

    pub fn delete(&self, id: Uuid) -> bool {
        let mut tasks = self.inner.write();
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        tasks.len() < before
    }

    pub fn get(&self, id: Uuid) -> Option<Task> {
        self.inner.read().iter().find(|t| t.id == id).cloned()
    }

    pub fn list(&self) -> Vec<Task> {
        self.inner.read().clone()
    }

    /// Tasks due on the given calendar day (UTC).
    pub fn by_date(&self, date: NaiveDate) -> Vec<Task> {
        let (start, end) = day_bounds(date);
        self.by_range(start, end)
    }

    pub fn by_range(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<Task> {
        self.inner
            .read()
            .iter()
            .filter(|t| t.due_date.map(|due| due >= from && due < to).unwrap_or(false))
            .cloned()
            .collect()
    }

    pub fn by_assignee(&self, user_id: Uuid) -> Vec<Task> {
        self.inner
            .read()
            .iter()
            .filter(|t| t.assigned_to == Some(user_id))
            .cloned()
            .collect()
    }

    /// Due before `now` and still open.
    pub fn overdue(&self, now: DateTime<Utc>) -> Vec<Task> {
        self.inner
            .read()
            .iter()
            .filter(|t| {
                t.due_date.map(|due| due < now).unwrap_or(false)
                    && !matches!(t.status, TaskStatus::Completed | TaskStatus::Cancelled)
            })
            .cloned()
            .collect()
    }

    /// Case-insensitive substring match over title and description.
    pub fn search(&self, query: &str) -> Vec<Task> {
        let needle = query.to_lowercase();
        self.inner
            .read()
            .iter()
            .filter(|t| {
                t.title.to_lowercase().contains(&needle)
                    || t.description
                        .as_deref()
                        .map(|d| d.to_lowercase().contains(&needle))
                        .unwrap_or(false)
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn create(title: &str) -> TaskCreateRequest {
        TaskCreateRequest {
            title: title.to_string(),
            description: None,
            assigned_to: None,
            unit: None,
            due_date: None,
        }
    }

    #[test]
    fn add_generates_id_and_timestamps() {
        let store = TaskStore::new();
        let commander = Uuid::new_v4();
        let task = store.add(commander, "1-я рота", create("Проверка техники"));

        assert_eq!(task.assigned_by, commander);
        assert_eq!(task.unit, "1-я рота");
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.created_at, task.updated_at);
        assert_eq!(store.get(task.id), Some(task));
    }

    #[test]
    fn update_merges_fields_and_bumps_updated_at() {
        let store = TaskStore::new();
        let task = store.add(Uuid::new_v4(), "1-я рота", create("Наряд"));

        let updated = store
            .update(
                task.id,
                TaskUpdateRequest {
                    status: Some(TaskStatus::InProgress),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.title, "Наряд");
        assert_eq!(updated.status, TaskStatus::InProgress);
        assert!(updated.updated_at >= task.updated_at);

        assert!(store.update(Uuid::new_v4(), TaskUpdateRequest::default()).is_none());
    }

    #[test]
    fn delete_reports_whether_anything_was_removed() {
        let store = TaskStore::new();
        let task = store.add(Uuid::new_v4(), "1-я рота", create("Наряд"));
        assert!(store.delete(task.id));
        assert!(!store.delete(task.id));
        assert!(store.get(task.id).is_none());
    }

    #[test]
    fn date_queries_use_due_date() {
        let store = TaskStore::new();
        let by = Uuid::new_v4();
        let due = "2025-10-10T10:00:00Z".parse::<DateTime<Utc>>().unwrap();

        let mut req = create("В срок");
        req.due_date = Some(due);
        let on_day = store.add(by, "А", req);

        let mut req = create("Позже");
        req.due_date = Some(due + Duration::days(3));
        store.add(by, "А", req);

        store.add(by, "А", create("Без срока"));

        let date = NaiveDate::from_ymd_opt(2025, 10, 10).unwrap();
        assert_eq!(store.by_date(date), vec![on_day.clone()]);
        assert_eq!(
            store.by_range(due - Duration::days(1), due + Duration::days(1)),
            vec![on_day]
        );
    }

    #[test]
    fn overdue_excludes_finished_tasks() {
        let store = TaskStore::new();
        let by = Uuid::new_v4();
        let past = utc_now() - Duration::days(1);

        let mut req = create("Просрочено");
        req.due_date = Some(past);
        let open = store.add(by, "А", req);

        let mut req = create("Сделано");
        req.due_date = Some(past);
        let done = store.add(by, "А", req);
        store.update(
            done.id,
            TaskUpdateRequest {
                status: Some(TaskStatus::Completed),
                ..Default::default()
            },
        );

        let overdue = store.overdue(utc_now());
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].id, open.id);
    }

    #[test]
    fn by_assignee_and_search() {
        let store = TaskStore::new();
        let by = Uuid::new_v4();
        let soldier = Uuid::new_v4();

        let mut req = create("Проверка техники");
        req.assigned_to = Some(soldier);
        let assigned = store.add(by, "А", req);
        store.add(by, "А", create("Уборка территории"));

        assert_eq!(store.by_assignee(soldier), vec![assigned.clone()]);
        assert_eq!(store.search("ПРОВЕРКА"), vec![assigned]);
        assert!(store.search("полигон").is_empty());
    }
}
