use uuid::Uuid;

use super::role::Role;
use crate::models::event::CalendarEvent;
use crate::models::report::Report;
use crate::models::task::Task;
use crate::models::user::User;

/// The authenticated identity permission checks run against.
///
/// Deliberately minimal: any auth provider that can supply id, role and unit
/// can produce one, nothing here assumes a particular vendor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub role: Role,
    pub unit: String,
}

impl Actor {
    pub fn new(id: Uuid, role: Role, unit: impl Into<String>) -> Self {
        Self {
            id,
            role,
            unit: unit.into(),
        }
    }
}

/// Borrowed view of the entity a conditional rule is evaluated against.
#[derive(Debug, Clone, Copy)]
pub enum TargetRef<'a> {
    Report(&'a Report),
    Task(&'a Task),
    Event(&'a CalendarEvent),
    User(&'a User),
}

impl TargetRef<'_> {
    pub fn unit(&self) -> &str {
        match self {
            TargetRef::Report(report) => &report.unit,
            TargetRef::Task(task) => &task.unit,
            TargetRef::Event(event) => &event.unit,
            TargetRef::User(user) => &user.unit,
        }
    }
}

impl<'a> From<&'a Report> for TargetRef<'a> {
    fn from(report: &'a Report) -> Self {
        TargetRef::Report(report)
    }
}

impl<'a> From<&'a Task> for TargetRef<'a> {
    fn from(task: &'a Task) -> Self {
        TargetRef::Task(task)
    }
}

impl<'a> From<&'a CalendarEvent> for TargetRef<'a> {
    fn from(event: &'a CalendarEvent) -> Self {
        TargetRef::Event(event)
    }
}

impl<'a> From<&'a User> for TargetRef<'a> {
    fn from(user: &'a User) -> Self {
        TargetRef::User(user)
    }
}
