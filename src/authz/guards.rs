//! Domain guards: fixed (resource, action) forwards into the evaluator so
//! handlers never spell the pairs themselves. No business logic lives here,
//! with the single exception of [`can_manage_user`], a rank-and-unit check
//! that sits outside the table-driven model.

use super::evaluator::has_permission;
use super::principal::Actor;
use super::role::Role;
use super::table::{Action, Resource};
use crate::models::event::CalendarEvent;
use crate::models::report::Report;
use crate::models::task::Task;
use crate::models::user::User;

pub fn can_create_report(user: Option<&Actor>) -> bool {
    has_permission(user, Resource::Reports, Action::Create, None)
}

pub fn can_read_report(user: Option<&Actor>, report: &Report) -> bool {
    has_permission(user, Resource::Reports, Action::Read, Some(report.into()))
}

pub fn can_update_report(user: Option<&Actor>, report: &Report) -> bool {
    has_permission(user, Resource::Reports, Action::Update, Some(report.into()))
}

pub fn can_delete_report(user: Option<&Actor>, report: &Report) -> bool {
    has_permission(user, Resource::Reports, Action::Delete, Some(report.into()))
}

pub fn can_approve_report(user: Option<&Actor>, report: &Report) -> bool {
    has_permission(user, Resource::Reports, Action::Approve, Some(report.into()))
}

pub fn can_create_task(user: Option<&Actor>) -> bool {
    has_permission(user, Resource::Tasks, Action::Create, None)
}

pub fn can_read_task(user: Option<&Actor>, task: &Task) -> bool {
    has_permission(user, Resource::Tasks, Action::Read, Some(task.into()))
}

pub fn can_update_task(user: Option<&Actor>, task: &Task) -> bool {
    has_permission(user, Resource::Tasks, Action::Update, Some(task.into()))
}

pub fn can_delete_task(user: Option<&Actor>, task: &Task) -> bool {
    has_permission(user, Resource::Tasks, Action::Delete, Some(task.into()))
}

pub fn can_assign_task(user: Option<&Actor>, task: &Task) -> bool {
    has_permission(user, Resource::Tasks, Action::Assign, Some(task.into()))
}

pub fn can_approve_task(user: Option<&Actor>, task: &Task) -> bool {
    has_permission(user, Resource::Tasks, Action::Approve, Some(task.into()))
}

pub fn can_create_event(user: Option<&Actor>) -> bool {
    has_permission(user, Resource::Events, Action::Create, None)
}

pub fn can_read_event(user: Option<&Actor>, event: &CalendarEvent) -> bool {
    has_permission(user, Resource::Events, Action::Read, Some(event.into()))
}

pub fn can_update_event(user: Option<&Actor>, event: &CalendarEvent) -> bool {
    has_permission(user, Resource::Events, Action::Update, Some(event.into()))
}

pub fn can_delete_event(user: Option<&Actor>, event: &CalendarEvent) -> bool {
    has_permission(user, Resource::Events, Action::Delete, Some(event.into()))
}

pub fn can_read_user(user: Option<&Actor>, target: &User) -> bool {
    has_permission(user, Resource::Users, Action::Read, Some(target.into()))
}

pub fn can_read_analytics(user: Option<&Actor>) -> bool {
    has_permission(user, Resource::Analytics, Action::Read, None)
}

pub fn can_read_chat(user: Option<&Actor>) -> bool {
    has_permission(user, Resource::Chat, Action::Read, None)
}

pub fn can_post_chat(user: Option<&Actor>) -> bool {
    has_permission(user, Resource::Chat, Action::Create, None)
}

/// Unit names containing this marker identify battalion-level commands.
const BATTALION_UNIT_MARKER: &str = "Батальон";

/// Management-scope check, separate from the resource/action table.
///
/// Rules, in order: no user denies; admin always manages; equal or higher
/// rank is never managed; a battalion commander manages targets whose unit
/// name contains their own unit name as a substring, or anyone below them
/// when their own unit carries the battalion marker; a company commander
/// manages exact unit matches only.
///
/// The substring containment (instead of a structured unit hierarchy) relies
/// on the unit naming convention and is fragile against renames.
pub fn can_manage_user(user: Option<&Actor>, target: &User) -> bool {
    let Some(user) = user else {
        return false;
    };

    if user.role == Role::Admin {
        return true;
    }

    if !user.role.is_higher_rank(target.role) {
        return false;
    }

    match user.role {
        Role::BattalionCommander => {
            target.unit.contains(&user.unit) || user.unit.contains(BATTALION_UNIT_MARKER)
        }
        Role::CompanyCommander => target.unit == user.unit,
        _ => false,
    }
}
