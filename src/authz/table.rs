use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::principal::{Actor, TargetRef};
use super::role::Role;

/// Categories of entities under access control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Reports,
    Tasks,
    Events,
    Users,
    Analytics,
    Chat,
}

/// Operations on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    Approve,
    Assign,
}

/// Rule pattern; `Any` is the `*` wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match<T> {
    Any,
    One(T),
}

impl<T: PartialEq + Copy> Match<T> {
    pub fn covers(self, value: T) -> bool {
        match self {
            Match::Any => true,
            Match::One(pattern) => pattern == value,
        }
    }
}

/// Predicate attached to a rule, restricting it to particular targets.
///
/// A closed sum instead of stored closures so the table stays data and every
/// predicate is individually testable. A condition evaluated against an
/// entity kind it does not know is false, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Always,
    IsAuthor,
    IsAssignee,
    IsAssigner,
    IsAssigneeOrAssigner,
    IsOrganizer,
    IsApprover,
    SameUnit,
}

impl Condition {
    pub fn holds(self, actor: &Actor, target: TargetRef<'_>) -> bool {
        match (self, target) {
            (Condition::Always, _) => true,
            (Condition::IsAuthor, TargetRef::Report(report)) => report.author == actor.id,
            (Condition::IsAssignee, TargetRef::Task(task)) => task.assigned_to == Some(actor.id),
            (Condition::IsAssigner, TargetRef::Task(task)) => task.assigned_by == actor.id,
            (Condition::IsAssigneeOrAssigner, TargetRef::Task(task)) => {
                task.assigned_to == Some(actor.id) || task.assigned_by == actor.id
            }
            (Condition::IsOrganizer, TargetRef::Event(event)) => event.organizer == actor.id,
            (Condition::IsApprover, TargetRef::Report(report)) => report.approvers.contains(&actor.id),
            (Condition::SameUnit, target) => target.unit() == actor.unit,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub resource: Match<Resource>,
    pub action: Match<Action>,
    pub condition: Condition,
}

const fn rule(resource: Match<Resource>, action: Match<Action>, condition: Condition) -> Rule {
    Rule {
        resource,
        action,
        condition,
    }
}

use Action::{Approve, Assign, Create, Delete, Read, Update};
use Condition::{Always, IsApprover, IsAssignee, IsAssigneeOrAssigner, IsAssigner, IsAuthor, IsOrganizer, SameUnit};
use Match::{Any, One};
use Resource::{Analytics, Chat, Events, Reports, Tasks, Users};

const ADMIN_RULES: &[Rule] = &[rule(Any, Any, Always)];

const BATTALION_COMMANDER_RULES: &[Rule] = &[
    rule(One(Reports), Any, Always),
    rule(One(Tasks), Any, Always),
    rule(One(Events), Any, Always),
    rule(One(Chat), Any, Always),
    rule(One(Users), One(Read), Always),
    rule(One(Analytics), One(Read), Always),
];

const COMPANY_COMMANDER_RULES: &[Rule] = &[
    rule(One(Reports), One(Create), Always),
    rule(One(Reports), One(Read), SameUnit),
    rule(One(Reports), One(Update), IsAuthor),
    rule(One(Reports), One(Approve), IsApprover),
    rule(One(Tasks), One(Create), Always),
    rule(One(Tasks), One(Assign), Always),
    rule(One(Tasks), One(Read), SameUnit),
    rule(One(Tasks), One(Update), IsAssigner),
    rule(One(Tasks), One(Delete), IsAssigner),
    rule(One(Tasks), One(Approve), IsAssigner),
    rule(One(Events), One(Create), Always),
    rule(One(Events), One(Read), SameUnit),
    rule(One(Events), One(Update), IsOrganizer),
    rule(One(Events), One(Delete), IsOrganizer),
    rule(One(Users), One(Read), SameUnit),
    rule(One(Analytics), One(Read), Always),
    rule(One(Chat), Any, Always),
];

const OFFICER_RULES: &[Rule] = &[
    rule(One(Reports), One(Create), Always),
    rule(One(Reports), One(Read), IsAuthor),
    rule(One(Reports), One(Update), IsAuthor),
    rule(One(Tasks), One(Create), Always),
    rule(One(Tasks), One(Assign), Always),
    rule(One(Tasks), One(Read), IsAssigneeOrAssigner),
    rule(One(Tasks), One(Update), IsAssigner),
    rule(One(Tasks), One(Approve), IsAssigner),
    rule(One(Events), One(Create), Always),
    rule(One(Events), One(Read), Always),
    rule(One(Events), One(Update), IsOrganizer),
    rule(One(Users), One(Read), SameUnit),
    rule(One(Chat), Any, Always),
];

const SOLDIER_RULES: &[Rule] = &[
    rule(One(Reports), One(Create), Always),
    rule(One(Reports), One(Read), IsAuthor),
    rule(One(Reports), One(Update), IsAuthor),
    rule(One(Tasks), One(Read), IsAssignee),
    rule(One(Tasks), One(Update), IsAssignee),
    rule(One(Events), One(Read), Always),
    rule(One(Chat), Any, Always),
];

/// Per-role rule set. Exhaustive over [`Role`]: a new role does not compile
/// until it is given a table entry.
pub fn permissions_for(role: Role) -> &'static [Rule] {
    match role {
        Role::Admin => ADMIN_RULES,
        Role::BattalionCommander => BATTALION_COMMANDER_RULES,
        Role::CompanyCommander => COMPANY_COMMANDER_RULES,
        Role::Officer => OFFICER_RULES,
        Role::Soldier => SOLDIER_RULES,
    }
}
