use super::principal::{Actor, TargetRef};
use super::table::{permissions_for, Action, Match, Resource};

/// Policy evaluator seam so the HTTP layer and tests can swap the decision
/// logic without touching call sites. Evaluation is pure and synchronous.
pub trait PolicyEvaluator: Send + Sync {
    fn allows(
        &self,
        user: Option<&Actor>,
        resource: Resource,
        action: Action,
        target: Option<TargetRef<'_>>,
    ) -> bool;
}

/// Default evaluator backed by the static per-role permission table.
#[derive(Debug, Clone, Copy, Default)]
pub struct TablePolicy;

impl TablePolicy {
    pub fn new() -> Self {
        Self
    }
}

impl PolicyEvaluator for TablePolicy {
    fn allows(
        &self,
        user: Option<&Actor>,
        resource: Resource,
        action: Action,
        target: Option<TargetRef<'_>>,
    ) -> bool {
        has_permission(user, resource, action, target)
    }
}

/// Central allow/deny decision.
///
/// Evaluation order:
/// 1. no user -> deny
/// 2. `(*, *)` entry -> allow (superuser, short-circuits everything)
/// 3. `(resource, *)` entry -> allow (resource-level superuser)
/// 4. exact `(resource, action)` entries: unconditional -> allow; conditional
///    with a target -> the condition's verdict; conditional without a target
///    -> the condition cannot be evaluated, deny
/// 5. nothing matched -> deny
///
/// Never panics and never errors; malformed situations resolve to deny.
pub fn has_permission(
    user: Option<&Actor>,
    resource: Resource,
    action: Action,
    target: Option<TargetRef<'_>>,
) -> bool {
    let Some(user) = user else {
        tracing::debug!(resource = ?resource, action = ?action, "denied: no authenticated user");
        return false;
    };

    let rules = permissions_for(user.role);

    if rules
        .iter()
        .any(|r| r.resource == Match::Any && r.action == Match::Any)
    {
        tracing::debug!(user_id = %user.id, role = %user.role, "granted: superuser wildcard");
        return true;
    }

    if rules
        .iter()
        .any(|r| r.resource == Match::One(resource) && r.action == Match::Any)
    {
        tracing::debug!(
            user_id = %user.id,
            role = %user.role,
            resource = ?resource,
            "granted: resource wildcard"
        );
        return true;
    }

    let exact = rules
        .iter()
        .filter(|r| r.resource == Match::One(resource) && r.action == Match::One(action));

    for rule in exact {
        let granted = match target {
            Some(target) => rule.condition.holds(user, target),
            // An unconditional rule needs no target; a conditional one has
            // nothing to evaluate against.
            None => rule.condition == super::table::Condition::Always,
        };

        if granted {
            tracing::debug!(
                user_id = %user.id,
                role = %user.role,
                resource = ?resource,
                action = ?action,
                condition = ?rule.condition,
                "granted"
            );
            return true;
        }
    }

    tracing::debug!(
        user_id = %user.id,
        role = %user.role,
        resource = ?resource,
        action = ?action,
        "denied"
    );
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authz::Role;
    use crate::models::report::{Report, ReportStatus};
    use crate::models::task::{Task, TaskStatus};
    use chrono::Utc;
    use uuid::Uuid;

    fn actor(role: Role, unit: &str) -> Actor {
        Actor::new(Uuid::new_v4(), role, unit)
    }

    fn report(author: Uuid, unit: &str) -> Report {
        Report {
            id: Uuid::new_v4(),
            title: "Рапорт".to_string(),
            body: "Содержание".to_string(),
            author,
            unit: unit.to_string(),
            status: ReportStatus::Draft,
            approvers: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn task(assigned_to: Uuid, assigned_by: Uuid) -> Task {
        Task {
            id: Uuid::new_v4(),
            title: "Наряд".to_string(),
            description: None,
            status: TaskStatus::Pending,
            assigned_to: Some(assigned_to),
            assigned_by,
            unit: "1-я рота".to_string(),
            due_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn superuser_wildcard_grants_everything() {
        let admin = actor(Role::Admin, "Штаб");
        for resource in [
            Resource::Reports,
            Resource::Tasks,
            Resource::Events,
            Resource::Users,
            Resource::Analytics,
            Resource::Chat,
        ] {
            for action in [
                Action::Create,
                Action::Read,
                Action::Update,
                Action::Delete,
                Action::Approve,
                Action::Assign,
            ] {
                assert!(has_permission(Some(&admin), resource, action, None));
            }
        }
    }

    #[test]
    fn no_user_is_always_denied() {
        assert!(!has_permission(None, Resource::Reports, Action::Read, None));
        assert!(!has_permission(None, Resource::Analytics, Action::Read, None));
    }

    #[test]
    fn absent_pair_is_denied() {
        let soldier = actor(Role::Soldier, "1-я рота");
        assert!(!has_permission(
            Some(&soldier),
            Resource::Analytics,
            Action::Read,
            None
        ));
        assert!(!has_permission(
            Some(&soldier),
            Resource::Tasks,
            Action::Delete,
            None
        ));
    }

    #[test]
    fn resource_wildcard_covers_all_actions() {
        let commander = actor(Role::BattalionCommander, "1-й Батальон");
        let foreign_report = report(Uuid::new_v4(), "2-я рота");
        assert!(has_permission(
            Some(&commander),
            Resource::Reports,
            Action::Delete,
            Some((&foreign_report).into())
        ));
        assert!(has_permission(
            Some(&commander),
            Resource::Reports,
            Action::Approve,
            None
        ));
    }

    #[test]
    fn conditional_rule_matches_predicate_when_target_present() {
        let officer = actor(Role::Officer, "А");
        let own = report(officer.id, "А");
        let foreign = report(Uuid::new_v4(), "А");

        assert!(has_permission(
            Some(&officer),
            Resource::Reports,
            Action::Update,
            Some((&own).into())
        ));
        assert!(!has_permission(
            Some(&officer),
            Resource::Reports,
            Action::Update,
            Some((&foreign).into())
        ));
    }

    #[test]
    fn conditional_rule_without_target_is_denied() {
        let officer = actor(Role::Officer, "А");
        assert!(!has_permission(
            Some(&officer),
            Resource::Reports,
            Action::Update,
            None
        ));
    }

    #[test]
    fn soldier_sees_only_assigned_tasks() {
        let soldier = actor(Role::Soldier, "1-я рота");
        let own = task(soldier.id, Uuid::new_v4());
        let foreign = task(Uuid::new_v4(), Uuid::new_v4());

        for action in [Action::Read, Action::Update] {
            assert!(has_permission(
                Some(&soldier),
                Resource::Tasks,
                action,
                Some((&own).into())
            ));
            assert!(!has_permission(
                Some(&soldier),
                Resource::Tasks,
                action,
                Some((&foreign).into())
            ));
        }
    }

    #[test]
    fn table_policy_delegates_to_the_table() {
        let policy = TablePolicy::new();
        let admin = actor(Role::Admin, "Штаб");
        assert!(policy.allows(Some(&admin), Resource::Chat, Action::Create, None));
        assert!(!policy.allows(None, Resource::Chat, Action::Create, None));
    }
}
