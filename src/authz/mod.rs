//! Authorization module - role catalog, permission table and guards
//!
//! Access decisions are role-based:
//! - a per-role permission table of (resource, action, condition) rules,
//!   with `*` wildcards at the resource and superuser level
//! - a pure, synchronous evaluator (deny-by-default, never errors)
//! - one-line domain guards so call sites never spell resource/action pairs
//! - a separate rank hierarchy for "who can manage whom" checks
//!
//! Enforcement mode (off/advisory/strict) is decided at the HTTP layer, not
//! here; the evaluator only answers allow/deny.

mod evaluator;
mod guards;
mod principal;
mod role;
mod table;

pub use evaluator::{has_permission, PolicyEvaluator, TablePolicy};
pub use guards::*;
pub use principal::{Actor, TargetRef};
pub use role::{display_name_for, Role};
pub use table::{permissions_for, Action, Condition, Match, Resource, Rule};

/// Authorization enforcement mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthzMode {
    /// No permission checks (development mode)
    Off,
    /// Log denials but allow requests (testing mode)
    Advisory,
    /// Enforce 403 on denied requests (production mode)
    Strict,
}

impl AuthzMode {
    pub fn from_env() -> Self {
        match std::env::var("AUTHZ_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "off" => AuthzMode::Off,
            "advisory" => AuthzMode::Advisory,
            _ => AuthzMode::Strict,
        }
    }
}
