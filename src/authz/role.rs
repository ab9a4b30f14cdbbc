use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Closed set of roles, ordered by authority.
///
/// The wire tags (`admin`, `battalion_commander`, ...) are what tokens and
/// request bodies carry; adding a variant forces every `match` over roles
/// to be revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    BattalionCommander,
    CompanyCommander,
    Officer,
    Soldier,
}

/// Highest to lowest authority. Fixed, never empty, no duplicates.
const HIERARCHY: [Role; 5] = [
    Role::Admin,
    Role::BattalionCommander,
    Role::CompanyCommander,
    Role::Officer,
    Role::Soldier,
];

impl Role {
    pub fn hierarchy() -> &'static [Role] {
        &HIERARCHY
    }

    /// Position in the hierarchy; 0 is the highest authority.
    pub fn rank(self) -> usize {
        match self {
            Role::Admin => 0,
            Role::BattalionCommander => 1,
            Role::CompanyCommander => 2,
            Role::Officer => 3,
            Role::Soldier => 4,
        }
    }

    /// Strictly-before comparison in the hierarchy; `is_higher_rank(r, r)` is
    /// false for every role.
    pub fn is_higher_rank(self, other: Role) -> bool {
        self.rank() < other.rank()
    }

    pub fn as_tag(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::BattalionCommander => "battalion_commander",
            Role::CompanyCommander => "company_commander",
            Role::Officer => "officer",
            Role::Soldier => "soldier",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Role> {
        match tag {
            "admin" => Some(Role::Admin),
            "battalion_commander" => Some(Role::BattalionCommander),
            "company_commander" => Some(Role::CompanyCommander),
            "officer" => Some(Role::Officer),
            "soldier" => Some(Role::Soldier),
            _ => None,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Role::Admin => "Администратор",
            Role::BattalionCommander => "Командир батальона",
            Role::CompanyCommander => "Командир роты",
            Role::Officer => "Офицер",
            Role::Soldier => "Солдат",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Label for a raw role tag; unknown tags fall back to the tag itself.
pub fn display_name_for(tag: &str) -> String {
    Role::from_tag(tag)
        .map(|role| role.display_name().to_string())
        .unwrap_or_else(|| tag.to_string())
}
