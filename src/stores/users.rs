use parking_lot::RwLock;
use uuid::Uuid;

use crate::models::user::{User, UserRecord, UserUpdateRequest};
use crate::utils::utc_now;

/// Personnel directory. Doubles as the credential store for the local auth
/// routes; password hashes stay inside the records and are never serialized.
#[derive(Debug, Default)]
pub struct UserDirectory {
    inner: RwLock<Vec<UserRecord>>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, record: UserRecord) -> User {
        let user = record.user.clone();
        self.inner.write().push(record);
        user
    }

    pub fn get(&self, id: Uuid) -> Option<User> {
        self.inner
            .read()
            .iter()
            .find(|r| r.user.id == id)
            .map(|r| r.user.clone())
    }

    pub fn record_by_email(&self, email: &str) -> Option<UserRecord> {
        self.inner
            .read()
            .iter()
            .find(|r| r.user.email == email)
            .cloned()
    }

    pub fn update(&self, id: Uuid, req: UserUpdateRequest) -> Option<User> {
        let mut records = self.inner.write();
        let record = records.iter_mut().find(|r| r.user.id == id)?;

        if let Some(name) = req.name {
            record.user.name = name;
        }
        if let Some(email) = req.email {
            record.user.email = email;
        }
        if let Some(role) = req.role {
            record.user.role = role;
        }
        if let Some(unit) = req.unit {
            record.user.unit = unit;
        }
        record.user.updated_at = utc_now();

        Some(record.user.clone())
    }

    pub fn list(&self) -> Vec<User> {
        self.inner.read().iter().map(|r| r.user.clone()).collect()
    }

    pub fn in_unit(&self, unit: &str) -> Vec<User> {
        self.inner
            .read()
            .iter()
            .filter(|r| r.user.unit == unit)
            .map(|r| r.user.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authz::Role;

    fn record(name: &str, email: &str, role: Role, unit: &str) -> UserRecord {
        let now = utc_now();
        UserRecord {
            user: User {
                id: Uuid::new_v4(),
                name: name.to_string(),
                email: email.to_string(),
                role,
                unit: unit.to_string(),
                created_at: now,
                updated_at: now,
            },
            password_hash: "$argon2id$stub".to_string(),
        }
    }

    #[test]
    fn lookup_by_id_and_email() {
        let directory = UserDirectory::new();
        let user = directory.add(record("Иванов", "ivanov@example.com", Role::Soldier, "1-я рота"));

        assert_eq!(directory.get(user.id), Some(user.clone()));
        assert_eq!(
            directory.record_by_email("ivanov@example.com").map(|r| r.user),
            Some(user)
        );
        assert!(directory.record_by_email("petrov@example.com").is_none());
    }

    #[test]
    fn update_merges_and_bumps_updated_at() {
        let directory = UserDirectory::new();
        let user = directory.add(record("Иванов", "ivanov@example.com", Role::Soldier, "1-я рота"));

        let promoted = directory
            .update(
                user.id,
                UserUpdateRequest {
                    name: None,
                    email: None,
                    role: Some(Role::Officer),
                    unit: Some("2-я рота".to_string()),
                },
            )
            .unwrap();

        assert_eq!(promoted.role, Role::Officer);
        assert_eq!(promoted.unit, "2-я рота");
        assert_eq!(promoted.name, "Иванов");
        assert!(promoted.updated_at >= user.updated_at);
    }

    #[test]
    fn unit_filter_is_exact() {
        let directory = UserDirectory::new();
        directory.add(record("Иванов", "a@example.com", Role::Soldier, "1-я рота"));
        directory.add(record("Петров", "b@example.com", Role::Soldier, "2-я рота"));

        assert_eq!(directory.in_unit("1-я рота").len(), 1);
        assert_eq!(directory.list().len(), 2);
    }
}
