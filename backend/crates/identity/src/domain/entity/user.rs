//! User Aggregate
//!
//! A user must be constructed with at least one identity channel (email or
//! phone); the constructors enforce this. Roles form a set keyed by alias.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::entity::role::Role;
use crate::domain::value_object::{BlockStatus, EmailIdentity, Password, PhoneIdentity, Status};

/// User aggregate root
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: Option<EmailIdentity>,
    pub phone: Option<PhoneIdentity>,
    /// Present only when email/password auth is enabled for this user
    pub password: Option<Password>,
    pub name: String,
    pub confirmed: Status,
    pub blocked: BlockStatus,
    pub created_at: DateTime<Utc>,
    roles: HashSet<Role>,
}

impl User {
    /// Construct a user registered through an email identity
    pub fn with_email(
        id: UserId,
        email: EmailIdentity,
        password: Option<Password>,
        name: impl Into<String>,
        confirmed: Status,
        blocked: BlockStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email: Some(email),
            phone: None,
            password,
            name: name.into(),
            confirmed,
            blocked,
            created_at,
            roles: HashSet::new(),
        }
    }

    /// Construct a user registered through a phone identity
    pub fn with_phone(
        id: UserId,
        phone: PhoneIdentity,
        name: impl Into<String>,
        confirmed: Status,
        blocked: BlockStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email: None,
            phone: Some(phone),
            password: None,
            name: name.into(),
            confirmed,
            blocked,
            created_at,
            roles: HashSet::new(),
        }
    }

    // ========================================================================
    // Roles
    // ========================================================================

    pub fn roles(&self) -> &HashSet<Role> {
        &self.roles
    }

    /// Add a role membership; returns false if the alias was already present
    pub fn add_role(&mut self, role: Role) -> bool {
        self.roles.insert(role)
    }

    pub fn has_role(&self, alias: &str) -> bool {
        self.roles.iter().any(|role| role.alias == alias)
    }

    /// Replace all role memberships
    pub fn set_roles(&mut self, roles: impl IntoIterator<Item = Role>) {
        self.roles = roles.into_iter().collect();
    }

    // ========================================================================
    // Status
    // ========================================================================

    /// Active users can authenticate and refresh sessions
    pub fn is_active(&self) -> bool {
        self.confirmed.value && !self.blocked.value
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked.value
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed.value
    }

    /// Block the account with an operator-facing reason
    pub fn block(&mut self, code: Option<i32>, reason: Option<String>, at: DateTime<Utc>) {
        self.blocked = BlockStatus::new(true, at, code, reason);
    }

    /// Lift a block
    pub fn unblock(&mut self, at: DateTime<Utc>) {
        self.blocked = BlockStatus::clear(at);
    }

    /// Mark the account confirmed
    pub fn confirm(&mut self, at: DateTime<Utc>) {
        self.confirmed = Status::new(true, at);
    }

    // ========================================================================
    // Contact
    // ========================================================================

    /// Preferred contact handle: phone, then email, then the external GUID,
    /// then the display name
    pub fn contact(&self) -> String {
        if let Some(phone) = &self.phone {
            return phone.value.clone();
        }
        if let Some(email) = &self.email {
            return email.value.clone();
        }
        if !self.id.is_empty() {
            return self.id.guid().to_string();
        }
        self.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::IdPair;

    fn email_user() -> User {
        let now = Utc::now();
        User::with_email(
            IdPair::new(),
            EmailIdentity::new("u@test.com"),
            None,
            "Test",
            Status::new(true, now),
            BlockStatus::clear(now),
            now,
        )
    }

    #[test]
    fn test_contact_prefers_phone() {
        let now = Utc::now();
        let user = User::with_phone(
            IdPair::new(),
            PhoneIdentity::new("+70000000001"),
            "Test",
            Status::new(true, now),
            BlockStatus::clear(now),
            now,
        );
        assert_eq!(user.contact(), "+70000000001");
    }

    #[test]
    fn test_contact_falls_back_to_email() {
        let user = email_user();
        assert_eq!(user.contact(), "u@test.com");
    }

    #[test]
    fn test_roles_are_a_set() {
        let mut user = email_user();
        assert!(user.add_role(Role::new("Moderator", "Moderator")));
        assert!(!user.add_role(Role::new("Moderator", "Moderator")));
        assert_eq!(user.roles().len(), 1);
        assert!(user.has_role("Moderator"));
        assert!(!user.has_role("Company"));
    }

    #[test]
    fn test_is_active() {
        let mut user = email_user();
        assert!(user.is_active());

        user.block(Some(99), Some("spam".to_string()), Utc::now());
        assert!(!user.is_active());
        assert!(user.is_blocked());

        user.unblock(Utc::now());
        assert!(user.is_active());
    }

    #[test]
    fn test_unconfirmed_is_not_active() {
        let now = Utc::now();
        let mut user = email_user();
        user.confirmed = Status::new(false, now);
        assert!(!user.is_active());
        assert!(!user.is_blocked());

        user.confirm(now);
        assert!(user.is_active());
    }
}
