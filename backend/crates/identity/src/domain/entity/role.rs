//! Role Entity
//!
//! Reference data: a named role with a unique alias. Seeded idempotently by
//! alias.

use std::hash::{Hash, Hasher};

use kernel::id::RoleId;

/// Platform role
#[derive(Debug, Clone)]
pub struct Role {
    pub id: RoleId,
    /// Display name
    pub name: String,
    /// Unique alias, e.g. "Moderator"
    pub alias: String,
}

impl Role {
    pub fn new(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            id: RoleId::new(),
            name: name.into(),
            alias: alias.into(),
        }
    }
}

// Role membership is a set keyed by alias
impl PartialEq for Role {
    fn eq(&self, other: &Self) -> bool {
        self.alias == other.alias
    }
}

impl Eq for Role {}

impl Hash for Role {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.alias.hash(state);
    }
}
