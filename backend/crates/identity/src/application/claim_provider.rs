//! Claim Provider
//!
//! Projects a user's role memberships into the claim set embedded in the
//! access token. Pure projection: no I/O, no failure path. An empty role
//! set yields an empty claim list, which the token generator will sign.

use crate::domain::entity::user::User;

/// Claim type for role membership
pub const ROLE_CLAIM: &str = "role";

/// One claim embedded in the signed access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    pub claim_type: &'static str,
    pub value: String,
}

impl Claim {
    pub fn new(claim_type: &'static str, value: impl Into<String>) -> Self {
        Self {
            claim_type,
            value: value.into(),
        }
    }
}

/// One role claim per role alias
pub fn get_claims(user: &User) -> Vec<Claim> {
    let mut claims: Vec<Claim> = user
        .roles()
        .iter()
        .map(|role| Claim::new(ROLE_CLAIM, role.alias.clone()))
        .collect();

    // Stable ordering keeps signed tokens reproducible for equal inputs
    claims.sort_by(|a, b| a.value.cmp(&b.value));
    claims
}
