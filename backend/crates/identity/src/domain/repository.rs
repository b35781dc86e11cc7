//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure
//! layer.

use uuid::Uuid;

use crate::domain::entity::{role::Role, session::Session, user::User};
use crate::error::IdentityResult;
use kernel::id::{RoleId, SessionId, UserId};

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user with its email credential and role links.
    ///
    /// The insert of the user row, the credential row, and the role links
    /// must be atomic: a failure in any of them rolls back all three.
    async fn create(&self, user: &User, role_aliases: &[&str]) -> IdentityResult<UserId>;

    /// Find user by numeric id (with roles and block/confirm state)
    async fn get_by_id(&self, id: i64) -> IdentityResult<Option<User>>;

    /// Find user by external GUID
    async fn get_by_guid(&self, guid: Uuid) -> IdentityResult<Option<User>>;

    /// Find user by email, joining password hash, salt, confirmation and
    /// block state, and role memberships
    async fn get_email_credentials_user_by_email(
        &self,
        email: &str,
    ) -> IdentityResult<Option<User>>;

    /// Replace a user's role links with the given alias set
    async fn update_roles(&self, email: &str, role_aliases: &[&str]) -> IdentityResult<u64>;
}

/// Role repository trait
#[trait_variant::make(RoleRepository: Send)]
pub trait LocalRoleRepository {
    /// Find a role by its unique alias
    async fn get_by_alias(&self, alias: &str) -> IdentityResult<Option<Role>>;

    /// Create a role unless its alias already exists; returns the stored id
    async fn create_if_missing(&self, name: &str, alias: &str) -> IdentityResult<RoleId>;
}

/// Session repository trait
///
/// Session mutations go through an explicit transaction handle so the
/// orchestrator can span delete-old + create-new atomically during refresh.
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    type Tx: Send;

    async fn begin(&self) -> IdentityResult<Self::Tx>;

    async fn commit(&self, tx: Self::Tx) -> IdentityResult<()>;

    async fn rollback(&self, tx: Self::Tx) -> IdentityResult<()>;

    /// Persist a session; returns the assigned id
    async fn create(&self, tx: &mut Self::Tx, session: &Session) -> IdentityResult<SessionId>;

    /// Look up a session by refresh token, matching the fingerprint when one
    /// is supplied. The implementation must lock the row for the duration of
    /// the transaction so a refresh token is consumed at most once under
    /// concurrent replay.
    async fn get_by_refresh_token_fingerprint(
        &self,
        tx: &mut Self::Tx,
        refresh_token: &str,
        fingerprint: Option<&str>,
    ) -> IdentityResult<Option<Session>>;

    /// Delete a session by numeric id; returns the deleted row count
    async fn remove_by_id(&self, tx: &mut Self::Tx, id: i64) -> IdentityResult<u64>;

    /// Delete sessions whose refresh expiry has passed (startup hygiene)
    async fn cleanup_expired(&self) -> IdentityResult<u64>;
}
