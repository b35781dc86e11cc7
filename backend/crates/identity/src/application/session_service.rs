//! Session Service
//!
//! Session freshness validation, owner resolution, and removal. All session
//! mutations go through the caller's transaction handle so the orchestrator
//! controls commit and rollback.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::entity::{session::Session, user::User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::{IdentityError, IdentityResult};
use kernel::id::SessionId;

/// Session application service
pub struct SessionService<S, U>
where
    S: SessionRepository,
    U: UserRepository,
{
    sessions: Arc<S>,
    users: Arc<U>,
}

impl<S, U> SessionService<S, U>
where
    S: SessionRepository,
    U: UserRepository,
{
    pub fn new(sessions: Arc<S>, users: Arc<U>) -> Self {
        Self { sessions, users }
    }

    /// Persist a session; a non-positive stored id is a failure
    pub async fn create(&self, tx: &mut S::Tx, session: &Session) -> IdentityResult<SessionId> {
        let id = self.sessions.create(tx, session).await?;

        if id.value() <= 0 {
            return Err(IdentityError::SessionCreateFailed);
        }

        Ok(id)
    }

    /// Resolve a live session by refresh token and fingerprint.
    ///
    /// Expiry comparison is strict `<`: a session expiring exactly at
    /// `as_of` is still valid.
    pub async fn get_valid_session(
        &self,
        tx: &mut S::Tx,
        refresh_token: &str,
        fingerprint: Option<&str>,
        as_of: DateTime<Utc>,
    ) -> IdentityResult<Session> {
        let session = self
            .sessions
            .get_by_refresh_token_fingerprint(tx, refresh_token, fingerprint)
            .await?
            .ok_or(IdentityError::SessionNotFound)?;

        if session.refresh_token_expires_at < as_of {
            return Err(IdentityError::RefreshTokenExpired);
        }

        Ok(session)
    }

    /// Delete a consumed session; anything but exactly one removed row fails
    pub async fn remove_session_by_id(&self, tx: &mut S::Tx, id: i64) -> IdentityResult<()> {
        let removed = self.sessions.remove_by_id(tx, id).await?;

        if removed != 1 {
            return Err(IdentityError::SessionNotRemoved);
        }

        Ok(())
    }

    /// Resolve who is refreshing: the live session plus its owning user.
    ///
    /// A blocked owner fails with the blocked code (so the refresh flow can
    /// surface Forbidden); an unconfirmed owner fails as not-active.
    pub async fn get_user_by_session(
        &self,
        tx: &mut S::Tx,
        refresh_token: &str,
        fingerprint: Option<&str>,
        as_of: DateTime<Utc>,
    ) -> IdentityResult<(User, Session)> {
        let session = self
            .get_valid_session(tx, refresh_token, fingerprint, as_of)
            .await?;

        let user = self
            .users
            .get_by_id(session.user_id)
            .await?
            .ok_or(IdentityError::UserNotFoundById)?;

        if user.is_blocked() {
            return Err(IdentityError::AccountBlocked {
                code: user.blocked.code,
                reason: user.blocked.reason.clone(),
            });
        }

        if !user.is_active() {
            return Err(IdentityError::AccountBlockedOrNotConfirmed);
        }

        Ok((user, session))
    }
}
