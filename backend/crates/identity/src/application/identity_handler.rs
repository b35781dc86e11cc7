//! Identity Handler
//!
//! Orchestrates credential verification, claim projection, token issuance,
//! and session persistence into the two end-to-end operations:
//! authenticate by email/password/role, and refresh session.
//!
//! Failures surface as one of three normalized public errors; the precise
//! internal reason (with its numeric code) is only written to the logs.

use std::net::IpAddr;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::application::claim_provider;
use crate::application::config::IdentityAuthConfig;
use crate::application::credential_provider::EmailPasswordUserProvider;
use crate::application::session_service::SessionService;
use crate::domain::entity::{session::Session, user::User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::AuthProvider;
use crate::error::{IdentityError, IdentityErrorCode, IdentityResult};
use crate::infra::crypto::CryptoIdentityService;

/// User summary embedded in an auth response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUserResponse {
    pub guid_id: Uuid,
    pub name: String,
    pub contact: String,
}

/// Full auth result of the application layer.
///
/// The refresh token never reaches a JSON body; the presentation layer
/// moves it into the HTTP-only cookie and strips it from the response.
#[derive(Debug, Clone)]
pub struct AuthJwtResponseDto {
    pub access_token: String,
    pub refresh_token: String,
    /// Reported access-token lifetime in seconds
    pub expires_in: u32,
    pub user: AuthUserResponse,
}

/// Identity orchestrator
pub struct IdentityHandler<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    provider: EmailPasswordUserProvider<U>,
    sessions: SessionService<S, U>,
    users: Arc<U>,
    session_repo: Arc<S>,
    crypto: Arc<CryptoIdentityService>,
    config: Arc<IdentityAuthConfig>,
}

impl<U, S> IdentityHandler<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(
        users: Arc<U>,
        sessions: Arc<S>,
        crypto: Arc<CryptoIdentityService>,
        config: Arc<IdentityAuthConfig>,
    ) -> Self {
        Self {
            provider: EmailPasswordUserProvider::new(users.clone(), crypto.clone()),
            sessions: SessionService::new(sessions.clone(), users.clone()),
            users,
            session_repo: sessions,
            crypto,
            config,
        }
    }

    /// Authenticate by email, password, and required role.
    ///
    /// Every internal failure is logged with its code and surfaced as the
    /// single normalized `AuthenticationFailed` to prevent account
    /// enumeration.
    pub async fn authenticate_by_email_password_role(
        &self,
        email: &str,
        password: &str,
        role: &str,
        ip: Option<IpAddr>,
        fingerprint: &str,
    ) -> IdentityResult<AuthJwtResponseDto> {
        let user = match self
            .provider
            .get_user_by_credentials_and_role(email, password, role)
            .await
        {
            Ok(user) => user,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    code = err.code().map(|c| c.value()),
                    email = %email,
                    "Auth error"
                );
                return Err(IdentityError::AuthenticationFailed);
            }
        };

        let mut tx = self.session_repo.begin().await?;

        match self
            .create_jwt_session_by_user(&mut tx, &user, ip, fingerprint)
            .await
        {
            Ok(dto) => {
                self.session_repo.commit(tx).await?;
                Ok(dto)
            }
            Err(err) => {
                let _ = self.session_repo.rollback(tx).await;
                Err(err)
            }
        }
    }

    /// Refresh a session: consume the presented refresh token exactly once
    /// and issue a replacement session.
    ///
    /// The whole rotation runs in one transaction; every failure path rolls
    /// back so an old session is never deleted without its replacement being
    /// created, and vice versa.
    pub async fn refresh_auth(
        &self,
        refresh_token: &str,
        ip: Option<IpAddr>,
        fingerprint: Option<&str>,
    ) -> IdentityResult<AuthJwtResponseDto> {
        let mut tx = self.session_repo.begin().await?;
        let now = Utc::now();

        let (user, session) = match self
            .sessions
            .get_user_by_session(&mut tx, refresh_token, fingerprint, now)
            .await
        {
            Ok(pair) => pair,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    code = err.code().map(|c| c.value()),
                    fingerprint = fingerprint,
                    "Session was not found"
                );

                let _ = self.session_repo.rollback(tx).await;

                if err.code() == Some(IdentityErrorCode::AccountBlocked) {
                    return Err(IdentityError::BlockedAccount);
                }
                return Err(IdentityError::UpdateSessionFailed);
            }
        };

        if let Err(err) = self
            .sessions
            .remove_session_by_id(&mut tx, session.id.value())
            .await
        {
            tracing::error!(
                error = %err,
                session_id = session.id.value(),
                "Removing by session id failed"
            );

            let _ = self.session_repo.rollback(tx).await;
            return Err(IdentityError::UpdateSessionFailed);
        }

        match self
            .create_jwt_session_by_user(&mut tx, &user, ip, fingerprint.unwrap_or_default())
            .await
        {
            Ok(dto) => {
                self.session_repo.commit(tx).await?;
                Ok(dto)
            }
            Err(err) => {
                let _ = self.session_repo.rollback(tx).await;
                Err(err)
            }
        }
    }

    /// Resolve a user by external GUID (cabinet endpoints)
    pub async fn get_user_by_guid(&self, guid: Uuid) -> IdentityResult<Option<User>> {
        self.users.get_by_guid(guid).await
    }

    /// Shared by login and refresh: issue a new session for a resolved user.
    ///
    /// The access token is signed for now + access lifetime, matching the
    /// `expires_in` reported to the client; the refresh token lives for
    /// now + refresh lifetime.
    async fn create_jwt_session_by_user(
        &self,
        tx: &mut S::Tx,
        user: &User,
        ip: Option<IpAddr>,
        fingerprint: &str,
    ) -> IdentityResult<AuthJwtResponseDto> {
        let created_at = Utc::now();
        let refresh_expires_at = created_at + self.config.refresh_lifetime();
        let access_expires_at = created_at + self.config.access_lifetime();

        let claims = claim_provider::get_claims(user);
        let access_token = self.crypto.generate_access_token(&claims, access_expires_at)?;
        let refresh_token = self.crypto.generate_refresh_token();

        let session = Session::new(
            access_token.clone(),
            refresh_token.clone(),
            user.id.value(),
            AuthProvider::Email,
            created_at,
            refresh_expires_at,
            fingerprint,
            ip,
        );

        if let Err(err) = self.sessions.create(tx, &session).await {
            tracing::warn!(
                error = %err,
                code = err.code().map(|c| c.value()),
                user_id = user.id.value(),
                "Session create error"
            );
            return Err(IdentityError::AuthenticationFailed);
        }

        Ok(AuthJwtResponseDto {
            access_token,
            refresh_token,
            expires_in: self.config.access_token_lifetime,
            user: AuthUserResponse {
                guid_id: user.id.guid(),
                name: user.name.clone(),
                contact: user.contact(),
            },
        })
    }
}
