//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use platform::client::{ClientContext, extract_client_ip};
use platform::cookie::{CookieConfig, SameSite, extract_cookie};

use crate::application::config::IdentityAuthConfig;
use crate::application::identity_handler::IdentityHandler;
use crate::domain::constants::role;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::{IdentityError, IdentityResult};
use crate::presentation::dto::{AuthJwtResponse, LoginEmailRequest, RefreshTokenRequest};

/// Cookie carrying the refresh token
pub const REFRESH_COOKIE: &str = "refreshToken";

/// Shared state for identity handlers
pub struct IdentityAppState<U, S>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    pub handler: Arc<IdentityHandler<U, S>>,
    pub config: Arc<IdentityAuthConfig>,
}

impl<U, S> Clone for IdentityAppState<U, S>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            handler: self.handler.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Authenticate (role-pinned endpoints)
// ============================================================================

/// POST /identity/auth/moderator
pub async fn authenticate_moderator<U, S>(
    state: State<IdentityAppState<U, S>>,
    headers: HeaderMap,
    addr: axum::extract::ConnectInfo<std::net::SocketAddr>,
    req: Json<LoginEmailRequest>,
) -> IdentityResult<impl IntoResponse>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    authenticate_by_email(state, headers, addr, req, role::MODERATOR).await
}

/// POST /identity/auth/company
pub async fn authenticate_company<U, S>(
    state: State<IdentityAppState<U, S>>,
    headers: HeaderMap,
    addr: axum::extract::ConnectInfo<std::net::SocketAddr>,
    req: Json<LoginEmailRequest>,
) -> IdentityResult<impl IntoResponse>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    authenticate_by_email(state, headers, addr, req, role::COMPANY).await
}

/// POST /identity/auth/candidate
pub async fn authenticate_candidate<U, S>(
    state: State<IdentityAppState<U, S>>,
    headers: HeaderMap,
    addr: axum::extract::ConnectInfo<std::net::SocketAddr>,
    req: Json<LoginEmailRequest>,
) -> IdentityResult<impl IntoResponse>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    authenticate_by_email(state, headers, addr, req, role::CANDIDATE).await
}

async fn authenticate_by_email<U, S>(
    State(state): State<IdentityAppState<U, S>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
    Json(req): Json<LoginEmailRequest>,
    role: &str,
) -> IdentityResult<impl IntoResponse>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    let client_ip = extract_client_ip(&headers, Some(addr.ip()));
    let client = ClientContext::new(client_ip, req.fingerprint);

    let dto = state
        .handler
        .authenticate_by_email_password_role(
            &req.email,
            &req.password,
            role,
            client.ip,
            &client.fingerprint,
        )
        .await?;

    let cookie = build_refresh_cookie(&state.config, &dto.refresh_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(AuthJwtResponse {
            access_token: dto.access_token,
            expires_in: dto.expires_in,
            user: dto.user,
        }),
    ))
}

// ============================================================================
// Refresh
// ============================================================================

/// POST /identity/refresh
pub async fn refresh_jwt_cookie<U, S>(
    State(state): State<IdentityAppState<U, S>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
    Json(req): Json<RefreshTokenRequest>,
) -> IdentityResult<impl IntoResponse>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    let client_ip = extract_client_ip(&headers, Some(addr.ip()));

    // The cookie value wins over the body token
    let refresh_token = extract_cookie(&headers, REFRESH_COOKIE)
        .or(req.refresh_token)
        .ok_or(IdentityError::UpdateSessionFailed)?;

    let dto = state
        .handler
        .refresh_auth(&refresh_token, client_ip, req.fingerprint.as_deref())
        .await?;

    let cookie = build_refresh_cookie(&state.config, &dto.refresh_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(AuthJwtResponse {
            access_token: dto.access_token,
            expires_in: dto.expires_in,
            user: dto.user,
        }),
    ))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn build_refresh_cookie(config: &IdentityAuthConfig, token: &str) -> String {
    CookieConfig {
        name: REFRESH_COOKIE.to_string(),
        secure: true,
        http_only: true,
        same_site: SameSite::None,
        path: "/".to_string(),
        max_age_secs: Some(i64::from(config.refresh_token_lifetime)),
    }
    .build_set_cookie(token)
}
