//! Identity Router

use axum::{Router, routing::post};
use std::sync::Arc;

use crate::application::config::IdentityAuthConfig;
use crate::application::identity_handler::IdentityHandler;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::infra::crypto::CryptoIdentityService;
use crate::infra::postgres::PgIdentityRepository;
use crate::presentation::handlers::{self, IdentityAppState};

/// Create the identity router with the PostgreSQL repository
pub fn identity_router(repo: PgIdentityRepository, config: IdentityAuthConfig) -> Router {
    identity_router_generic(Arc::new(repo.clone()), Arc::new(repo), config)
}

/// Create a generic identity router for any repository implementation
pub fn identity_router_generic<U, S>(users: Arc<U>, sessions: Arc<S>, config: IdentityAuthConfig) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    let config = Arc::new(config);
    let crypto = Arc::new(CryptoIdentityService::new(config.clone()));
    let handler = Arc::new(IdentityHandler::new(users, sessions, crypto, config.clone()));

    let state = IdentityAppState { handler, config };

    Router::new()
        .route("/auth/moderator", post(handlers::authenticate_moderator::<U, S>))
        .route("/auth/company", post(handlers::authenticate_company::<U, S>))
        .route("/auth/candidate", post(handlers::authenticate_candidate::<U, S>))
        .route("/refresh", post(handlers::refresh_jwt_cookie::<U, S>))
        .with_state(state)
}
