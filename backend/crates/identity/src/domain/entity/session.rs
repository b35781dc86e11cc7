//! Session Entity
//!
//! One issued access/refresh token pair. A session is single-use for
//! refresh: once consumed it is deleted and replaced, never updated in
//! place.

use std::net::IpAddr;

use chrono::{DateTime, Utc};
use kernel::id::SessionId;

use crate::domain::value_object::AuthProvider;

/// Issued session
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    /// Owning user (numeric id)
    pub user_id: i64,
    pub provider: AuthProvider,
    pub created_at: DateTime<Utc>,
    /// Signed JWT access token
    pub access_token: String,
    /// Opaque refresh token, unique across all sessions
    pub refresh_token: String,
    pub refresh_token_expires_at: DateTime<Utc>,
    /// Client fingerprint; empty when the client supplied none
    pub fingerprint: String,
    pub ip: Option<IpAddr>,
}

impl Session {
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        user_id: i64,
        provider: AuthProvider,
        created_at: DateTime<Utc>,
        refresh_token_expires_at: DateTime<Utc>,
        fingerprint: impl Into<String>,
        ip: Option<IpAddr>,
    ) -> Self {
        Self {
            id: SessionId::new(),
            user_id,
            provider,
            created_at,
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            refresh_token_expires_at,
            fingerprint: fingerprint.into(),
            ip,
        }
    }
}
