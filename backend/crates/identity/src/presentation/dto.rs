//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::application::identity_handler::AuthUserResponse;

// ============================================================================
// Authenticate
// ============================================================================

/// Email/password login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginEmailRequest {
    pub email: String,
    pub password: String,
    /// Client-supplied opaque fingerprint
    #[serde(default)]
    pub fingerprint: String,
}

/// Auth response without the refresh token (it travels in the cookie)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthJwtResponse {
    pub access_token: String,
    /// Access-token lifetime in seconds
    pub expires_in: u32,
    pub user: AuthUserResponse,
}

// ============================================================================
// Refresh
// ============================================================================

/// Refresh request; the cookie value overrides the body token when present
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub fingerprint: Option<String>,
}
