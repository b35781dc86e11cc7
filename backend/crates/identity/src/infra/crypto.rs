//! Identity Cryptography
//!
//! Salt generation, password key derivation, JWT access-token signing, and
//! refresh-token generation. Deterministic given valid inputs; a missing
//! signing key is a startup-time concern, not a runtime result.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use platform::crypto::{from_base64, pbkdf2_sha256, random_bytes, to_base64};
use platform::password::ClearTextPassword;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::claim_provider::{Claim, ROLE_CLAIM};
use crate::application::config::IdentityAuthConfig;
use crate::error::{IdentityError, IdentityResult};

/// PBKDF2-HMAC-SHA256 work factor
const PBKDF2_ITERATIONS: u32 = 100_000;

/// Derived key length in bytes
const DERIVED_KEY_LEN: usize = 256 / 8;

/// Salt length in bytes
const SALT_LEN: usize = 128 / 8;

/// Payload of a signed access token
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Issuer (the configured url)
    pub iss: String,
    /// Audience (the configured url)
    pub aud: String,
    /// Expiration timestamp (seconds since epoch)
    pub exp: i64,
    /// Role aliases granted to the principal
    pub roles: Vec<String>,
}

/// Crypto service for identity flows
pub struct CryptoIdentityService {
    config: Arc<IdentityAuthConfig>,
}

impl CryptoIdentityService {
    pub fn new(config: Arc<IdentityAuthConfig>) -> Self {
        Self { config }
    }

    /// Generate a fresh random salt
    pub fn create_salt(&self) -> Vec<u8> {
        random_bytes(SALT_LEN)
    }

    /// Printable encoding of a salt for storage
    pub fn salt_str(&self, salt: &[u8]) -> String {
        to_base64(salt)
    }

    /// Decode a stored salt; a malformed value is a data-integrity problem
    pub fn salt_bytes(&self, salt: &str) -> IdentityResult<Vec<u8>> {
        from_base64(salt).map_err(|e| IdentityError::Internal(format!("Invalid stored salt: {}", e)))
    }

    /// Derive the stored password hash
    ///
    /// Deterministic for equal inputs (verification recomputes and
    /// compares); not reversible.
    pub fn hash_password(&self, password: &ClearTextPassword, salt: &[u8]) -> String {
        to_base64(&pbkdf2_sha256(
            password.as_bytes(),
            salt,
            PBKDF2_ITERATIONS,
            DERIVED_KEY_LEN,
        ))
    }

    /// Sign a time-bounded access token embedding the claim set
    pub fn generate_access_token(
        &self,
        claims: &[Claim],
        expires_at: DateTime<Utc>,
    ) -> IdentityResult<String> {
        let payload = AccessTokenClaims {
            iss: self.config.url.clone(),
            aud: self.config.url.clone(),
            exp: expires_at.timestamp(),
            roles: claims
                .iter()
                .filter(|claim| claim.claim_type == ROLE_CLAIM)
                .map(|claim| claim.value.clone())
                .collect(),
        };

        let key = EncodingKey::from_secret(self.config.crypto_key.as_bytes());

        encode(&Header::new(Algorithm::HS256), &payload, &key)
            .map_err(|e| IdentityError::Internal(format!("Access token signing failed: {}", e)))
    }

    /// Opaque unguessable refresh token
    pub fn generate_refresh_token(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
