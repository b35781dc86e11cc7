//! Application Configuration
//!
//! Configuration for the identity application layer.

use platform::crypto::{random_bytes, to_base64};

/// Identity auth configuration
///
/// `crypto_key` must come from a secret store in production; the random-key
/// constructors exist for development and tests only.
#[derive(Debug, Clone)]
pub struct IdentityAuthConfig {
    /// Access token lifetime in seconds (also the reported `expiresIn`)
    pub access_token_lifetime: u32,
    /// Refresh token lifetime in seconds
    pub refresh_token_lifetime: u32,
    /// Used as JWT issuer and audience
    pub url: String,
    /// Symmetric signing secret
    pub crypto_key: String,
}

impl Default for IdentityAuthConfig {
    fn default() -> Self {
        Self {
            access_token_lifetime: 3600,               // 1 hour
            refresh_token_lifetime: 30 * 24 * 3600,    // 30 days
            url: "http://localhost:31114".to_string(),
            crypto_key: String::new(),
        }
    }
}

impl IdentityAuthConfig {
    /// Create config with a random 512-bit signing key (for development)
    pub fn with_random_key() -> Self {
        Self {
            crypto_key: to_base64(&random_bytes(512 / 8)),
            ..Default::default()
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_key()
    }

    /// Refresh lifetime as chrono duration
    pub fn refresh_lifetime(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::from(self.refresh_token_lifetime))
    }

    /// Access lifetime as chrono duration
    pub fn access_lifetime(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::from(self.access_token_lifetime))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IdentityAuthConfig::default();
        assert_eq!(config.access_token_lifetime, 3600);
        assert_eq!(config.refresh_token_lifetime, 30 * 24 * 3600);
        assert!(config.crypto_key.is_empty());
    }

    #[test]
    fn test_with_random_key() {
        let a = IdentityAuthConfig::with_random_key();
        let b = IdentityAuthConfig::with_random_key();
        assert!(!a.crypto_key.is_empty());
        assert_ne!(a.crypto_key, b.crypto_key);
    }

    #[test]
    fn test_lifetimes() {
        let config = IdentityAuthConfig::default();
        assert_eq!(config.access_lifetime().num_seconds(), 3600);
        assert_eq!(config.refresh_lifetime().num_seconds(), 30 * 24 * 3600);
    }
}
