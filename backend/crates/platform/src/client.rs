//! Client identification utilities
//!
//! Resolves the caller's IP address and carries the client-supplied
//! fingerprint that sessions are bound to.

use axum::http::HeaderMap;
use std::net::IpAddr;

/// Client context attached to an authentication request
///
/// The fingerprint is an opaque string supplied by the client (device or
/// browser fingerprint); it is stored on the session and must match on
/// refresh when present. An empty string means "no fingerprint".
#[derive(Debug, Clone)]
pub struct ClientContext {
    /// Client IP address (from X-Forwarded-For or direct connection)
    pub ip: Option<IpAddr>,
    /// Client-supplied opaque fingerprint
    pub fingerprint: String,
}

impl ClientContext {
    pub fn new(ip: Option<IpAddr>, fingerprint: impl Into<String>) -> Self {
        Self {
            ip,
            fingerprint: fingerprint.into(),
        }
    }

    /// Fingerprint as an optional match key (None when empty)
    pub fn fingerprint_key(&self) -> Option<&str> {
        if self.fingerprint.is_empty() {
            None
        } else {
            Some(&self.fingerprint)
        }
    }

    /// IP as string (for database storage)
    pub fn ip_string(&self) -> Option<String> {
        self.ip.map(|ip| ip.to_string())
    }
}

/// Extract client IP address from headers
///
/// Checks X-Forwarded-For header first (for reverse proxy setups),
/// then falls back to direct connection IP.
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    // X-Forwarded-For: first IP in the list is the originating client
    if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first_ip) = xff.split(',').next() {
            if let Ok(ip) = first_ip.trim().parse::<IpAddr>() {
                return Some(ip);
            }
        }
    }
    direct_ip
}
