//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, PBKDF2, Base64, constant-time compare)
//! - Clear-text password handling (zeroization, normalization, policy)
//! - Client identification (IP, fingerprint)
//! - Cookie management

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod password;
