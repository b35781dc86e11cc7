//! Infrastructure Layer
//!
//! Database implementations, cryptography, and startup seeding.

pub mod crypto;
pub mod postgres;
pub mod seed;

pub use crypto::CryptoIdentityService;
pub use postgres::PgIdentityRepository;
pub use seed::IdentitySeed;
