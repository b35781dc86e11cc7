//! Identity Backend Module
//!
//! User identity, authentication, and session/refresh-token management for
//! a multi-role platform (moderators, companies, candidates).
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Credential provider, session service, orchestrator
//! - `infra/` - Database implementations, cryptography, seeding
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Security Model
//! - Passwords stored as salted PBKDF2-HMAC-SHA256 hashes, verified by
//!   recompute with constant-time comparison
//! - Signed HS256 access tokens carrying role claims
//! - One-time-use refresh tokens, rotated inside a database transaction
//!   with row locking against concurrent replay
//! - Sessions bound to a client fingerprint and IP
//! - Failure messages normalized at the boundary to prevent account
//!   enumeration

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::IdentityAuthConfig;
pub use application::identity_handler::IdentityHandler;
pub use error::{IdentityError, IdentityErrorCode, IdentityResult};
pub use infra::postgres::PgIdentityRepository;
pub use infra::seed::{IdentitySeed, SeedConfig};
pub use presentation::router::identity_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgIdentityRepository as IdentityStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}
