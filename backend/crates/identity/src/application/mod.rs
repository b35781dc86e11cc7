//! Application Layer
//!
//! Use cases and application services.

pub mod claim_provider;
pub mod config;
pub mod credential_provider;
pub mod identity_handler;
pub mod session_service;

// Re-exports
pub use claim_provider::{Claim, get_claims};
pub use config::IdentityAuthConfig;
pub use credential_provider::EmailPasswordUserProvider;
pub use identity_handler::{AuthJwtResponseDto, AuthUserResponse, IdentityHandler};
pub use session_service::SessionService;
