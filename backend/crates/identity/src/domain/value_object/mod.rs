//! Value Object Module

pub mod auth_provider;
pub mod email_identity;
pub mod password;
pub mod phone_identity;
pub mod status;

pub use auth_provider::AuthProvider;
pub use email_identity::EmailIdentity;
pub use password::Password;
pub use phone_identity::PhoneIdentity;
pub use status::{BlockStatus, Status};
