//! Startup Seeding
//!
//! Creates the closed role set idempotently by alias, then the moderator
//! test account when it does not exist yet.

use std::sync::Arc;

use crate::application::credential_provider::EmailPasswordUserProvider;
use crate::domain::constants::role;
use crate::domain::repository::{RoleRepository, UserRepository};
use crate::error::IdentityResult;
use crate::infra::crypto::CryptoIdentityService;

/// Seed account settings (from environment in production)
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub moderator_email: String,
    pub moderator_password: String,
}

/// Identity database seeder
pub struct IdentitySeed<U, R>
where
    U: UserRepository,
    R: RoleRepository,
{
    users: Arc<U>,
    roles: Arc<R>,
    provider: EmailPasswordUserProvider<U>,
}

impl<U, R> IdentitySeed<U, R>
where
    U: UserRepository,
    R: RoleRepository,
{
    pub fn new(users: Arc<U>, roles: Arc<R>, crypto: Arc<CryptoIdentityService>) -> Self {
        Self {
            provider: EmailPasswordUserProvider::new(users.clone(), crypto),
            users,
            roles,
        }
    }

    /// Seed roles and the moderator test account
    pub async fn seed_data(&self, config: &SeedConfig) -> IdentityResult<()> {
        self.seed_roles().await?;

        if self
            .users
            .get_email_credentials_user_by_email(&config.moderator_email)
            .await?
            .is_some()
        {
            tracing::debug!(
                email = %config.moderator_email,
                "Seed moderator account already exists"
            );
            return Ok(());
        }

        let user_roles = [role::MODERATOR];
        let id = self
            .provider
            .create(
                &config.moderator_email,
                &config.moderator_password,
                "Moderator",
                &user_roles,
                true,
            )
            .await?;

        tracing::info!(user_id = id.value(), "Seeded moderator test account");

        Ok(())
    }

    /// Create every known role unless its alias already exists
    pub async fn seed_roles(&self) -> IdentityResult<()> {
        for alias in role::ALL {
            self.roles.create_if_missing(alias, alias).await?;
        }
        Ok(())
    }
}
