//! Email/Password Credential Provider
//!
//! Validates email+password+role against the credential store and creates
//! new email/password users.

use std::sync::Arc;

use chrono::Utc;
use platform::crypto::constant_time_eq;
use platform::password::ClearTextPassword;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::{BlockStatus, EmailIdentity, Password, Status};
use crate::domain::entity::user::User;
use crate::error::{IdentityError, IdentityResult};
use crate::infra::crypto::CryptoIdentityService;
use kernel::id::{IdPair, UserId};

/// Email/password user provider
pub struct EmailPasswordUserProvider<U>
where
    U: UserRepository,
{
    users: Arc<U>,
    crypto: Arc<CryptoIdentityService>,
}

impl<U> EmailPasswordUserProvider<U>
where
    U: UserRepository,
{
    pub fn new(users: Arc<U>, crypto: Arc<CryptoIdentityService>) -> Self {
        Self { users, crypto }
    }

    /// Resolve a user by credentials and required role.
    ///
    /// The check order is load-bearing: existence and password failures are
    /// conflated behind one generic message, and confirmation/role state is
    /// only differentiated after the caller has proven the password.
    pub async fn get_user_by_credentials_and_role(
        &self,
        email: &str,
        password: &str,
        role_alias: &str,
    ) -> IdentityResult<User> {
        let user = self
            .users
            .get_email_credentials_user_by_email(email)
            .await?
            .ok_or(IdentityError::EmailNotFound)?;

        let credential = user
            .password
            .as_ref()
            .ok_or(IdentityError::PasswordNotFound)?;

        if user.is_blocked() {
            return Err(IdentityError::AccountBlocked {
                code: user.blocked.code,
                reason: user.blocked.reason.clone(),
            });
        }

        let submitted = ClearTextPassword::new(password)
            .map_err(|_| IdentityError::PasswordNotCorrect)?;
        let salt = self.crypto.salt_bytes(credential.salt())?;
        let hash = self.crypto.hash_password(&submitted, &salt);

        if !constant_time_eq(hash.as_bytes(), credential.hash().as_bytes()) {
            return Err(IdentityError::PasswordNotCorrect);
        }

        if !user.is_confirmed() {
            return Err(IdentityError::AccountNotConfirmed);
        }

        if !user.has_role(role_alias) {
            return Err(IdentityError::RoleNotFound);
        }

        Ok(user)
    }

    /// Create a new email/password user with the given roles.
    ///
    /// The store must insert the user row, the credential row, and the role
    /// links atomically.
    pub async fn create(
        &self,
        email: &str,
        password: &str,
        name: &str,
        role_aliases: &[&str],
        is_active: bool,
    ) -> IdentityResult<UserId> {
        let password = ClearTextPassword::new(password)
            .map_err(|e| IdentityError::Internal(format!("Password rejected: {}", e)))?;
        password
            .validate_strength()
            .map_err(|e| IdentityError::Internal(format!("Password rejected: {}", e)))?;

        let salt = self.crypto.create_salt();
        let hash = self.crypto.hash_password(&password, &salt);
        let salt_str = self.crypto.salt_str(&salt);

        let now = Utc::now();
        let user = User::with_email(
            IdPair::new(),
            EmailIdentity::new(email),
            Some(Password::new(hash, salt_str)),
            name,
            Status::new(is_active, now),
            BlockStatus::clear(now),
            now,
        );

        self.users.create(&user, role_aliases).await
    }
}
