//! Identity Error Types
//!
//! This module provides identity-specific error variants that integrate
//! with the unified `kernel::error::AppError` system. Internal variants
//! carry the closed numeric code set; the three public variants are the
//! only ones whose messages reach callers.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Identity-specific result type alias
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Closed numeric code set for identity failures (300X, 3500)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum IdentityErrorCode {
    EmailNotFound = 3001,
    PasswordNotFound = 3002,
    PasswordNotCorrect = 3003,
    /// Shared with the unconfirmed-account case during refresh
    AccountNotConfirmed = 3004,
    RoleNotFound = 3005,
    SessionCreateFailed = 3006,
    SessionNotFound = 3007,
    SessionNotRemoved = 3008,
    UserNotFoundById = 3009,
    RefreshTokenExpired = 3010,
    AccountBlocked = 3500,
}

impl IdentityErrorCode {
    #[inline]
    pub const fn value(&self) -> i32 {
        *self as i32
    }
}

/// Identity-specific error variants
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Email lookup missed. The message deliberately does not reveal which
    /// half of the credentials was wrong.
    #[error("Credentials data is not valid or not found")]
    EmailNotFound,

    /// User exists but carries no password credential (data integrity bug)
    #[error("Credentials data was not loaded")]
    PasswordNotFound,

    /// Recomputed hash did not match the stored one
    #[error("Credentials data is not valid")]
    PasswordNotCorrect,

    /// Account exists, password matched, but it was never confirmed
    #[error("Account is not confirmed")]
    AccountNotConfirmed,

    /// Account is blocked; reason/code are for operator visibility only
    #[error("Account was blocked: {reason:?}. Code: {code:?}")]
    AccountBlocked {
        code: Option<i32>,
        reason: Option<String>,
    },

    /// User does not hold the requested role
    #[error("Insufficient permissions")]
    RoleNotFound,

    /// Store returned a non-positive id on session insert
    #[error("Create session failed in db")]
    SessionCreateFailed,

    /// No session for the presented refresh token (+fingerprint)
    #[error("Session was not found")]
    SessionNotFound,

    /// Session found but its refresh token has expired
    #[error("Current session is not valid. Refresh token was expired")]
    RefreshTokenExpired,

    /// Delete-by-id removed a row count other than one
    #[error("Old session was not removed")]
    SessionNotRemoved,

    /// Session resolved but its owning user row is gone
    #[error("User was not found by active session")]
    UserNotFoundById,

    /// Session owner found but not confirmed
    #[error("User found but not active")]
    AccountBlockedOrNotConfirmed,

    // ------------------------------------------------------------------
    // Normalized public errors (the only messages callers ever see)
    // ------------------------------------------------------------------
    /// Public authenticate failure; the precise reason lives in the logs
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Public refresh failure; the precise reason lives in the logs
    #[error("Update data session failed")]
    UpdateSessionFailed,

    /// Public blocked-account failure during refresh
    #[error("Account was blocked")]
    BlockedAccount,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IdentityError {
    /// Get the domain code for this error, when it has one
    pub fn code(&self) -> Option<IdentityErrorCode> {
        use IdentityError::*;
        match self {
            EmailNotFound => Some(IdentityErrorCode::EmailNotFound),
            PasswordNotFound => Some(IdentityErrorCode::PasswordNotFound),
            PasswordNotCorrect => Some(IdentityErrorCode::PasswordNotCorrect),
            AccountNotConfirmed | AccountBlockedOrNotConfirmed => {
                Some(IdentityErrorCode::AccountNotConfirmed)
            }
            AccountBlocked { .. } => Some(IdentityErrorCode::AccountBlocked),
            RoleNotFound => Some(IdentityErrorCode::RoleNotFound),
            SessionCreateFailed => Some(IdentityErrorCode::SessionCreateFailed),
            SessionNotFound => Some(IdentityErrorCode::SessionNotFound),
            RefreshTokenExpired => Some(IdentityErrorCode::RefreshTokenExpired),
            SessionNotRemoved => Some(IdentityErrorCode::SessionNotRemoved),
            UserNotFoundById => Some(IdentityErrorCode::UserNotFoundById),
            AuthenticationFailed | UpdateSessionFailed | BlockedAccount | Database(_)
            | Internal(_) => None,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        use IdentityError::*;
        match self {
            EmailNotFound | PasswordNotCorrect | AuthenticationFailed | UpdateSessionFailed => {
                ErrorKind::Unauthorized
            }
            AccountNotConfirmed | AccountBlocked { .. } | RoleNotFound | BlockedAccount => {
                ErrorKind::Forbidden
            }
            PasswordNotFound
            | SessionCreateFailed
            | SessionNotFound
            | RefreshTokenExpired
            | SessionNotRemoved
            | UserNotFoundById
            | AccountBlockedOrNotConfirmed
            | Database(_)
            | Internal(_) => ErrorKind::Failure,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Convert to AppError, carrying the numeric code when present
    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string());
        match self.code() {
            Some(code) => err.with_code(code.value()),
            None => err,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            IdentityError::Database(e) => {
                tracing::error!(error = %e, "Identity database error");
            }
            IdentityError::Internal(msg) => {
                tracing::error!(message = %msg, "Identity internal error");
            }
            IdentityError::AuthenticationFailed => {
                tracing::warn!("Authentication attempt failed");
            }
            IdentityError::BlockedAccount => {
                tracing::warn!("Blocked account attempted refresh");
            }
            _ => {
                tracing::debug!(error = %self, "Identity error");
            }
        }
    }
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for IdentityError {
    fn from(err: AppError) -> Self {
        IdentityError::Internal(err.to_string())
    }
}
