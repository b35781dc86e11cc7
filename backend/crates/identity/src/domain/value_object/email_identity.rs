//! Email Identity Value Object

use chrono::{DateTime, Utc};

/// Email identity channel with its confirmation state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailIdentity {
    pub value: String,
    pub confirmed_status: bool,
    pub confirmed_changed_at: Option<DateTime<Utc>>,
    pub confirmation_code: Option<String>,
    pub confirmation_code_created_at: Option<DateTime<Utc>>,
    pub confirmation_code_expires_at: Option<DateTime<Utc>>,
}

impl EmailIdentity {
    /// A fresh, unconfirmed email identity
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            confirmed_status: false,
            confirmed_changed_at: None,
            confirmation_code: None,
            confirmation_code_created_at: None,
            confirmation_code_expires_at: None,
        }
    }

    pub fn with_confirmation(
        value: impl Into<String>,
        confirmed_status: bool,
        confirmed_changed_at: Option<DateTime<Utc>>,
        confirmation_code: Option<String>,
        confirmation_code_created_at: Option<DateTime<Utc>>,
        confirmation_code_expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            value: value.into(),
            confirmed_status,
            confirmed_changed_at,
            confirmation_code,
            confirmation_code_created_at,
            confirmation_code_expires_at,
        }
    }
}
