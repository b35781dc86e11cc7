//! Phone Identity Value Object

use chrono::{DateTime, Utc};

/// Phone identity channel with its confirmation state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneIdentity {
    pub value: String,
    pub confirmed_status: bool,
    pub confirmed_changed_at: Option<DateTime<Utc>>,
    pub confirmation_code: Option<String>,
    pub confirmation_code_created_at: Option<DateTime<Utc>>,
    pub confirmation_code_expires_at: Option<DateTime<Utc>>,
}

impl PhoneIdentity {
    /// A fresh, unconfirmed phone identity
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
}
