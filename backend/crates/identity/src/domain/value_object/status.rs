//! Status Value Objects
//!
//! Boolean state with its change timestamp; the blocked variant also carries
//! an operator-facing reason.

use chrono::{DateTime, Utc};

/// A boolean status together with when it last changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub value: bool,
    pub changed_at: DateTime<Utc>,
}

impl Status {
    pub fn new(value: bool, changed_at: DateTime<Utc>) -> Self {
        Self { value, changed_at }
    }
}

/// Block status with optional reason code and text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockStatus {
    pub value: bool,
    pub changed_at: DateTime<Utc>,
    pub code: Option<i32>,
    pub reason: Option<String>,
}

impl BlockStatus {
    pub fn new(
        value: bool,
        changed_at: DateTime<Utc>,
        code: Option<i32>,
        reason: Option<String>,
    ) -> Self {
        Self {
            value,
            changed_at,
            code,
            reason,
        }
    }

    /// An unblocked status with no reason
    pub fn clear(changed_at: DateTime<Utc>) -> Self {
        Self::new(false, changed_at, None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_block_status() {
        let status = BlockStatus::clear(Utc::now());
        assert!(!status.value);
        assert!(status.code.is_none());
        assert!(status.reason.is_none());
    }
}
