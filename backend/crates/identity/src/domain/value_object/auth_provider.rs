//! Auth Provider Value Object
//!
//! The origin a session was issued through.

use derive_more::Display;

/// Closed enumeration of authentication origins recorded on a session
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthProvider {
    #[default]
    Email,
    Phone,
    Vk,
    Yandex,
    Apple,
}

impl AuthProvider {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        use AuthProvider::*;
        match self {
            Email => "Email",
            Phone => "Phone",
            Vk => "Vk",
            Yandex => "Yandex",
            Apple => "Apple",
        }
    }

    /// Parse the stored provider name
    #[inline]
    pub fn from_name(name: &str) -> Option<Self> {
        use AuthProvider::*;
        match name {
            "Email" => Some(Email),
            "Phone" => Some(Phone),
            "Vk" => Some(Vk),
            "Yandex" => Some(Yandex),
            "Apple" => Some(Apple),
            _ => None,
        }
    }
}
