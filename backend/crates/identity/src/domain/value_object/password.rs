//! Password Credential Value Object

use std::fmt;

/// Stored salted password credential
///
/// Both fields are printable encodings (base64); verification recomputes the
/// derivation from the submitted password and the stored salt.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
    salt: String,
}

impl Password {
    pub fn new(hash: impl Into<String>, salt: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            salt: salt.into(),
        }
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[HASH]")
            .field("salt", &"[SALT]")
            .finish()
    }
}
