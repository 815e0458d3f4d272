//! Secret values and their one-way digests.
//!
//! Plain secrets are zeroised on drop and never printed; only digests
//! produced by a [`SecretHasher`](super::ports::SecretHasher) are stored or
//! compared.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Minimum password length in characters.
pub const PASSWORD_MIN: usize = 5;
/// Maximum password length in characters.
pub const PASSWORD_MAX: usize = 32;

/// Untransformed secret supplied by a caller.
#[derive(Clone, Deserialize)]
#[serde(from = "String")]
pub struct PlainSecret(Zeroizing<String>);

impl PlainSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Zeroizing::new(secret.into()))
    }

    /// Expose the raw secret to a hasher.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Whether the secret satisfies the password format.
    pub fn is_valid_password(&self) -> bool {
        let length = self.0.chars().count();
        (PASSWORD_MIN..=PASSWORD_MAX).contains(&length)
    }
}

impl From<String> for PlainSecret {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Debug for PlainSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlainSecret(<redacted>)")
    }
}

/// One-way digest of a secret.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretDigest(String);

impl SecretDigest {
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for SecretDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretDigest(<redacted>)")
    }
}
