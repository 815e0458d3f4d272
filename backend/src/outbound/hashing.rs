//! SHA-256 secret transform.
//!
//! Digests are the lower-case hex encoding of `SHA-256(salt || secret)`.
//! With no salt configured the digest is the plain SHA-256 of the secret.

use sha2::{Digest, Sha256};

use crate::domain::ports::SecretHasher;
use crate::domain::{PlainSecret, SecretDigest};

/// [`SecretHasher`] backed by SHA-256.
#[derive(Debug, Clone, Default)]
pub struct Sha256SecretHasher {
    salt: Option<String>,
}

impl Sha256SecretHasher {
    /// Hasher prefixing every secret with `salt`.
    pub fn with_salt(salt: impl Into<String>) -> Self {
        Self {
            salt: Some(salt.into()),
        }
    }
}

impl SecretHasher for Sha256SecretHasher {
    fn digest(&self, secret: &PlainSecret) -> SecretDigest {
        let mut hasher = Sha256::new();
        if let Some(salt) = &self.salt {
            hasher.update(salt.as_bytes());
        }
        hasher.update(secret.expose().as_bytes());
        SecretDigest::new(hex::encode(hasher.finalize()))
    }
}
