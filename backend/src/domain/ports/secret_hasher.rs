//! Port for the one-way secret transform.
//!
//! The transform is deterministic and used solely for equality comparison:
//! two secrets are "the same" iff their digests are equal.

use crate::domain::{PlainSecret, SecretDigest};

#[cfg_attr(test, mockall::automock)]
pub trait SecretHasher: Send + Sync {
    /// Digest a plain secret.
    fn digest(&self, secret: &PlainSecret) -> SecretDigest;
}
