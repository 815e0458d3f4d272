//! Generic resource model shared by every store-backed type.
//!
//! A [`Resource`] is read, updated, and deleted exclusively through a
//! [`ResourceStore`](super::ports::ResourceStore). Its [`ResourcePatch`]
//! describes the mutable sub-set of fields and knows how to validate and
//! canonicalise itself before any uniqueness check runs.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Error;
use super::sentinels::ResourceSentinels;

/// Opaque resource identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for ResourceId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ResourceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Validation errors returned by [`TenantId::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TenantIdError {
    #[error("tenant id must be a valid UUID")]
    InvalidId,
}

/// Tenant scope of a resource, stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TenantId(Uuid);

impl TenantId {
    /// Validate and construct a [`TenantId`].
    pub fn new(id: impl AsRef<str>) -> Result<Self, TenantIdError> {
        Uuid::parse_str(id.as_ref().trim())
            .map(Self)
            .map_err(|_| TenantIdError::InvalidId)
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl From<TenantId> for String {
    fn from(value: TenantId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for TenantId {
    type Error = TenantIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Why a patch cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchRejection {
    /// Every field that failed structural validation, in declaration order.
    Invalid(Vec<&'static str>),
    /// A cardinality limit was exceeded.
    Limit { field: &'static str, max: u32 },
}

/// Mutable sub-set of a resource.
pub trait ResourcePatch: Clone + fmt::Debug + Send + Sync + 'static {
    /// Validate the patch structurally.
    ///
    /// Implementations must collect every invalid field rather than stop at
    /// the first one. Limits are only reported once every field is valid.
    fn check(&self) -> Result<(), PatchRejection>;

    /// Canonicalise values in place (case folding, de-duplication).
    fn normalize(&mut self);

    /// Proposed value for a unique key, if the patch sets it.
    fn unique_value(&self, key: &str) -> Option<&str>;

    /// Finer-grained cause attached beneath the resource's invalid error.
    fn invalid_cause(&self) -> Option<Error> {
        None
    }
}

/// Store-backed resource.
pub trait Resource: Clone + fmt::Debug + Send + Sync + 'static {
    type Patch: ResourcePatch;

    /// Singular resource name used in logs.
    const KIND: &'static str;
    /// Keys whose values are unique per tenant, in conflict-report order.
    const UNIQUE_KEYS: &'static [&'static str];
    /// Sentinels raised by the generic update pipeline.
    const SENTINELS: ResourceSentinels;

    fn id(&self) -> &ResourceId;

    /// Tenant scope; `None` for globally scoped resources.
    fn tenant_id(&self) -> Option<&TenantId>;

    /// Current value of a unique key.
    fn unique_value(&self, key: &str) -> Option<&str>;

    /// Deterministic listing order. Implementations must break ties by id so
    /// the ordering is total.
    fn list_order(&self, other: &Self) -> Ordering {
        self.id().cmp(other.id())
    }

    /// Apply a checked, normalised patch.
    fn apply(&mut self, patch: Self::Patch);
}
