//! Port abstraction for resource persistence adapters and their errors.
//!
//! Every store operation is assumed to be scoped to the right tenant by its
//! caller. Adapters surface exactly one absence variant,
//! [`StoreError::NotFound`], distinct from every other failure mode.
//!
//! Adapters are also the authoritative guard for uniqueness: the service
//! layer's conflict check is a fast pre-check, and two concurrent updates can
//! both pass it. `update` must therefore reject a write that would violate a
//! unique key with [`StoreError::DuplicateKey`].

use async_trait::async_trait;
use pagination::{Page, PageQuery};

use crate::domain::sentinels::{NO_DOCUMENTS, STORE_FAILURE};
use crate::domain::{Error, Resource, ResourceId, TenantId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by resource store adapters.
    pub enum StoreError {
        /// No record matched the identifier.
        NotFound { id: String } => "no documents matched id {id}",
        /// The write would violate a unique key.
        DuplicateKey { key: String, value: String } =>
            "unique constraint violated on {key}: {value}",
        /// Store connection could not be established.
        Connection { message: String } => "store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "store query failed: {message}",
        /// The caller's deadline elapsed before the store answered.
        Timeout { operation: String } => "store operation timed out: {operation}",
    }
}

impl StoreError {
    /// Whether this is the store's absence sentinel.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Convert into a domain error.
    ///
    /// Absence becomes [`NO_DOCUMENTS`]; every other failure becomes
    /// [`STORE_FAILURE`] wrapping the original error.
    pub fn into_error(self) -> Error {
        match self {
            Self::NotFound { id } => Error::not_found(NO_DOCUMENTS, id),
            other => Error::new(STORE_FAILURE).wrap_source(other),
        }
    }
}

impl From<StoreError> for Error {
    fn from(value: StoreError) -> Self {
        value.into_error()
    }
}

/// Read/update/delete contract for one resource type.
#[async_trait]
pub trait ResourceStore<R: Resource>: Send + Sync {
    /// List matching records in the resource's deterministic order.
    ///
    /// Never fails on an empty result. `total_count` is the full match count
    /// regardless of the window.
    async fn list(&self, query: PageQuery) -> Result<Page<R>, StoreError>;

    /// Fetch one record.
    async fn get(&self, id: &ResourceId) -> Result<R, StoreError>;

    /// Apply `patch` atomically and return the updated record.
    async fn update(&self, id: &ResourceId, patch: R::Patch) -> Result<R, StoreError>;

    /// Remove a record. Deleting an absent id yields `NotFound`.
    async fn delete(&self, id: &ResourceId) -> Result<(), StoreError>;
}

/// Lookup of records by unique key, used by the conflict resolver.
#[async_trait]
pub trait UniqueLookup<R: Resource>: Send + Sync {
    /// Find the record holding `value` for `key` inside `tenant`.
    async fn find_by_key(
        &self,
        tenant: Option<&TenantId>,
        key: &str,
        value: &str,
    ) -> Result<Option<R>, StoreError>;
}
