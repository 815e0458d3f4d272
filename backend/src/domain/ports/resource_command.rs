//! Driving port for reading and mutating one resource type.
//!
//! HTTP handlers depend on this trait rather than on a concrete service so
//! they can be exercised against any store.

use async_trait::async_trait;
use pagination::{Page, PageQuery};

use crate::domain::{Error, Resource, ResourceId, UpdateOutcome};

#[async_trait]
pub trait ResourceCommand<R: Resource>: Send + Sync {
    /// List resources in their deterministic order.
    async fn list(&self, query: PageQuery) -> Result<Page<R>, Error>;

    async fn get(&self, id: &ResourceId) -> Result<R, Error>;

    /// Run the update pipeline.
    async fn update(&self, id: &ResourceId, patch: R::Patch) -> UpdateOutcome<R>;

    async fn delete(&self, id: &ResourceId) -> Result<(), Error>;
}
