//! Generic read/update/delete service over a [`ResourceStore`].
//!
//! An update runs through fixed stages and stops at the first failing one:
//!
//! 1. existence check (`get`), absence becomes the resource's not-found
//!    sentinel wrapping the store's absence sentinel;
//! 2. structural validation, reporting every invalid field at once, then
//!    cardinality limits;
//! 3. normalisation;
//! 4. conflict check over the resource's unique keys;
//! 5. persist.
//!
//! Nothing is written unless every earlier stage passed.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageQuery};
use tracing::{debug, error, warn};

use super::conflict::{UniqueCandidate, find_conflicts};
use super::ports::{ResourceCommand, ResourceStore, StoreError, UniqueLookup};
use super::{Error, PatchRejection, Resource, ResourceId, ResourcePatch};

/// Result of an update together with the offending field names.
///
/// `fields` lists the invalid fields when the update was rejected as
/// invalid, and the colliding keys when it was rejected as duplicated. It is
/// empty otherwise.
#[derive(Debug, Clone)]
pub struct UpdateOutcome<R> {
    pub fields: Vec<String>,
    pub result: Result<R, Error>,
}

impl<R> UpdateOutcome<R> {
    fn updated(resource: R) -> Self {
        Self {
            fields: Vec::new(),
            result: Ok(resource),
        }
    }

    fn failed(error: Error) -> Self {
        Self {
            fields: Vec::new(),
            result: Err(error),
        }
    }

    fn rejected(fields: Vec<String>, error: Error) -> Self {
        Self {
            fields,
            result: Err(error),
        }
    }

    /// Drop the field list, keeping only the result.
    pub fn into_result(self) -> Result<R, Error> {
        self.result
    }
}

/// Map a store error raised while addressing `id` into a domain error.
///
/// Absence is reported as `R`'s not-found sentinel so callers never see the
/// raw store sentinel at the head of the chain.
pub(crate) fn map_store_error<R: Resource>(id: &ResourceId, err: StoreError) -> Error {
    if err.is_not_found() {
        return Error::not_found(R::SENTINELS.not_found, id.as_str()).wrap(err);
    }
    error!(kind = R::KIND, %id, failure = err.kind(), error = %err, "resource store failed");
    err.into_error()
}

/// Read/update/delete service for one resource type.
pub struct ResourceService<R, S> {
    store: Arc<S>,
    resource: PhantomData<fn() -> R>,
}

impl<R, S> Clone for ResourceService<R, S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            resource: PhantomData,
        }
    }
}

impl<R, S> ResourceService<R, S> {
    /// Create a service backed by `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            resource: PhantomData,
        }
    }

    pub(crate) fn store(&self) -> &S {
        &self.store
    }
}

impl<R, S> ResourceService<R, S>
where
    R: Resource,
    S: ResourceStore<R> + UniqueLookup<R>,
{
    /// List resources in their deterministic order.
    pub async fn list(&self, query: PageQuery) -> Result<Page<R>, Error> {
        self.store.list(query).await.map_err(|err| {
            error!(kind = R::KIND, error = %err, "listing failed");
            err.into_error()
        })
    }

    /// Fetch one resource.
    pub async fn get(&self, id: &ResourceId) -> Result<R, Error> {
        self.store
            .get(id)
            .await
            .map_err(|err| map_store_error::<R>(id, err))
    }

    /// Remove one resource.
    pub async fn delete(&self, id: &ResourceId) -> Result<(), Error> {
        self.store
            .delete(id)
            .await
            .map_err(|err| map_store_error::<R>(id, err))?;
        debug!(kind = R::KIND, %id, "resource deleted");
        Ok(())
    }

    /// Validate, normalise, conflict-check and persist `patch`.
    pub async fn update(&self, id: &ResourceId, mut patch: R::Patch) -> UpdateOutcome<R> {
        let current = match self.get(id).await {
            Ok(current) => current,
            Err(err) => return UpdateOutcome::failed(err),
        };

        if let Err(rejection) = patch.check() {
            return Self::reject(id, &patch, rejection);
        }
        patch.normalize();
        debug!(kind = R::KIND, %id, "patch validated");

        let conflicts = {
            let candidate = UniqueCandidate::from_patch::<R>(id, current.tenant_id(), &patch);
            match find_conflicts::<R, S>(&candidate, self.store.as_ref()).await {
                Ok(conflicts) => conflicts,
                Err(err) => return UpdateOutcome::failed(map_store_error::<R>(id, err)),
            }
        };
        if !conflicts.is_empty() {
            let (fields, values) = conflicts.into_parts();
            warn!(kind = R::KIND, %id, ?fields, "update rejected: duplicated values");
            return UpdateOutcome::rejected(fields, Error::duplicated(R::SENTINELS.duplicated, values));
        }

        match self.store.update(id, patch).await {
            Ok(updated) => {
                debug!(kind = R::KIND, %id, "resource updated");
                UpdateOutcome::updated(updated)
            }
            Err(StoreError::DuplicateKey { key, value }) => {
                warn!(kind = R::KIND, %id, key = %key, "update lost a uniqueness race");
                let err = Error::duplicated(R::SENTINELS.duplicated, [value.clone()]).wrap(
                    StoreError::DuplicateKey {
                        key: key.clone(),
                        value,
                    },
                );
                UpdateOutcome::rejected(vec![key], err)
            }
            Err(err) => UpdateOutcome::failed(map_store_error::<R>(id, err)),
        }
    }

    fn reject(id: &ResourceId, patch: &R::Patch, rejection: PatchRejection) -> UpdateOutcome<R> {
        match rejection {
            PatchRejection::Invalid(fields) => {
                warn!(kind = R::KIND, %id, ?fields, "update rejected: invalid fields");
                let fields: Vec<String> = fields.into_iter().map(str::to_owned).collect();
                let mut err = Error::invalid(R::SENTINELS.invalid, fields.iter().cloned());
                if let Some(cause) = patch.invalid_cause() {
                    err = err.wrap(cause);
                }
                UpdateOutcome::rejected(fields, err)
            }
            PatchRejection::Limit { field, max } => {
                warn!(kind = R::KIND, %id, field, max, "update rejected: limit reached");
                UpdateOutcome::failed(Error::limit(R::SENTINELS.limit, max))
            }
        }
    }
}

#[async_trait]
impl<R, S> ResourceCommand<R> for ResourceService<R, S>
where
    R: Resource,
    S: ResourceStore<R> + UniqueLookup<R>,
{
    async fn list(&self, query: PageQuery) -> Result<Page<R>, Error> {
        Self::list(self, query).await
    }

    async fn get(&self, id: &ResourceId) -> Result<R, Error> {
        Self::get(self, id).await
    }

    async fn update(&self, id: &ResourceId, patch: R::Patch) -> UpdateOutcome<R> {
        Self::update(self, id, patch).await
    }

    async fn delete(&self, id: &ResourceId) -> Result<(), Error> {
        Self::delete(self, id).await
    }
}

#[cfg(test)]
#[path = "update_pipeline_tests.rs"]
mod tests;
