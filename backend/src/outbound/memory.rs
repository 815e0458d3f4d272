//! In-process resource store.
//!
//! Records live in a `BTreeMap` keyed by id behind a `tokio` read/write lock.
//! Updates are all-or-nothing: the patch is applied to a copy, uniqueness is
//! re-checked under the write lock, and only then is the copy committed. This
//! makes the store the authoritative uniqueness guard even when two updates
//! race past the service's conflict check.

use std::collections::BTreeMap;

use async_trait::async_trait;
use pagination::{Page, PageQuery};
use tokio::sync::RwLock;

use crate::domain::ports::{ResourceStore, StoreError, UniqueLookup};
use crate::domain::{Resource, ResourceId, TenantId};

/// Resource store holding every record in memory.
#[derive(Debug)]
pub struct InMemoryStore<R> {
    records: RwLock<BTreeMap<ResourceId, R>>,
}

impl<R> Default for InMemoryStore<R> {
    fn default() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
        }
    }
}

fn same_scope<R: Resource>(record: &R, tenant: Option<&TenantId>) -> bool {
    record.tenant_id() == tenant
}

impl<R: Resource> InMemoryStore<R> {
    /// Store seeded with `records`.
    pub async fn with_records(records: impl IntoIterator<Item = R>) -> Result<Self, StoreError> {
        let store = Self::default();
        for record in records {
            store.insert(record).await?;
        }
        Ok(store)
    }

    /// Add a record, enforcing uniqueness within its tenant.
    ///
    /// Inserting an id that already exists replaces the record.
    pub async fn insert(&self, record: R) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        Self::ensure_unique(&records, &record)?;
        records.insert(record.id().clone(), record);
        Ok(())
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn ensure_unique(records: &BTreeMap<ResourceId, R>, candidate: &R) -> Result<(), StoreError> {
        for key in R::UNIQUE_KEYS {
            let Some(value) = candidate.unique_value(key) else {
                continue;
            };
            let taken = records.values().any(|other| {
                other.id() != candidate.id()
                    && same_scope(other, candidate.tenant_id())
                    && other.unique_value(key) == Some(value)
            });
            if taken {
                return Err(StoreError::duplicate_key(*key, value));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<R: Resource> ResourceStore<R> for InMemoryStore<R> {
    async fn list(&self, query: PageQuery) -> Result<Page<R>, StoreError> {
        let mut ordered: Vec<R> = self.records.read().await.values().cloned().collect();
        ordered.sort_by(|a, b| a.list_order(b).then_with(|| a.id().cmp(b.id())));
        Ok(Page::from_ordered(ordered, query))
    }

    async fn get(&self, id: &ResourceId) -> Result<R, StoreError> {
        self.records
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(id.as_str()))
    }

    async fn update(&self, id: &ResourceId, patch: R::Patch) -> Result<R, StoreError> {
        let mut records = self.records.write().await;
        let mut updated = records
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(id.as_str()))?;
        updated.apply(patch);
        Self::ensure_unique(&records, &updated)?;
        records.insert(id.clone(), updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: &ResourceId) -> Result<(), StoreError> {
        self.records
            .write()
            .await
            .remove(id)
            .map(drop)
            .ok_or_else(|| StoreError::not_found(id.as_str()))
    }
}

#[async_trait]
impl<R: Resource> UniqueLookup<R> for InMemoryStore<R> {
    async fn find_by_key(
        &self,
        tenant: Option<&TenantId>,
        key: &str,
        value: &str,
    ) -> Result<Option<R>, StoreError> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .find(|record| same_scope(*record, tenant) && record.unique_value(key) == Some(value))
            .cloned())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
