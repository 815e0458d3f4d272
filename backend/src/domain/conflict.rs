//! Uniqueness conflict detection.
//!
//! A conflict is a proposed unique value that already belongs to a
//! *different* resource of the same type and tenant. A resource keeping its
//! own current value never conflicts with itself.

use tracing::debug;

use super::ports::{StoreError, UniqueLookup};
use super::{Resource, ResourceId, ResourcePatch, TenantId};

/// Proposed unique values of one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueCandidate<'a> {
    id: &'a ResourceId,
    tenant: Option<&'a TenantId>,
    values: Vec<(&'static str, &'a str)>,
}

impl<'a> UniqueCandidate<'a> {
    pub fn new(id: &'a ResourceId, tenant: Option<&'a TenantId>) -> Self {
        Self {
            id,
            tenant,
            values: Vec::new(),
        }
    }

    /// Candidate for `patch` applied to the resource `id`, with values taken
    /// in `R::UNIQUE_KEYS` order. Keys the patch leaves unset are skipped.
    pub fn from_patch<R: Resource>(
        id: &'a ResourceId,
        tenant: Option<&'a TenantId>,
        patch: &'a R::Patch,
    ) -> Self {
        R::UNIQUE_KEYS
            .iter()
            .filter_map(|key| patch.unique_value(key).map(|value| (*key, value)))
            .fold(Self::new(id, tenant), |candidate, (key, value)| {
                candidate.with_value(key, value)
            })
    }

    /// Add a proposed value for `key`.
    #[must_use]
    pub fn with_value(mut self, key: &'static str, value: &'a str) -> Self {
        self.values.push((key, value));
        self
    }
}

/// Colliding keys and their values, as parallel lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conflicts {
    fields: Vec<String>,
    values: Vec<String>,
}

impl Conflicts {
    fn record(&mut self, field: &str, value: &str) {
        self.fields.push(field.to_owned());
        self.values.push(value.to_owned());
    }

    /// No collisions: safe to persist.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Names of the colliding keys.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Colliding values, aligned with [`Conflicts::fields`].
    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.fields, self.values)
    }
}

/// Check every proposed value of `candidate` against existing resources.
///
/// All keys are checked; two keys colliding with two different resources
/// are reported together. Lookup failures are propagated, never read as
/// "no conflict".
pub async fn find_conflicts<R, L>(
    candidate: &UniqueCandidate<'_>,
    lookup: &L,
) -> Result<Conflicts, StoreError>
where
    R: Resource,
    L: UniqueLookup<R> + ?Sized,
{
    let mut conflicts = Conflicts::default();
    for (key, value) in &candidate.values {
        let existing = lookup.find_by_key(candidate.tenant, key, value).await?;
        match existing {
            Some(holder) if holder.id() != candidate.id => {
                debug!(kind = R::KIND, key = %key, holder = %holder.id(), "unique value already taken");
                conflicts.record(key, value);
            }
            _ => {}
        }
    }
    Ok(conflicts)
}
