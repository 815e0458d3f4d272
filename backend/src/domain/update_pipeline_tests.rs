//! Tests for the generic update pipeline.

use std::sync::Arc;

use async_trait::async_trait;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::sentinels::{
    DEVICE_INVALID, DEVICE_NAME_DUPLICATED, DEVICE_NOT_FOUND, FIREWALL_RULE_NOT_FOUND,
    MAX_TAG_REACHED, NO_DOCUMENTS, STORE_FAILURE, TAG_INVALID,
};
use crate::domain::{
    Device, DevicePatch, ErrorCode, ErrorPayload, FirewallAction, FirewallRule, Link, TenantId,
};
use crate::outbound::InMemoryStore;

const TENANT: &str = "00000000-0000-4000-0000-000000000000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup {
    Real,
    Blind,
    Broken,
}

/// Store double delegating to memory with switchable faults.
struct FaultyStore<R> {
    inner: InMemoryStore<R>,
    lookup: Lookup,
    update_error: Option<StoreError>,
}

impl<R> FaultyStore<R> {
    fn new(inner: InMemoryStore<R>) -> Self {
        Self {
            inner,
            lookup: Lookup::Real,
            update_error: None,
        }
    }
}

#[async_trait]
impl<R: Resource> ResourceStore<R> for FaultyStore<R> {
    async fn list(&self, query: PageQuery) -> Result<Page<R>, StoreError> {
        self.inner.list(query).await
    }

    async fn get(&self, id: &ResourceId) -> Result<R, StoreError> {
        self.inner.get(id).await
    }

    async fn update(&self, id: &ResourceId, patch: R::Patch) -> Result<R, StoreError> {
        match &self.update_error {
            Some(err) => Err(err.clone()),
            None => self.inner.update(id, patch).await,
        }
    }

    async fn delete(&self, id: &ResourceId) -> Result<(), StoreError> {
        self.inner.delete(id).await
    }
}

#[async_trait]
impl<R: Resource> UniqueLookup<R> for FaultyStore<R> {
    async fn find_by_key(
        &self,
        tenant: Option<&TenantId>,
        key: &str,
        value: &str,
    ) -> Result<Option<R>, StoreError> {
        match self.lookup {
            Lookup::Real => self.inner.find_by_key(tenant, key, value).await,
            Lookup::Blind => Ok(None),
            Lookup::Broken => Err(StoreError::connection("lookup socket closed")),
        }
    }
}

fn tenant() -> TenantId {
    TenantId::new(TENANT).expect("valid tenant")
}

#[fixture]
async fn devices() -> InMemoryStore<Device> {
    InMemoryStore::with_records([
        Device::new(ResourceId::new("d1"), tenant(), "alpha", vec!["prod".to_owned()]),
        Device::new(ResourceId::new("d2"), tenant(), "beta", Vec::new()),
    ])
    .await
    .expect("seed devices")
}

fn service(store: FaultyStore<Device>) -> (ResourceService<Device, FaultyStore<Device>>, Arc<FaultyStore<Device>>) {
    let store = Arc::new(store);
    (ResourceService::new(Arc::clone(&store)), store)
}

async fn name_of(store: &FaultyStore<Device>, id: &str) -> String {
    store
        .get(&ResourceId::new(id))
        .await
        .expect("device present")
        .name()
        .to_owned()
}

#[rstest]
#[tokio::test]
async fn missing_resource_is_not_found(#[future] devices: InMemoryStore<Device>) {
    let (service, _) = service(FaultyStore::new(devices.await));

    let outcome = service
        .update(&ResourceId::new("nope"), DevicePatch::default().with_name("gamma"))
        .await;

    let err = outcome.result.expect_err("absent");
    assert!(outcome.fields.is_empty());
    assert!(err.is(&DEVICE_NOT_FOUND));
    assert!(err.is(&NO_DOCUMENTS));
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(
        err.payload(),
        Some(&ErrorPayload::NotFound { id: "nope".to_owned() })
    );
}

#[rstest]
#[tokio::test]
async fn invalid_fields_are_all_reported(#[future] devices: InMemoryStore<Device>) {
    let (service, store) = service(FaultyStore::new(devices.await));

    let outcome = service
        .update(
            &ResourceId::new("d1"),
            DevicePatch::default().with_name("-bad").with_tags(["x"]),
        )
        .await;

    assert_eq!(outcome.fields, ["name", "tags"]);
    let err = outcome.result.expect_err("invalid");
    assert!(err.is(&DEVICE_INVALID));
    assert_eq!(
        err.payload(),
        Some(&ErrorPayload::Invalid {
            fields: vec!["name".to_owned(), "tags".to_owned()]
        })
    );
    assert_eq!(name_of(&store, "d1").await, "alpha");
}

#[rstest]
#[tokio::test]
async fn malformed_tags_are_wrapped_beneath_device_invalid(
    #[future] devices: InMemoryStore<Device>,
) {
    let (service, _) = service(FaultyStore::new(devices.await));

    let outcome = service
        .update(
            &ResourceId::new("d1"),
            DevicePatch::default().with_tags(["edge", "x"]),
        )
        .await;

    assert_eq!(outcome.fields, ["tags"]);
    let err = outcome.result.expect_err("invalid tag");
    assert!(err.is(&DEVICE_INVALID));
    assert!(err.is(&TAG_INVALID));
    let tag_payload = err.chain().find_map(|link| match link {
        Link::Domain { sentinel, payload } if *sentinel == TAG_INVALID => payload,
        _ => None,
    });
    assert_eq!(
        tag_payload,
        Some(&ErrorPayload::Invalid {
            fields: vec!["x".to_owned()]
        })
    );
}

#[rstest]
#[tokio::test]
async fn invalid_name_alone_has_no_tag_cause(#[future] devices: InMemoryStore<Device>) {
    let (service, _) = service(FaultyStore::new(devices.await));

    let outcome = service
        .update(&ResourceId::new("d1"), DevicePatch::default().with_name("-bad"))
        .await;

    let err = outcome.result.expect_err("invalid name");
    assert!(err.is(&DEVICE_INVALID));
    assert!(!err.is(&TAG_INVALID));
}

#[rstest]
#[tokio::test]
async fn tag_limit_is_reported_as_limit(#[future] devices: InMemoryStore<Device>) {
    let (service, _) = service(FaultyStore::new(devices.await));

    let outcome = service
        .update(
            &ResourceId::new("d1"),
            DevicePatch::default().with_tags(["one", "two", "three", "four"]),
        )
        .await;

    assert!(outcome.fields.is_empty());
    let err = outcome.result.expect_err("limit");
    assert!(err.is(&MAX_TAG_REACHED));
    assert_eq!(err.code(), ErrorCode::Limit);
    assert_eq!(err.payload(), Some(&ErrorPayload::Limit { max: 3 }));
}

#[rstest]
#[tokio::test]
async fn taken_name_is_duplicated_and_nothing_is_written(
    #[future] devices: InMemoryStore<Device>,
) {
    let (service, store) = service(FaultyStore::new(devices.await));

    let outcome = service
        .update(&ResourceId::new("d1"), DevicePatch::default().with_name("Beta"))
        .await;

    assert_eq!(outcome.fields, ["name"]);
    let err = outcome.result.expect_err("duplicated");
    assert!(err.is(&DEVICE_NAME_DUPLICATED));
    assert_eq!(
        err.payload(),
        Some(&ErrorPayload::Duplicated {
            values: vec!["beta".to_owned()]
        })
    );
    assert_eq!(name_of(&store, "d1").await, "alpha");
}

#[rstest]
#[tokio::test]
async fn keeping_the_current_name_succeeds(#[future] devices: InMemoryStore<Device>) {
    let (service, _) = service(FaultyStore::new(devices.await));

    let outcome = service
        .update(
            &ResourceId::new("d1"),
            DevicePatch::default().with_name("ALPHA").with_tags(["edge", "edge"]),
        )
        .await;

    assert!(outcome.fields.is_empty());
    let updated = outcome.result.expect("update succeeds");
    assert_eq!(updated.name(), "alpha");
    assert_eq!(updated.tags(), ["edge"]);
}

#[rstest]
#[tokio::test]
async fn lost_uniqueness_race_is_duplicated(#[future] devices: InMemoryStore<Device>) {
    let mut store = FaultyStore::new(devices.await);
    store.lookup = Lookup::Blind;
    let (service, store) = service(store);

    let outcome = service
        .update(&ResourceId::new("d1"), DevicePatch::default().with_name("beta"))
        .await;

    assert_eq!(outcome.fields, ["name"]);
    let err = outcome.result.expect_err("store rejects the write");
    assert!(err.is(&DEVICE_NAME_DUPLICATED));
    assert!(err.is(&STORE_FAILURE));
    assert_eq!(err.code(), ErrorCode::Duplicated);
    assert_eq!(
        err.payload(),
        Some(&ErrorPayload::Duplicated {
            values: vec!["beta".to_owned()]
        })
    );
    assert_eq!(
        err.find_source::<StoreError>(),
        Some(&StoreError::duplicate_key("name", "beta"))
    );
    assert_eq!(name_of(&store, "d1").await, "alpha");
}

#[rstest]
#[tokio::test]
async fn lookup_failure_is_a_store_failure(#[future] devices: InMemoryStore<Device>) {
    let mut store = FaultyStore::new(devices.await);
    store.lookup = Lookup::Broken;
    let (service, store) = service(store);

    let outcome = service
        .update(&ResourceId::new("d1"), DevicePatch::default().with_name("gamma"))
        .await;

    let err = outcome.result.expect_err("lookup failed");
    assert!(err.is(&STORE_FAILURE));
    assert_eq!(err.code(), ErrorCode::Store);
    assert_eq!(name_of(&store, "d1").await, "alpha");
}

#[rstest]
#[case(StoreError::timeout("update"))]
#[case(StoreError::query("write conflict"))]
#[tokio::test]
async fn write_failures_keep_their_root_cause(
    #[case] failure: StoreError,
    #[future] devices: InMemoryStore<Device>,
) {
    let mut store = FaultyStore::new(devices.await);
    store.update_error = Some(failure.clone());
    let (service, _) = service(store);

    let outcome = service
        .update(&ResourceId::new("d1"), DevicePatch::default().with_name("gamma"))
        .await;

    let err = outcome.result.expect_err("write failed");
    assert!(err.is(&STORE_FAILURE));
    assert_eq!(err.find_source::<StoreError>(), Some(&failure));
}

#[rstest]
#[tokio::test]
async fn late_absence_on_write_is_not_found(#[future] devices: InMemoryStore<Device>) {
    let mut store = FaultyStore::new(devices.await);
    store.update_error = Some(StoreError::not_found("d1"));
    let (service, _) = service(store);

    let outcome = service
        .update(&ResourceId::new("d1"), DevicePatch::default().with_name("gamma"))
        .await;

    let err = outcome.result.expect_err("raced with a delete");
    assert!(err.is(&DEVICE_NOT_FOUND));
    assert!(err.is(&NO_DOCUMENTS));
}

#[rstest]
#[tokio::test]
async fn delete_then_get_is_not_found(#[future] devices: InMemoryStore<Device>) {
    let (service, _) = service(FaultyStore::new(devices.await));
    let id = ResourceId::new("d2");

    service.delete(&id).await.expect("delete");
    let err = service.get(&id).await.expect_err("gone");
    assert!(err.is(&DEVICE_NOT_FOUND));
    let err = service.delete(&id).await.expect_err("already gone");
    assert!(err.is(&NO_DOCUMENTS));
}

#[rstest]
#[tokio::test]
async fn firewall_rules_list_by_priority() {
    let scope = tenant();
    let store = InMemoryStore::with_records([
        FirewallRule::new(ResourceId::new("r2"), scope, 2, FirewallAction::Allow),
        FirewallRule::new(ResourceId::new("r1"), scope, 1, FirewallAction::Deny),
    ])
    .await
    .expect("seed rules");
    let service = ResourceService::<FirewallRule, _>::new(Arc::new(store));

    let page = service.list(PageQuery::unbounded()).await.expect("list");
    let ids: Vec<&str> = page.items.iter().map(|rule| rule.id().as_str()).collect();
    assert_eq!(ids, ["r1", "r2"]);

    let err = service
        .get(&ResourceId::new("missing"))
        .await
        .expect_err("absent");
    assert!(err.is(&FIREWALL_RULE_NOT_FOUND));
}
