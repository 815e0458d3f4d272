//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use super::state::HttpState;
use crate::domain::ports::SecretHasher;
use crate::domain::{
    Device, DeviceService, FirewallAction, FirewallFilter, FirewallRule, FirewallRuleService,
    PlainSecret, ResourceId, TenantId, User, UserData, UserService,
};
use crate::outbound::{InMemoryStore, Sha256SecretHasher};

/// Tenant owning every seeded rule and device.
pub const TENANT: &str = "00000000-0000-4000-0000-000000000000";
/// Password of both seeded accounts.
pub const PASSWORD: &str = "old-secret";

fn tenant() -> TenantId {
    TenantId::new(TENANT).expect("valid tenant")
}

fn tag_filter() -> FirewallFilter {
    FirewallFilter {
        hostname: String::new(),
        tags: vec!["tag-1".to_owned()],
    }
}

/// State backed by in-memory stores holding accounts `1` (alice) and `2`
/// (bob), firewall rules with priorities 1 to 4, and devices `d1` (alpha)
/// and `d2` (beta).
pub async fn seeded_state() -> HttpState {
    let hasher = Sha256SecretHasher::default();
    let digest = hasher.digest(&PlainSecret::new(PASSWORD));
    let users = InMemoryStore::with_records([
        User::new(ResourceId::new("1"), UserData::new("Alice", "alice", "a@x.com"), digest.clone()),
        User::new(ResourceId::new("2"), UserData::new("Bob", "bob", "b@x.com"), digest),
    ])
    .await
    .expect("seed users");

    let scope = tenant();
    let rules = InMemoryStore::with_records([
        FirewallRule::new(ResourceId::new("6504b7bd9b6c4a63a9ccc053"), scope, 1, FirewallAction::Allow)
            .with_filter(tag_filter()),
        FirewallRule::new(ResourceId::new("e92f4a5d3e1a4f7b8b2b6e9a"), scope, 2, FirewallAction::Allow)
            .with_source_ip("192.168.1.10")
            .with_username("john.doe")
            .with_filter(tag_filter()),
        FirewallRule::new(ResourceId::new("78c96f0a2e5b4dca8d78f00c"), scope, 3, FirewallAction::Allow)
            .with_source_ip("10.0.0.0/24")
            .with_username("admin"),
        FirewallRule::new(ResourceId::new("3fd759a1ecb64ec5a07c8c0f"), scope, 4, FirewallAction::Deny)
            .with_source_ip("172.16.0.0/16")
            .with_filter(tag_filter()),
    ])
    .await
    .expect("seed rules");

    let devices = InMemoryStore::with_records([
        Device::new(ResourceId::new("d1"), scope, "alpha", vec!["prod".to_owned()]),
        Device::new(ResourceId::new("d2"), scope, "beta", Vec::new()),
    ])
    .await
    .expect("seed devices");

    HttpState::new(
        Arc::new(UserService::new(Arc::new(users), Arc::new(hasher))),
        Arc::new(FirewallRuleService::new(Arc::new(rules))),
        Arc::new(DeviceService::new(Arc::new(devices))),
    )
}

/// App exposing every handler under `/api/v1` over `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .service(web::scope("/api/v1").configure(super::configure))
}
