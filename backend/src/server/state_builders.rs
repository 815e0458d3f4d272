//! Builders wiring in-memory stores and services into the HTTP state.

use std::sync::Arc;

use actix_web::web;

use tenant_backend::domain::{DeviceService, FirewallRuleService, UserService};
use tenant_backend::inbound::http::state::HttpState;
use tenant_backend::outbound::{InMemoryStore, Sha256SecretHasher};

use super::ServerConfig;

fn build_hasher(config: &ServerConfig) -> Sha256SecretHasher {
    config
        .hash_salt
        .as_deref()
        .map_or_else(Sha256SecretHasher::default, Sha256SecretHasher::with_salt)
}

/// Build the shared handler state. Each resource kind gets its own store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let accounts = UserService::new(
        Arc::new(InMemoryStore::default()),
        Arc::new(build_hasher(config)),
    );
    let firewall_rules = FirewallRuleService::new(Arc::new(InMemoryStore::default()));
    let devices = DeviceService::new(Arc::new(InMemoryStore::default()));

    web::Data::new(HttpState::new(
        Arc::new(accounts),
        Arc::new(firewall_rules),
        Arc::new(devices),
    ))
}
