//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on driving ports and remain testable against any store.

use std::sync::Arc;

use crate::domain::ports::{AccountCommand, ResourceCommand};
use crate::domain::{Device, FirewallRule};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountCommand>,
    pub firewall_rules: Arc<dyn ResourceCommand<FirewallRule>>,
    pub devices: Arc<dyn ResourceCommand<Device>>,
}

impl HttpState {
    pub fn new(
        accounts: Arc<dyn AccountCommand>,
        firewall_rules: Arc<dyn ResourceCommand<FirewallRule>>,
        devices: Arc<dyn ResourceCommand<Device>>,
    ) -> Self {
        Self {
            accounts,
            firewall_rules,
            devices,
        }
    }
}
