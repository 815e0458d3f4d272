//! Firewall rule resource.
//!
//! Rules are tenant scoped and evaluated in ascending `priority`. Source IP,
//! username and hostname matchers are regular expressions; a filter selects
//! devices either by hostname or by tags, never both.

use std::cmp::Ordering;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::device::is_valid_tag;
use super::sentinels::{
    FIREWALL_RULE_DUPLICATED, FIREWALL_RULE_INVALID, FIREWALL_RULE_NOT_FOUND, LIMIT_REACHED,
    ResourceSentinels,
};
use super::{PatchRejection, Resource, ResourceId, ResourcePatch, TenantId};

/// Verdict applied when a rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirewallAction {
    Allow,
    Deny,
}

impl FirewallAction {
    /// Parse a case-insensitive action name.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("allow") {
            Some(Self::Allow)
        } else if raw.eq_ignore_ascii_case("deny") {
            Some(Self::Deny)
        } else {
            None
        }
    }
}

/// Device selector of a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirewallFilter {
    pub hostname: String,
    pub tags: Vec<String>,
}

/// Full replacement of a rule's mutable fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FirewallRulePatch {
    pub priority: i64,
    pub action: String,
    #[serde(default)]
    pub active: bool,
    pub source_ip: String,
    pub username: String,
    #[serde(default)]
    pub filter: FirewallFilter,
}

fn compiles(pattern: &str) -> bool {
    Regex::new(pattern).is_ok()
}

impl ResourcePatch for FirewallRulePatch {
    fn check(&self) -> Result<(), PatchRejection> {
        let filter = &self.filter;
        let checks = [
            ("priority", self.priority >= 1),
            ("action", FirewallAction::parse(&self.action).is_some()),
            ("source_ip", compiles(&self.source_ip)),
            ("username", compiles(&self.username)),
            (
                "hostname",
                filter.hostname.is_empty() || compiles(&filter.hostname),
            ),
            ("tags", filter.tags.iter().all(|tag| is_valid_tag(tag))),
            (
                "filter",
                filter.hostname.is_empty() || filter.tags.is_empty(),
            ),
        ];
        let invalid: Vec<&'static str> = checks
            .into_iter()
            .filter_map(|(field, valid)| (!valid).then_some(field))
            .collect();
        if invalid.is_empty() {
            Ok(())
        } else {
            Err(PatchRejection::Invalid(invalid))
        }
    }

    fn normalize(&mut self) {
        self.action = self.action.to_lowercase();
    }

    fn unique_value(&self, _key: &str) -> Option<&str> {
        None
    }
}

/// Firewall rule under a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FirewallRule {
    id: ResourceId,
    tenant_id: TenantId,
    priority: i64,
    action: FirewallAction,
    active: bool,
    source_ip: String,
    username: String,
    filter: FirewallFilter,
}

impl FirewallRule {
    /// Build an active rule matching every source and user.
    pub fn new(id: ResourceId, tenant_id: TenantId, priority: i64, action: FirewallAction) -> Self {
        Self {
            id,
            tenant_id,
            priority,
            action,
            active: true,
            source_ip: ".*".to_owned(),
            username: ".*".to_owned(),
            filter: FirewallFilter::default(),
        }
    }

    #[must_use]
    pub fn with_source_ip(mut self, source_ip: impl Into<String>) -> Self {
        self.source_ip = source_ip.into();
        self
    }

    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: FirewallFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn priority(&self) -> i64 {
        self.priority
    }

    pub fn action(&self) -> FirewallAction {
        self.action
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn source_ip(&self) -> &str {
        &self.source_ip
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn filter(&self) -> &FirewallFilter {
        &self.filter
    }
}

impl Resource for FirewallRule {
    type Patch = FirewallRulePatch;

    const KIND: &'static str = "firewall rule";
    const UNIQUE_KEYS: &'static [&'static str] = &[];
    const SENTINELS: ResourceSentinels = ResourceSentinels {
        not_found: FIREWALL_RULE_NOT_FOUND,
        invalid: FIREWALL_RULE_INVALID,
        duplicated: FIREWALL_RULE_DUPLICATED,
        limit: LIMIT_REACHED,
    };

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn tenant_id(&self) -> Option<&TenantId> {
        Some(&self.tenant_id)
    }

    fn unique_value(&self, _key: &str) -> Option<&str> {
        None
    }

    fn list_order(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.id.cmp(&other.id))
    }

    fn apply(&mut self, patch: FirewallRulePatch) {
        self.priority = patch.priority;
        if let Some(action) = FirewallAction::parse(&patch.action) {
            self.action = action;
        }
        self.active = patch.active;
        self.source_ip = patch.source_ip;
        self.username = patch.username;
        self.filter = patch.filter;
    }
}
