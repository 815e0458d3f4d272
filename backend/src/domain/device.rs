//! Tag-bearing device resource.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::sentinels::{
    DEVICE_INVALID, DEVICE_NAME_DUPLICATED, DEVICE_NOT_FOUND, MAX_TAG_REACHED, ResourceSentinels,
    TAG_INVALID,
};
use super::{Error, PatchRejection, Resource, ResourceId, ResourcePatch, TenantId};

/// Maximum number of distinct tags on one device.
pub const TAGS_MAX: u32 = 3;

static NAME_RE: OnceLock<Regex> = OnceLock::new();
static TAG_RE: OnceLock<Regex> = OnceLock::new();

fn name_regex() -> &'static Regex {
    NAME_RE.get_or_init(|| {
        Regex::new("^[a-zA-Z0-9][a-zA-Z0-9_-]{0,62}$")
            .unwrap_or_else(|error| panic!("device name regex failed to compile: {error}"))
    })
}

fn tag_regex() -> &'static Regex {
    TAG_RE.get_or_init(|| {
        Regex::new("^[a-zA-Z0-9_-]{3,255}$")
            .unwrap_or_else(|error| panic!("tag regex failed to compile: {error}"))
    })
}

/// Whether `tag` is a well-formed tag. Shared with firewall rule filters.
pub fn is_valid_tag(tag: &str) -> bool {
    tag_regex().is_match(tag)
}

fn dedupe(tags: &[String]) -> Vec<String> {
    let mut seen = Vec::with_capacity(tags.len());
    for tag in tags {
        if !seen.contains(tag) {
            seen.push(tag.clone());
        }
    }
    seen
}

/// Partial device update. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DevicePatch {
    pub name: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl DevicePatch {
    /// Tags in this patch that fail validation, in request order.
    pub fn invalid_tags(&self) -> Vec<&str> {
        self.tags
            .iter()
            .flatten()
            .map(String::as_str)
            .filter(|tag| !is_valid_tag(tag))
            .collect()
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }
}

impl ResourcePatch for DevicePatch {
    fn check(&self) -> Result<(), PatchRejection> {
        let mut invalid = Vec::new();
        if self.name.as_deref().is_some_and(|name| !name_regex().is_match(name)) {
            invalid.push("name");
        }
        if !self.invalid_tags().is_empty() {
            invalid.push("tags");
        }
        if !invalid.is_empty() {
            return Err(PatchRejection::Invalid(invalid));
        }

        let distinct = self.tags.as_deref().map_or(0, |tags| dedupe(tags).len());
        if distinct > TAGS_MAX as usize {
            return Err(PatchRejection::Limit {
                field: "tags",
                max: TAGS_MAX,
            });
        }
        Ok(())
    }

    fn normalize(&mut self) {
        if let Some(name) = &mut self.name {
            *name = name.to_lowercase();
        }
        if let Some(tags) = &mut self.tags {
            *tags = dedupe(tags);
        }
    }

    fn unique_value(&self, key: &str) -> Option<&str> {
        match key {
            "name" => self.name.as_deref(),
            _ => None,
        }
    }

    fn invalid_cause(&self) -> Option<Error> {
        let tags = self.invalid_tags();
        (!tags.is_empty()).then(|| Error::invalid(TAG_INVALID, tags))
    }
}

/// Device registered under a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    id: ResourceId,
    tenant_id: TenantId,
    name: String,
    tags: Vec<String>,
}

impl Device {
    pub fn new(id: ResourceId, tenant_id: TenantId, name: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            id,
            tenant_id,
            name: name.into(),
            tags,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

impl Resource for Device {
    type Patch = DevicePatch;

    const KIND: &'static str = "device";
    const UNIQUE_KEYS: &'static [&'static str] = &["name"];
    const SENTINELS: ResourceSentinels = ResourceSentinels {
        not_found: DEVICE_NOT_FOUND,
        invalid: DEVICE_INVALID,
        duplicated: DEVICE_NAME_DUPLICATED,
        limit: MAX_TAG_REACHED,
    };

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn tenant_id(&self) -> Option<&TenantId> {
        Some(&self.tenant_id)
    }

    fn unique_value(&self, key: &str) -> Option<&str> {
        match key {
            "name" => Some(self.name.as_str()),
            _ => None,
        }
    }

    fn apply(&mut self, patch: DevicePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
    }
}
