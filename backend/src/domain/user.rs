//! Account resource.
//!
//! Accounts are globally scoped: `username` and `email` are unique across the
//! whole deployment, not per tenant.

use std::cmp::Ordering;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::sentinels::{
    LIMIT_REACHED, ResourceSentinels, USER_DUPLICATED, USER_INVALID, USER_NOT_FOUND,
};
use super::{PatchRejection, Resource, ResourceId, ResourcePatch, SecretDigest, TenantId};

/// Maximum display name length in characters.
pub const NAME_MAX: usize = 64;
/// Maximum email length in characters.
pub const EMAIL_MAX: usize = 254;

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        Regex::new("^[a-zA-Z0-9._@-]{3,32}$")
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Mutable profile fields of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    pub name: String,
    pub username: String,
    pub email: String,
}

impl UserData {
    pub fn new(
        name: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
            email: email.into(),
        }
    }

    /// Names of every field that fails validation, in declaration order.
    pub fn invalid_fields(&self) -> Vec<&'static str> {
        let name_length = self.name.chars().count();
        let checks = [
            (
                "name",
                !self.name.trim().is_empty() && name_length <= NAME_MAX,
            ),
            ("username", username_regex().is_match(&self.username)),
            (
                "email",
                self.email.chars().count() <= EMAIL_MAX && email_regex().is_match(&self.email),
            ),
        ];
        checks
            .into_iter()
            .filter_map(|(field, valid)| (!valid).then_some(field))
            .collect()
    }

    fn normalize(&mut self) {
        self.username = self.username.trim().to_lowercase();
        self.email = self.email.trim().to_lowercase();
    }
}

/// Change applied to an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserPatch {
    /// Replace the profile fields.
    Data(UserData),
    /// Replace the stored password digest.
    Password(SecretDigest),
}

impl ResourcePatch for UserPatch {
    fn check(&self) -> Result<(), PatchRejection> {
        match self {
            Self::Data(data) => {
                let invalid = data.invalid_fields();
                if invalid.is_empty() {
                    Ok(())
                } else {
                    Err(PatchRejection::Invalid(invalid))
                }
            }
            Self::Password(_) => Ok(()),
        }
    }

    fn normalize(&mut self) {
        if let Self::Data(data) = self {
            data.normalize();
        }
    }

    fn unique_value(&self, key: &str) -> Option<&str> {
        match (self, key) {
            (Self::Data(data), "username") => Some(data.username.as_str()),
            (Self::Data(data), "email") => Some(data.email.as_str()),
            _ => None,
        }
    }
}

/// Account record.
///
/// The password digest is never serialised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id: ResourceId,
    #[serde(flatten)]
    data: UserData,
    #[serde(skip_serializing)]
    password: SecretDigest,
    created_at: DateTime<Utc>,
}

impl User {
    /// Build an account created now.
    pub fn new(id: ResourceId, data: UserData, password: SecretDigest) -> Self {
        Self {
            id,
            data,
            password,
            created_at: Utc::now(),
        }
    }

    /// Override the creation timestamp.
    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn data(&self) -> &UserData {
        &self.data
    }

    pub fn password(&self) -> &SecretDigest {
        &self.password
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Resource for User {
    type Patch = UserPatch;

    const KIND: &'static str = "user";
    const UNIQUE_KEYS: &'static [&'static str] = &["username", "email"];
    const SENTINELS: ResourceSentinels = ResourceSentinels {
        not_found: USER_NOT_FOUND,
        invalid: USER_INVALID,
        duplicated: USER_DUPLICATED,
        limit: LIMIT_REACHED,
    };

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn tenant_id(&self) -> Option<&TenantId> {
        None
    }

    fn unique_value(&self, key: &str) -> Option<&str> {
        match key {
            "username" => Some(self.data.username.as_str()),
            "email" => Some(self.data.email.as_str()),
            _ => None,
        }
    }

    fn list_order(&self, other: &Self) -> Ordering {
        self.created_at
            .cmp(&other.created_at)
            .then_with(|| self.id.cmp(&other.id))
    }

    fn apply(&mut self, patch: UserPatch) {
        match patch {
            UserPatch::Data(data) => self.data = data,
            UserPatch::Password(digest) => self.password = digest,
        }
    }
}
