//! Catalog of named sentinel errors.
//!
//! Sentinels are `const` values: they are initialised at compile time, never
//! mutated, and safe to share across concurrent requests. Use them as the
//! innermost link of a richer [`Error`](super::Error) and as comparison
//! targets for [`Error::is`](super::Error::is).

use super::error::{ErrorCode, SERVICE_LAYER, STORE_LAYER, Sentinel};

/// Store-level absence: no record matched the requested identifier.
pub const NO_DOCUMENTS: Sentinel =
    Sentinel::new("no_documents", "no documents", STORE_LAYER, ErrorCode::NotFound);

pub const NOT_FOUND: Sentinel =
    Sentinel::new("not_found", "not found", SERVICE_LAYER, ErrorCode::NotFound);
pub const BAD_REQUEST: Sentinel =
    Sentinel::new("bad_request", "bad request", SERVICE_LAYER, ErrorCode::Invalid);
pub const LIMIT_REACHED: Sentinel =
    Sentinel::new("limit_reached", "limit reached", SERVICE_LAYER, ErrorCode::Limit);
pub const PAYMENT_REQUIRED: Sentinel = Sentinel::new(
    "payment_required",
    "payment required",
    SERVICE_LAYER,
    ErrorCode::Payment,
);
/// Catch-all for store failures other than absence.
pub const STORE_FAILURE: Sentinel = Sentinel::new(
    "store_failure",
    "store operation failed",
    SERVICE_LAYER,
    ErrorCode::Store,
);

pub const USER_NOT_FOUND: Sentinel =
    Sentinel::new("user_not_found", "user not found", SERVICE_LAYER, ErrorCode::NotFound);
pub const USER_INVALID: Sentinel =
    Sentinel::new("user_invalid", "user invalid", SERVICE_LAYER, ErrorCode::Invalid);
pub const USER_DUPLICATED: Sentinel = Sentinel::new(
    "user_duplicated",
    "user duplicated",
    SERVICE_LAYER,
    ErrorCode::Duplicated,
);

pub const DEVICE_NOT_FOUND: Sentinel = Sentinel::new(
    "device_not_found",
    "device not found",
    SERVICE_LAYER,
    ErrorCode::NotFound,
);
pub const DEVICE_INVALID: Sentinel =
    Sentinel::new("device_invalid", "device invalid", SERVICE_LAYER, ErrorCode::Invalid);
pub const DEVICE_NAME_DUPLICATED: Sentinel = Sentinel::new(
    "device_name_duplicated",
    "device name duplicated",
    SERVICE_LAYER,
    ErrorCode::Duplicated,
);
pub const MAX_TAG_REACHED: Sentinel =
    Sentinel::new("max_tag_reached", "tag limit reached", SERVICE_LAYER, ErrorCode::Limit);
/// Carries the malformed tag values as its `Invalid` payload.
pub const TAG_INVALID: Sentinel =
    Sentinel::new("tag_invalid", "tag invalid", SERVICE_LAYER, ErrorCode::Invalid);

pub const FIREWALL_RULE_NOT_FOUND: Sentinel = Sentinel::new(
    "firewall_rule_not_found",
    "firewall rule not found",
    SERVICE_LAYER,
    ErrorCode::NotFound,
);
pub const FIREWALL_RULE_INVALID: Sentinel = Sentinel::new(
    "firewall_rule_invalid",
    "firewall rule invalid",
    SERVICE_LAYER,
    ErrorCode::Invalid,
);
pub const FIREWALL_RULE_DUPLICATED: Sentinel = Sentinel::new(
    "firewall_rule_duplicated",
    "firewall rule duplicated",
    SERVICE_LAYER,
    ErrorCode::Duplicated,
);

/// Every service-layer sentinel.
pub const SERVICE_SENTINELS: &[Sentinel] = &[
    NOT_FOUND,
    BAD_REQUEST,
    LIMIT_REACHED,
    PAYMENT_REQUIRED,
    STORE_FAILURE,
    USER_NOT_FOUND,
    USER_INVALID,
    USER_DUPLICATED,
    DEVICE_NOT_FOUND,
    DEVICE_INVALID,
    DEVICE_NAME_DUPLICATED,
    MAX_TAG_REACHED,
    TAG_INVALID,
    FIREWALL_RULE_NOT_FOUND,
    FIREWALL_RULE_INVALID,
    FIREWALL_RULE_DUPLICATED,
];

/// Sentinels a resource type raises from the generic update pipeline.
#[derive(Debug, Clone, Copy)]
pub struct ResourceSentinels {
    pub not_found: Sentinel,
    pub invalid: Sentinel,
    pub duplicated: Sentinel,
    pub limit: Sentinel,
}
