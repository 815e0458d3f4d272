//! Domain core: error model, resources and the update pipelines.
//!
//! Purpose: keep every tenant-facing mutation behind one validated,
//! conflict-checked path and report failures as structured [`Error`]
//! chains that callers can match by sentinel.
//!
//! Public surface:
//! - [`Error`], [`ErrorCode`], [`Sentinel`] and the [`sentinels`] catalog.
//! - [`Resource`] / [`ResourcePatch`] with the concrete [`User`],
//!   [`Device`] and [`FirewallRule`] types.
//! - [`ResourceService`] and [`UserService`], returning [`UpdateOutcome`]
//!   from updates.

pub mod conflict;
pub mod device;
pub mod error;
pub mod firewall;
pub mod ports;
pub mod resource;
pub mod secret;
pub mod sentinels;
pub mod update_pipeline;
pub mod user;
pub mod user_service;

pub use self::conflict::{Conflicts, UniqueCandidate, find_conflicts};
pub use self::device::{Device, DevicePatch, TAGS_MAX};
pub use self::error::{
    Error, ErrorCode, ErrorPayload, Link, SERVICE_LAYER, STORE_LAYER, Sentinel,
};
pub use self::firewall::{FirewallAction, FirewallFilter, FirewallRule, FirewallRulePatch};
pub use self::resource::{
    PatchRejection, Resource, ResourceId, ResourcePatch, TenantId, TenantIdError,
};
pub use self::secret::{PASSWORD_MAX, PASSWORD_MIN, PlainSecret, SecretDigest};
pub use self::update_pipeline::{ResourceService, UpdateOutcome};
pub use self::user::{User, UserData, UserPatch};
pub use self::user_service::UserService;

/// Service over tenant-scoped firewall rules.
pub type FirewallRuleService<S> = ResourceService<FirewallRule, S>;

/// Service over tenant-scoped devices.
pub type DeviceService<S> = ResourceService<Device, S>;
