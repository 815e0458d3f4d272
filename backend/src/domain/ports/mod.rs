//! Domain ports for the hexagonal boundary.
//!
//! Driven ports, implemented by outbound adapters:
//! - [`ResourceStore`] and [`UniqueLookup`]: persistence, one instantiation
//!   per resource type.
//! - [`SecretHasher`]: the one-way transform used to compare secrets.
//!
//! Driving ports, implemented by domain services and consumed by inbound
//! adapters:
//! - [`ResourceCommand`]: list/get/update/delete for one resource type.
//! - [`AccountCommand`]: profile and password changes.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod resource_command;
mod resource_store;
mod secret_hasher;

pub use account_command::AccountCommand;
pub use resource_command::ResourceCommand;
pub use resource_store::{ResourceStore, StoreError, UniqueLookup};
#[cfg(test)]
pub use secret_hasher::MockSecretHasher;
pub use secret_hasher::SecretHasher;
