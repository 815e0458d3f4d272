//! Outbound adapters implementing domain ports.
//!
//! - **memory**: in-process resource store, the only persistence adapter.
//! - **hashing**: SHA-256 secret transform.
//!
//! Adapters translate between domain types and their own representation and
//! contain no business rules beyond enforcing uniqueness on write.

pub mod hashing;
pub mod memory;

pub use hashing::Sha256SecretHasher;
pub use memory::InMemoryStore;
