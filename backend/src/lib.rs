//! Multi-tenant resource backend.
//!
//! The [`domain`] owns the error model, resource types, and the update
//! pipelines that validate, de-duplicate, and persist changes. Stores and
//! secret hashing sit behind [`domain::ports`] and are implemented in
//! [`outbound`]; [`inbound::http`] exposes the services over actix-web.

pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod settings;
