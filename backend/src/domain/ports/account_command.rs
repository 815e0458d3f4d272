//! Driving port for account profile and credential changes.

use async_trait::async_trait;

use crate::domain::{Error, PlainSecret, ResourceId, UpdateOutcome, User, UserData};

#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Replace the profile fields of account `id`.
    async fn update_data(&self, id: &ResourceId, data: UserData) -> UpdateOutcome<User>;

    /// Change the password of account `id`, verifying `current` first.
    async fn update_password(
        &self,
        id: &ResourceId,
        current: &PlainSecret,
        new: &PlainSecret,
    ) -> Result<(), Error>;
}
