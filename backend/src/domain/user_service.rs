//! Account service: profile updates and credential changes.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageQuery};
use tracing::{debug, warn};

use super::ports::{AccountCommand, ResourceStore, SecretHasher, UniqueLookup};
use super::sentinels::{USER_DUPLICATED, USER_INVALID};
use super::update_pipeline::{ResourceService, UpdateOutcome, map_store_error};
use super::{Error, PlainSecret, Resource, ResourceId, User, UserData, UserPatch};

/// Field name reported for the current password.
pub const CURRENT_PASSWORD: &str = "current_password";
/// Field name reported for the new password.
pub const NEW_PASSWORD: &str = "new_password";

/// Account service.
pub struct UserService<S, H> {
    resources: ResourceService<User, S>,
    hasher: Arc<H>,
}

impl<S, H> Clone for UserService<S, H> {
    fn clone(&self) -> Self {
        Self {
            resources: self.resources.clone(),
            hasher: Arc::clone(&self.hasher),
        }
    }
}

impl<S, H> UserService<S, H> {
    pub fn new(store: Arc<S>, hasher: Arc<H>) -> Self {
        Self {
            resources: ResourceService::new(store),
            hasher,
        }
    }
}

impl<S, H> UserService<S, H>
where
    S: ResourceStore<User> + UniqueLookup<User>,
    H: SecretHasher,
{
    pub async fn list(&self, query: PageQuery) -> Result<Page<User>, Error> {
        self.resources.list(query).await
    }

    pub async fn get(&self, id: &ResourceId) -> Result<User, Error> {
        self.resources.get(id).await
    }

    pub async fn delete(&self, id: &ResourceId) -> Result<(), Error> {
        self.resources.delete(id).await
    }

    /// Replace an account's profile fields.
    ///
    /// See [`UpdateOutcome`] for the meaning of the returned field list.
    pub async fn update_data(&self, id: &ResourceId, data: UserData) -> UpdateOutcome<User> {
        self.resources.update(id, UserPatch::Data(data)).await
    }

    /// Change an account's password.
    ///
    /// Both secrets are format-checked first and every invalid one is named.
    /// A new secret whose digest equals the current one is rejected as
    /// duplicated before the account is even fetched. The stored digest must
    /// match the digest of `current`.
    pub async fn update_password(
        &self,
        id: &ResourceId,
        current: &PlainSecret,
        new: &PlainSecret,
    ) -> Result<(), Error> {
        let invalid: Vec<&str> = [(CURRENT_PASSWORD, current), (NEW_PASSWORD, new)]
            .into_iter()
            .filter_map(|(field, secret)| (!secret.is_valid_password()).then_some(field))
            .collect();
        if !invalid.is_empty() {
            warn!(%id, fields = ?invalid, "password change rejected: invalid format");
            return Err(Error::invalid(USER_INVALID, invalid));
        }

        let current_digest = self.hasher.digest(current);
        let new_digest = self.hasher.digest(new);
        if current_digest == new_digest {
            warn!(%id, "password change rejected: new password equals current");
            return Err(Error::duplicated(
                USER_DUPLICATED,
                [CURRENT_PASSWORD, NEW_PASSWORD],
            ));
        }

        let user = self.resources.get(id).await?;
        if user.password() != &current_digest {
            warn!(%id, "password change rejected: current password mismatch");
            return Err(Error::invalid(USER_INVALID, [CURRENT_PASSWORD]));
        }

        self.resources
            .store()
            .update(user.id(), UserPatch::Password(new_digest))
            .await
            .map_err(|err| map_store_error::<User>(id, err))?;
        debug!(%id, "password changed");
        Ok(())
    }
}

#[async_trait]
impl<S, H> AccountCommand for UserService<S, H>
where
    S: ResourceStore<User> + UniqueLookup<User>,
    H: SecretHasher,
{
    async fn update_data(&self, id: &ResourceId, data: UserData) -> UpdateOutcome<User> {
        Self::update_data(self, id, data).await
    }

    async fn update_password(
        &self,
        id: &ResourceId,
        current: &PlainSecret,
        new: &PlainSecret,
    ) -> Result<(), Error> {
        Self::update_password(self, id, current, new).await
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
