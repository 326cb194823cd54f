// ── User lifecycle ──
//
// The service never returns passwords, so every stored user carries the
// password pair from its planned record, and reads carry it over from the
// prior state.

use async_trait::async_trait;
use thetalake_api::ThetaLakeClient;
use tracing::{debug, info};

use crate::convert::user_request;
use crate::error::CoreError;
use crate::model::User;
use crate::resource::{Applied, Resource, assigned_id, require_id};

const KIND: &str = "user";

#[derive(Debug, Clone)]
pub struct UserResource {
    client: ThetaLakeClient,
}

impl UserResource {
    pub fn new(client: ThetaLakeClient) -> Self {
        Self { client }
    }
}

fn with_passwords_of(mut user: User, source: &User) -> User {
    user.password.clone_from(&source.password);
    user.password_confirmation
        .clone_from(&source.password_confirmation);
    user
}

#[async_trait]
impl Resource for UserResource {
    type Model = User;

    fn kind(&self) -> &'static str {
        KIND
    }

    async fn create(&self, planned: &User) -> Result<Applied<User>, CoreError> {
        let created = self
            .client
            .create_user(&user_request(planned, true))
            .await
            .map_err(CoreError::api(KIND, "create"))?;
        let model = User::from(created);
        let id = assigned_id(KIND, model.id.clone())?;
        info!(user = %id, "created user");
        Ok(Applied::new(with_passwords_of(model, planned)))
    }

    async fn read(&self, prior: &User) -> Result<User, CoreError> {
        let id = require_id(KIND, prior.id.as_deref())?;
        let fetched = self
            .client
            .get_user(id)
            .await
            .map_err(CoreError::api(KIND, "read"))?;
        let mut model = User::from(fetched);
        model.id = Some(id.to_owned());
        Ok(with_passwords_of(model, prior))
    }

    async fn update(&self, planned: &User, prior: &User) -> Result<Applied<User>, CoreError> {
        let id = require_id(KIND, prior.id.as_deref())?;
        let rotate = planned.password_changed(prior);
        if rotate {
            debug!(user = id, "password changed, sending new password pair");
        }

        let updated = self
            .client
            .update_user(id, &user_request(planned, rotate))
            .await
            .map_err(CoreError::api(KIND, "update"))?;
        info!(user = id, "updated user");

        let mut model = User::from(updated);
        model.id = Some(id.to_owned());
        Ok(Applied::new(with_passwords_of(model, planned)))
    }

    async fn delete(&self, state: &User) -> Result<(), CoreError> {
        let id = require_id(KIND, state.id.as_deref())?;
        self.client
            .delete_user(id)
            .await
            .map_err(CoreError::api(KIND, "delete"))?;
        info!(user = id, "deleted user");
        Ok(())
    }

    async fn import(&self, id: &str) -> Result<User, CoreError> {
        Ok(User {
            id: Some(id.to_owned()),
            ..User::default()
        })
    }
}
