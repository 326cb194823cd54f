// ── Archive lifecycles ──
//
// Exports, records and integration state deviate from plain CRUD: exports
// cannot be changed in place, records are never created or destroyed by
// us (only their review metadata is managed), and integration state is a
// single switch with no delete.

use async_trait::async_trait;
use thetalake_api::ThetaLakeClient;
use tracing::{info, warn};

use crate::convert::{export_request, integration_state};
use crate::error::CoreError;
use crate::model::{Export, IntegrationState, Record};
use crate::resource::{Applied, Resource, Warning, assigned_id, require_id};

// ── Exports ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ExportResource {
    client: ThetaLakeClient,
}

impl ExportResource {
    const KIND: &'static str = "export";

    pub fn new(client: ThetaLakeClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Resource for ExportResource {
    type Model = Export;

    fn kind(&self) -> &'static str {
        Self::KIND
    }

    async fn create(&self, planned: &Export) -> Result<Applied<Export>, CoreError> {
        let created = self
            .client
            .create_export(&export_request(planned))
            .await
            .map_err(CoreError::api(Self::KIND, "create"))?;
        let model = Export::from(created);
        let id = assigned_id(Self::KIND, model.id.clone())?;
        info!(export = %id, "created export");
        Ok(Applied::new(model))
    }

    async fn read(&self, prior: &Export) -> Result<Export, CoreError> {
        let id = require_id(Self::KIND, prior.id.as_deref())?;
        let mut model = Export::from(
            self.client
                .get_export(id)
                .await
                .map_err(CoreError::api(Self::KIND, "read"))?,
        );
        model.id = Some(id.to_owned());
        Ok(model)
    }

    /// No update endpoint exists: the planned record is stored with the
    /// server-computed fields of the prior state, and nothing is sent.
    async fn update(&self, planned: &Export, prior: &Export) -> Result<Applied<Export>, CoreError> {
        warn!(export = ?prior.id, "export update is not supported, no request sent");
        let model = Export {
            id: prior.id.clone(),
            status: prior.status.clone(),
            download_url: prior.download_url.clone(),
            ..planned.clone()
        };
        Ok(Applied::new(model).with_warning(Warning::new(
            "Update not supported",
            "Updating exports is not supported; the new values were stored without being sent.",
        )))
    }

    async fn delete(&self, state: &Export) -> Result<(), CoreError> {
        let id = require_id(Self::KIND, state.id.as_deref())?;
        self.client
            .delete_export(id)
            .await
            .map_err(CoreError::api(Self::KIND, "delete"))?;
        info!(export = id, "deleted export");
        Ok(())
    }

    async fn import(&self, id: &str) -> Result<Export, CoreError> {
        Ok(Export {
            id: Some(id.to_owned()),
            ..Export::default()
        })
    }
}

// ── Records ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct RecordResource {
    client: ThetaLakeClient,
}

impl RecordResource {
    const KIND: &'static str = "record";

    pub fn new(client: ThetaLakeClient) -> Self {
        Self { client }
    }

    async fn review(&self, planned: &Record, operation: &'static str) -> Result<Record, CoreError> {
        require_id(Self::KIND, Some(planned.id.as_str()))?;
        let record = self
            .client
            .update_record_review_state(
                &planned.id,
                &planned.review_state,
                planned.comment.as_deref(),
            )
            .await
            .map_err(CoreError::api(Self::KIND, operation))?;
        info!(record = %planned.id, review_state = %planned.review_state, "set record review state");
        let mut model = Record::from(record);
        model.id.clone_from(&planned.id);
        Ok(model)
    }
}

#[async_trait]
impl Resource for RecordResource {
    type Model = Record;

    fn kind(&self) -> &'static str {
        Self::KIND
    }

    async fn create(&self, planned: &Record) -> Result<Applied<Record>, CoreError> {
        Ok(Applied::new(self.review(planned, "set review state of").await?))
    }

    async fn read(&self, prior: &Record) -> Result<Record, CoreError> {
        let id = require_id(Self::KIND, Some(prior.id.as_str()))?;
        let record = self
            .client
            .get_record(id)
            .await
            .map_err(CoreError::api(Self::KIND, "read"))?;
        let mut model = Record::from(record);
        model.id = id.to_owned();
        Ok(model)
    }

    async fn update(&self, planned: &Record, prior: &Record) -> Result<Applied<Record>, CoreError> {
        if planned.id != prior.id {
            return Err(CoreError::RequiresReplacement {
                resource: Self::KIND,
                attributes: "id".into(),
            });
        }
        Ok(Applied::new(
            self.review(planned, "update review state of").await?,
        ))
    }

    /// Records outlive their management; deleting only forgets the state.
    async fn delete(&self, state: &Record) -> Result<(), CoreError> {
        info!(record = %state.id, "record is no longer managed, nothing deleted");
        Ok(())
    }

    async fn import(&self, id: &str) -> Result<Record, CoreError> {
        Ok(Record {
            id: id.to_owned(),
            ..Record::default()
        })
    }
}

// ── Integration state ────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct IntegrationStateResource {
    client: ThetaLakeClient,
}

impl IntegrationStateResource {
    const KIND: &'static str = "integration state";

    pub fn new(client: ThetaLakeClient) -> Self {
        Self { client }
    }

    async fn apply(
        &self,
        planned: &IntegrationState,
        operation: &'static str,
    ) -> Result<IntegrationState, CoreError> {
        let id = require_id(Self::KIND, Some(planned.integration_id.as_str()))?;
        let state = self
            .client
            .set_integration_state(id, planned.paused)
            .await
            .map_err(CoreError::api(Self::KIND, operation))?;
        info!(integration = id, paused = planned.paused, "set integration state");
        Ok(integration_state(id, state))
    }
}

#[async_trait]
impl Resource for IntegrationStateResource {
    type Model = IntegrationState;

    fn kind(&self) -> &'static str {
        Self::KIND
    }

    async fn create(
        &self,
        planned: &IntegrationState,
    ) -> Result<Applied<IntegrationState>, CoreError> {
        Ok(Applied::new(self.apply(planned, "set").await?))
    }

    async fn read(&self, prior: &IntegrationState) -> Result<IntegrationState, CoreError> {
        let id = require_id(Self::KIND, Some(prior.integration_id.as_str()))?;
        let state = self
            .client
            .get_integration_state(id)
            .await
            .map_err(CoreError::api(Self::KIND, "read"))?;
        Ok(integration_state(id, state))
    }

    async fn update(
        &self,
        planned: &IntegrationState,
        prior: &IntegrationState,
    ) -> Result<Applied<IntegrationState>, CoreError> {
        if planned.integration_id != prior.integration_id {
            return Err(CoreError::RequiresReplacement {
                resource: Self::KIND,
                attributes: "integration_id".into(),
            });
        }
        Ok(Applied::new(self.apply(planned, "update").await?))
    }

    /// The integration is left in whatever state it was last set to.
    async fn delete(&self, state: &IntegrationState) -> Result<(), CoreError> {
        info!(
            integration = %state.integration_id,
            "integration state is no longer managed, nothing changed"
        );
        Ok(())
    }

    async fn import(&self, id: &str) -> Result<IntegrationState, CoreError> {
        Ok(IntegrationState {
            integration_id: id.to_owned(),
            ..IntegrationState::default()
        })
    }
}
