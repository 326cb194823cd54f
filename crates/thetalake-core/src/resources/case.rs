// ── Case lifecycle ──
//
// A case is created OPEN by the service. Its status is changed only through
// the open/close actions, so a declared status other than the current one
// costs a second call after the record write.

use async_trait::async_trait;
use thetalake_api::{CaseStatus, ThetaLakeClient};
use tracing::info;

use crate::convert::case_request;
use crate::error::CoreError;
use crate::model::Case;
use crate::resource::{Applied, Resource, assigned_id, require_id};

const KIND: &str = "case";

#[derive(Debug, Clone)]
pub struct CaseResource {
    client: ThetaLakeClient,
}

impl CaseResource {
    pub fn new(client: ThetaLakeClient) -> Self {
        Self { client }
    }

    async fn transition(&self, id: &str, status: CaseStatus) -> Result<(), CoreError> {
        info!(case = id, status = %status, "transitioning case");
        self.client
            .transition_case(id, status)
            .await
            .map_err(CoreError::api(KIND, "update status of"))
    }
}

/// Parse a declared status before anything is sent.
fn declared_status(case: &Case) -> Result<Option<CaseStatus>, CoreError> {
    case.status
        .as_deref()
        .map(str::parse::<CaseStatus>)
        .transpose()
        .map_err(|e| CoreError::Validation {
            resource: KIND,
            message: e.to_string(),
        })
}

#[async_trait]
impl Resource for CaseResource {
    type Model = Case;

    fn kind(&self) -> &'static str {
        KIND
    }

    async fn create(&self, planned: &Case) -> Result<Applied<Case>, CoreError> {
        let desired = declared_status(planned)?;

        let created = self
            .client
            .create_case(&case_request(planned))
            .await
            .map_err(CoreError::api(KIND, "create"))?;
        let mut model = Case::from(created);
        let id = assigned_id(KIND, model.id.clone())?;
        info!(case = %id, "created case");

        if let Some(status) = desired.filter(|s| *s != CaseStatus::DEFAULT) {
            self.transition(&id, status).await?;
        }

        model.status = planned
            .status
            .clone()
            .or_else(|| Some(CaseStatus::DEFAULT.to_string()));
        Ok(Applied::new(model))
    }

    async fn read(&self, prior: &Case) -> Result<Case, CoreError> {
        let id = require_id(KIND, prior.id.as_deref())?;
        let fetched = self
            .client
            .get_case(id)
            .await
            .map_err(CoreError::api(KIND, "read"))?;

        let mut model = Case::from(fetched);
        model.id = Some(id.to_owned());
        if model.status.is_none() {
            model.status.clone_from(&prior.status);
        }
        Ok(model)
    }

    async fn update(&self, planned: &Case, prior: &Case) -> Result<Applied<Case>, CoreError> {
        let id = require_id(KIND, prior.id.as_deref())?;
        let desired = declared_status(planned)?;

        let updated = self
            .client
            .update_case(id, &case_request(planned))
            .await
            .map_err(CoreError::api(KIND, "update"))?;
        info!(case = id, "updated case");

        let mut model = Case::from(updated);
        model.id = Some(id.to_owned());

        if let Some(status) = desired {
            let current = prior
                .status
                .as_deref()
                .and_then(|s| s.parse::<CaseStatus>().ok());
            if current != Some(status) {
                self.transition(id, status).await?;
            }
            model.status.clone_from(&planned.status);
        } else if model.status.is_none() {
            model.status.clone_from(&prior.status);
        }
        Ok(Applied::new(model))
    }

    async fn delete(&self, state: &Case) -> Result<(), CoreError> {
        let id = require_id(KIND, state.id.as_deref())?;
        self.client
            .delete_case(id)
            .await
            .map_err(CoreError::api(KIND, "delete"))?;
        info!(case = id, "deleted case");
        Ok(())
    }

    async fn import(&self, id: &str) -> Result<Case, CoreError> {
        Ok(Case {
            id: Some(id.to_owned()),
            ..Case::default()
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn declared_status_is_validated_locally() {
        let mut case = Case {
            status: Some("closed".into()),
            ..Case::default()
        };
        assert!(matches!(declared_status(&case), Ok(Some(CaseStatus::Closed))));

        case.status = Some("pending".into());
        let err = declared_status(&case).unwrap_err();
        assert!(matches!(err, CoreError::Validation { resource: "case", .. }));

        case.status = None;
        assert!(matches!(declared_status(&case), Ok(None)));
    }
}
