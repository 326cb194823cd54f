// ── Case-record link lifecycle ──
//
// A link is identified only by its (case, record) pair. There is no
// endpoint to read a single link back, so an existing link is assumed to
// still exist until a delete says otherwise.

use async_trait::async_trait;
use thetalake_api::ThetaLakeClient;
use tracing::info;

use crate::error::CoreError;
use crate::model::CaseRecordLink;
use crate::resource::{Applied, Resource, require_id};

const KIND: &str = "case record";

#[derive(Debug, Clone)]
pub struct CaseRecordResource {
    client: ThetaLakeClient,
}

impl CaseRecordResource {
    pub fn new(client: ThetaLakeClient) -> Self {
        Self { client }
    }
}

fn ids(link: &CaseRecordLink) -> Result<(&str, &str), CoreError> {
    Ok((
        require_id(KIND, Some(link.case_id.as_str()))?,
        require_id(KIND, Some(link.record_id.as_str()))?,
    ))
}

#[async_trait]
impl Resource for CaseRecordResource {
    type Model = CaseRecordLink;

    fn kind(&self) -> &'static str {
        KIND
    }

    async fn create(&self, planned: &CaseRecordLink) -> Result<Applied<CaseRecordLink>, CoreError> {
        let (case_id, record_id) = ids(planned)?;
        self.client
            .add_record_to_case(case_id, record_id)
            .await
            .map_err(CoreError::api(KIND, "create"))?;
        info!(case = case_id, record = record_id, "linked record to case");
        Ok(Applied::new(planned.clone()))
    }

    async fn read(&self, prior: &CaseRecordLink) -> Result<CaseRecordLink, CoreError> {
        Ok(prior.clone())
    }

    /// Both ids form the identity, so any change means a new link.
    async fn update(
        &self,
        planned: &CaseRecordLink,
        prior: &CaseRecordLink,
    ) -> Result<Applied<CaseRecordLink>, CoreError> {
        let mut changed = Vec::new();
        if planned.case_id != prior.case_id {
            changed.push("case_id");
        }
        if planned.record_id != prior.record_id {
            changed.push("record_id");
        }
        if changed.is_empty() {
            Ok(Applied::new(prior.clone()))
        } else {
            Err(CoreError::RequiresReplacement {
                resource: KIND,
                attributes: changed.join(", "),
            })
        }
    }

    async fn delete(&self, state: &CaseRecordLink) -> Result<(), CoreError> {
        let (case_id, record_id) = ids(state)?;
        self.client
            .remove_record_from_case(case_id, record_id)
            .await
            .map_err(CoreError::api(KIND, "delete"))?;
        info!(case = case_id, record = record_id, "unlinked record from case");
        Ok(())
    }

    async fn import(&self, _id: &str) -> Result<CaseRecordLink, CoreError> {
        Err(CoreError::Unsupported {
            resource: KIND,
            operation: "import",
            message: "Importing case records is not currently supported.".into(),
        })
    }
}
