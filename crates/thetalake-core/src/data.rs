// ── Data sources ──
//
// Read-only lookups with no lifecycle: the reporting endpoints plus by-id
// reads of the managed entities. Every call is a single GET whose errors
// are returned unchanged apart from the context tag.

use thetalake_api::ThetaLakeClient;

use crate::convert::integration_state;
use crate::error::CoreError;
use crate::model::{
    Analysis, AnalysisPolicy, AuditLog, Case, DirectoryGroup, Event, Export, IntegrationState,
    LegalHold, PolicyHit, Record, RetentionPolicy, SystemStatus, Tag, User,
};

/// Reader for every data source.
#[derive(Debug, Clone)]
pub struct DataSources {
    client: ThetaLakeClient,
}

impl DataSources {
    pub fn new(client: ThetaLakeClient) -> Self {
        Self { client }
    }

    // ── Reporting ────────────────────────────────────────────────────

    pub async fn audit_logs(&self) -> Result<Vec<AuditLog>, CoreError> {
        let logs = self
            .client
            .list_audit_logs()
            .await
            .map_err(CoreError::api("audit logs", "read"))?;
        Ok(logs.into_iter().map(AuditLog::from).collect())
    }

    pub async fn events(&self) -> Result<Vec<Event>, CoreError> {
        let events = self
            .client
            .list_events()
            .await
            .map_err(CoreError::api("events", "read"))?;
        Ok(events.into_iter().map(Event::from).collect())
    }

    pub async fn analysis_policies(&self) -> Result<Vec<AnalysisPolicy>, CoreError> {
        let policies = self
            .client
            .list_analysis_policies()
            .await
            .map_err(CoreError::api("analysis policies", "read"))?;
        Ok(policies.into_iter().map(AnalysisPolicy::from).collect())
    }

    pub async fn policy_hits(&self) -> Result<Vec<PolicyHit>, CoreError> {
        let hits = self
            .client
            .list_policy_hits()
            .await
            .map_err(CoreError::api("policy hits", "read"))?;
        Ok(hits.into_iter().map(PolicyHit::from).collect())
    }

    pub async fn system_status(&self) -> Result<SystemStatus, CoreError> {
        self.client
            .get_system_status()
            .await
            .map(SystemStatus::from)
            .map_err(CoreError::api("system status", "read"))
    }

    pub async fn analysis(&self, id: &str) -> Result<Analysis, CoreError> {
        self.client
            .get_analysis(id)
            .await
            .map(Analysis::from)
            .map_err(CoreError::api("analysis", "read"))
    }

    // ── By-id lookups ────────────────────────────────────────────────

    pub async fn case(&self, id: &str) -> Result<Case, CoreError> {
        self.client
            .get_case(id)
            .await
            .map(Case::from)
            .map_err(CoreError::api("case", "read"))
    }

    pub async fn user(&self, id: &str) -> Result<User, CoreError> {
        self.client
            .get_user(id)
            .await
            .map(User::from)
            .map_err(CoreError::api("user", "read"))
    }

    pub async fn directory_group(&self, id: &str) -> Result<DirectoryGroup, CoreError> {
        self.client
            .get_directory_group(id)
            .await
            .map(DirectoryGroup::from)
            .map_err(CoreError::api("directory group", "read"))
    }

    pub async fn retention_policy(&self, id: &str) -> Result<RetentionPolicy, CoreError> {
        self.client
            .get_retention_policy(id)
            .await
            .map(RetentionPolicy::from)
            .map_err(CoreError::api("retention policy", "read"))
    }

    pub async fn legal_hold(&self, id: &str) -> Result<LegalHold, CoreError> {
        self.client
            .get_legal_hold(id)
            .await
            .map(LegalHold::from)
            .map_err(CoreError::api("legal hold", "read"))
    }

    pub async fn tag(&self, id: &str) -> Result<Tag, CoreError> {
        self.client
            .get_tag(id)
            .await
            .map(Tag::from)
            .map_err(CoreError::api("tag", "read"))
    }

    pub async fn export(&self, id: &str) -> Result<Export, CoreError> {
        self.client
            .get_export(id)
            .await
            .map(Export::from)
            .map_err(CoreError::api("export", "read"))
    }

    pub async fn record(&self, id: &str) -> Result<Record, CoreError> {
        self.client
            .get_record(id)
            .await
            .map(Record::from)
            .map_err(CoreError::api("record", "read"))
    }

    pub async fn integration_state(&self, id: &str) -> Result<IntegrationState, CoreError> {
        self.client
            .get_integration_state(id)
            .await
            .map(|state| integration_state(id, state))
            .map_err(CoreError::api("integration state", "read"))
    }
}
