// ── Connector ──
//
// Entry point for consumers. Builds the API client once from a
// `ConnectionConfig` and hands out lifecycle mappers and the data-source
// reader, all sharing that client.

use thetalake_api::{ThetaLakeClient, TransportConfig};
use tracing::debug;

use crate::config::ConnectionConfig;
use crate::data::DataSources;
use crate::error::CoreError;
use crate::resources::{
    CaseRecordResource, CaseResource, DirectoryGroupResource, ExportResource,
    IntegrationStateResource, LegalHoldResource, RecordResource, RetentionPolicyResource,
    TagResource, UserResource,
};

/// Configured connection to one Theta Lake tenant.
///
/// Cheaply cloneable; the underlying HTTP client is shared.
#[derive(Debug, Clone)]
pub struct Connector {
    client: ThetaLakeClient,
}

impl Connector {
    /// Validate `config` and build the HTTP client. No request is sent.
    pub fn new(config: ConnectionConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig::with_timeout(config.timeout);
        let client = ThetaLakeClient::new(config.endpoint.as_str(), config.token, &transport)?;
        debug!(endpoint = client.endpoint(), "connector ready");
        Ok(Self { client })
    }

    /// Wrap an already-built client.
    pub fn from_client(client: ThetaLakeClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ThetaLakeClient {
        &self.client
    }

    // ── Mappers ──────────────────────────────────────────────────────

    pub fn cases(&self) -> CaseResource {
        CaseResource::new(self.client.clone())
    }

    pub fn case_records(&self) -> CaseRecordResource {
        CaseRecordResource::new(self.client.clone())
    }

    pub fn users(&self) -> UserResource {
        UserResource::new(self.client.clone())
    }

    pub fn directory_groups(&self) -> DirectoryGroupResource {
        DirectoryGroupResource::new(self.client.clone())
    }

    pub fn retention_policies(&self) -> RetentionPolicyResource {
        RetentionPolicyResource::new(self.client.clone())
    }

    pub fn legal_holds(&self) -> LegalHoldResource {
        LegalHoldResource::new(self.client.clone())
    }

    pub fn tags(&self) -> TagResource {
        TagResource::new(self.client.clone())
    }

    pub fn exports(&self) -> ExportResource {
        ExportResource::new(self.client.clone())
    }

    pub fn records(&self) -> RecordResource {
        RecordResource::new(self.client.clone())
    }

    pub fn integration_states(&self) -> IntegrationStateResource {
        IntegrationStateResource::new(self.client.clone())
    }

    // ── Data sources ─────────────────────────────────────────────────

    pub fn data(&self) -> DataSources {
        DataSources::new(self.client.clone())
    }
}
