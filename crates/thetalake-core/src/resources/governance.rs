// ── Governance lifecycles ──
//
// Directory groups, retention policies, legal holds and tags are plain
// records: every operation is a single call and the response is stored
// as-is.

use async_trait::async_trait;
use thetalake_api::ThetaLakeClient;
use tracing::info;

use crate::convert::{
    directory_group_request, legal_hold_request, retention_policy_request, tag_request,
};
use crate::error::CoreError;
use crate::model::{DirectoryGroup, LegalHold, RetentionPolicy, Tag};
use crate::resource::{Applied, Resource, assigned_id, require_id};

// ── Directory groups ─────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct DirectoryGroupResource {
    client: ThetaLakeClient,
}

impl DirectoryGroupResource {
    const KIND: &'static str = "directory group";

    pub fn new(client: ThetaLakeClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Resource for DirectoryGroupResource {
    type Model = DirectoryGroup;

    fn kind(&self) -> &'static str {
        Self::KIND
    }

    async fn create(&self, planned: &DirectoryGroup) -> Result<Applied<DirectoryGroup>, CoreError> {
        let created = self
            .client
            .create_directory_group(&directory_group_request(planned))
            .await
            .map_err(CoreError::api(Self::KIND, "create"))?;
        let model = DirectoryGroup::from(created);
        let id = assigned_id(Self::KIND, model.id.clone())?;
        info!(directory_group = %id, "created directory group");
        Ok(Applied::new(model))
    }

    async fn read(&self, prior: &DirectoryGroup) -> Result<DirectoryGroup, CoreError> {
        let id = require_id(Self::KIND, prior.id.as_deref())?;
        let mut model = DirectoryGroup::from(
            self.client
                .get_directory_group(id)
                .await
                .map_err(CoreError::api(Self::KIND, "read"))?,
        );
        model.id = Some(id.to_owned());
        Ok(model)
    }

    async fn update(
        &self,
        planned: &DirectoryGroup,
        prior: &DirectoryGroup,
    ) -> Result<Applied<DirectoryGroup>, CoreError> {
        let id = require_id(Self::KIND, prior.id.as_deref())?;
        let mut model = DirectoryGroup::from(
            self.client
                .update_directory_group(id, &directory_group_request(planned))
                .await
                .map_err(CoreError::api(Self::KIND, "update"))?,
        );
        model.id = Some(id.to_owned());
        info!(directory_group = id, "updated directory group");
        Ok(Applied::new(model))
    }

    async fn delete(&self, state: &DirectoryGroup) -> Result<(), CoreError> {
        let id = require_id(Self::KIND, state.id.as_deref())?;
        self.client
            .delete_directory_group(id)
            .await
            .map_err(CoreError::api(Self::KIND, "delete"))?;
        info!(directory_group = id, "deleted directory group");
        Ok(())
    }

    async fn import(&self, id: &str) -> Result<DirectoryGroup, CoreError> {
        Ok(DirectoryGroup {
            id: Some(id.to_owned()),
            ..DirectoryGroup::default()
        })
    }
}

// ── Retention policies ───────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct RetentionPolicyResource {
    client: ThetaLakeClient,
}

impl RetentionPolicyResource {
    const KIND: &'static str = "retention policy";

    pub fn new(client: ThetaLakeClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Resource for RetentionPolicyResource {
    type Model = RetentionPolicy;

    fn kind(&self) -> &'static str {
        Self::KIND
    }

    async fn create(
        &self,
        planned: &RetentionPolicy,
    ) -> Result<Applied<RetentionPolicy>, CoreError> {
        let created = self
            .client
            .create_retention_policy(&retention_policy_request(planned))
            .await
            .map_err(CoreError::api(Self::KIND, "create"))?;
        let model = RetentionPolicy::from(created);
        let id = assigned_id(Self::KIND, model.id.clone())?;
        info!(retention_policy = %id, "created retention policy");
        Ok(Applied::new(model))
    }

    async fn read(&self, prior: &RetentionPolicy) -> Result<RetentionPolicy, CoreError> {
        let id = require_id(Self::KIND, prior.id.as_deref())?;
        let mut model = RetentionPolicy::from(
            self.client
                .get_retention_policy(id)
                .await
                .map_err(CoreError::api(Self::KIND, "read"))?,
        );
        model.id = Some(id.to_owned());
        Ok(model)
    }

    async fn update(
        &self,
        planned: &RetentionPolicy,
        prior: &RetentionPolicy,
    ) -> Result<Applied<RetentionPolicy>, CoreError> {
        let id = require_id(Self::KIND, prior.id.as_deref())?;
        let mut model = RetentionPolicy::from(
            self.client
                .update_retention_policy(id, &retention_policy_request(planned))
                .await
                .map_err(CoreError::api(Self::KIND, "update"))?,
        );
        model.id = Some(id.to_owned());
        info!(retention_policy = id, "updated retention policy");
        Ok(Applied::new(model))
    }

    async fn delete(&self, state: &RetentionPolicy) -> Result<(), CoreError> {
        let id = require_id(Self::KIND, state.id.as_deref())?;
        self.client
            .delete_retention_policy(id)
            .await
            .map_err(CoreError::api(Self::KIND, "delete"))?;
        info!(retention_policy = id, "deleted retention policy");
        Ok(())
    }

    async fn import(&self, id: &str) -> Result<RetentionPolicy, CoreError> {
        Ok(RetentionPolicy {
            id: Some(id.to_owned()),
            ..RetentionPolicy::default()
        })
    }
}

// ── Legal holds ──────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct LegalHoldResource {
    client: ThetaLakeClient,
}

impl LegalHoldResource {
    const KIND: &'static str = "legal hold";

    pub fn new(client: ThetaLakeClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Resource for LegalHoldResource {
    type Model = LegalHold;

    fn kind(&self) -> &'static str {
        Self::KIND
    }

    async fn create(&self, planned: &LegalHold) -> Result<Applied<LegalHold>, CoreError> {
        let created = self
            .client
            .create_legal_hold(&legal_hold_request(planned))
            .await
            .map_err(CoreError::api(Self::KIND, "create"))?;
        let model = LegalHold::from(created);
        let id = assigned_id(Self::KIND, model.id.clone())?;
        info!(legal_hold = %id, "created legal hold");
        Ok(Applied::new(model))
    }

    async fn read(&self, prior: &LegalHold) -> Result<LegalHold, CoreError> {
        let id = require_id(Self::KIND, prior.id.as_deref())?;
        let mut model = LegalHold::from(
            self.client
                .get_legal_hold(id)
                .await
                .map_err(CoreError::api(Self::KIND, "read"))?,
        );
        model.id = Some(id.to_owned());
        Ok(model)
    }

    async fn update(
        &self,
        planned: &LegalHold,
        prior: &LegalHold,
    ) -> Result<Applied<LegalHold>, CoreError> {
        let id = require_id(Self::KIND, prior.id.as_deref())?;
        let mut model = LegalHold::from(
            self.client
                .update_legal_hold(id, &legal_hold_request(planned))
                .await
                .map_err(CoreError::api(Self::KIND, "update"))?,
        );
        model.id = Some(id.to_owned());
        info!(legal_hold = id, "updated legal hold");
        Ok(Applied::new(model))
    }

    async fn delete(&self, state: &LegalHold) -> Result<(), CoreError> {
        let id = require_id(Self::KIND, state.id.as_deref())?;
        self.client
            .delete_legal_hold(id)
            .await
            .map_err(CoreError::api(Self::KIND, "delete"))?;
        info!(legal_hold = id, "deleted legal hold");
        Ok(())
    }

    async fn import(&self, id: &str) -> Result<LegalHold, CoreError> {
        Ok(LegalHold {
            id: Some(id.to_owned()),
            ..LegalHold::default()
        })
    }
}

// ── Tags ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct TagResource {
    client: ThetaLakeClient,
}

impl TagResource {
    const KIND: &'static str = "tag";

    pub fn new(client: ThetaLakeClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Resource for TagResource {
    type Model = Tag;

    fn kind(&self) -> &'static str {
        Self::KIND
    }

    async fn create(&self, planned: &Tag) -> Result<Applied<Tag>, CoreError> {
        let created = self
            .client
            .create_tag(&tag_request(planned))
            .await
            .map_err(CoreError::api(Self::KIND, "create"))?;
        let model = Tag::from(created);
        let id = assigned_id(Self::KIND, model.id.clone())?;
        info!(tag = %id, "created tag");
        Ok(Applied::new(model))
    }

    async fn read(&self, prior: &Tag) -> Result<Tag, CoreError> {
        let id = require_id(Self::KIND, prior.id.as_deref())?;
        let mut model = Tag::from(
            self.client
                .get_tag(id)
                .await
                .map_err(CoreError::api(Self::KIND, "read"))?,
        );
        model.id = Some(id.to_owned());
        Ok(model)
    }

    async fn update(&self, planned: &Tag, prior: &Tag) -> Result<Applied<Tag>, CoreError> {
        let id = require_id(Self::KIND, prior.id.as_deref())?;
        let mut model = Tag::from(
            self.client
                .update_tag(id, &tag_request(planned))
                .await
                .map_err(CoreError::api(Self::KIND, "update"))?,
        );
        model.id = Some(id.to_owned());
        info!(tag = id, "updated tag");
        Ok(Applied::new(model))
    }

    async fn delete(&self, state: &Tag) -> Result<(), CoreError> {
        let id = require_id(Self::KIND, state.id.as_deref())?;
        self.client
            .delete_tag(id)
            .await
            .map_err(CoreError::api(Self::KIND, "delete"))?;
        info!(tag = id, "deleted tag");
        Ok(())
    }

    async fn import(&self, id: &str) -> Result<Tag, CoreError> {
        Ok(Tag {
            id: Some(id.to_owned()),
            ..Tag::default()
        })
    }
}
