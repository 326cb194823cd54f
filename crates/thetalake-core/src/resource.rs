// ── Lifecycle contract ──
//
// Every managed entity is exposed to the reconciliation engine through the
// same five operations. The engine owns planning and state; a mapper only
// translates one operation into the HTTP calls it needs and back.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::CoreError;

/// Non-fatal diagnostic attached to a successful operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub summary: String,
    pub detail: String,
}

impl Warning {
    pub fn new(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.summary, self.detail)
    }
}

/// Record to store after a create or update, plus any warnings raised.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied<M> {
    pub model: M,
    pub warnings: Vec<Warning>,
}

impl<M> Applied<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            warnings: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_warning(mut self, warning: Warning) -> Self {
        self.warnings.push(warning);
        self
    }
}

/// Create/read/update/delete/import mapping for one entity kind.
///
/// Each operation is a strictly sequential chain of awaited HTTP calls.
/// Errors are returned as-is; nothing is retried or rolled back.
#[async_trait]
pub trait Resource: Send + Sync {
    type Model: Send + Sync;

    /// Entity kind as it appears in messages, e.g. `"case"`.
    fn kind(&self) -> &'static str;

    /// Create the entity from a planned record.
    async fn create(&self, planned: &Self::Model) -> Result<Applied<Self::Model>, CoreError>;

    /// Fetch the current server state for a stored record.
    async fn read(&self, prior: &Self::Model) -> Result<Self::Model, CoreError>;

    /// Apply a planned record over the stored one.
    async fn update(
        &self,
        planned: &Self::Model,
        prior: &Self::Model,
    ) -> Result<Applied<Self::Model>, CoreError>;

    /// Remove the entity, or stop managing it where the service has no
    /// delete.
    async fn delete(&self, state: &Self::Model) -> Result<(), CoreError>;

    /// Seed a record from an opaque identifier. No network call is made;
    /// the engine follows up with `read`.
    async fn import(&self, id: &str) -> Result<Self::Model, CoreError>;
}

/// The stored identifier of `resource`, or a validation error.
pub(crate) fn require_id<'a>(
    resource: &'static str,
    id: Option<&'a str>,
) -> Result<&'a str, CoreError> {
    match id {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(CoreError::Validation {
            resource,
            message: "no id in stored state".into(),
        }),
    }
}

/// Identifier assigned by the service on create, or an error if it sent none.
pub(crate) fn assigned_id(
    resource: &'static str,
    id: Option<String>,
) -> Result<String, CoreError> {
    id.ok_or(CoreError::MissingIdentifier {
        resource,
        operation: "create",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applied_collects_warnings() {
        let applied = Applied::new(1).with_warning(Warning::new("a", "b"));
        assert_eq!(applied.model, 1);
        assert_eq!(applied.warnings.len(), 1);
        assert_eq!(applied.warnings[0].to_string(), "a: b");
    }

    #[test]
    fn require_id_rejects_missing_and_empty() {
        assert!(require_id("tag", None).is_err());
        assert!(require_id("tag", Some("")).is_err());
        assert!(matches!(require_id("tag", Some("4")), Ok("4")));
    }
}
