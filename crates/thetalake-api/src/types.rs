//! Wire types for the Theta Lake REST API.
//!
//! All types match the JSON bodies exchanged with the service. Field names
//! are already snake_case on the wire. Identifiers are assigned by the
//! service and are therefore optional on request bodies and skipped when
//! absent; optional scalars are skipped the same way.
//!
//! Responses are read leniently: a missing or `null` field takes its zero
//! value instead of failing the whole body.

use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Error;

fn expose_secret<S: Serializer>(
    secret: &Option<SecretString>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match secret {
        Some(s) => serializer.serialize_some(s.expose_secret()),
        None => serializer.serialize_none(),
    }
}

/// Reads an explicit `null` as the type's zero value, the same as a missing
/// field under `#[serde(default)]`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ── Cases ────────────────────────────────────────────────────────────

/// Case : `POST /cases`, `GET|PUT /cases/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Case {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_date: Option<String>,
    /// `PUBLIC` or `PRIVATE`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Only present when the service reports it. Status is changed through
    /// the `/open` and `/close` actions, never through the record body.
    #[serde(default, skip_serializing)]
    pub status: Option<String>,
}

/// Logical case status, changed via `PUT /cases/{id}/open|close`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum CaseStatus {
    #[strum(serialize = "OPEN")]
    Open,
    #[strum(serialize = "CLOSED")]
    Closed,
}

impl CaseStatus {
    /// The status every new case starts in.
    pub const DEFAULT: Self = Self::Open;

    /// Action path segment that moves a case into this status.
    pub fn action(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "close",
        }
    }
}

impl FromStr for CaseStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("OPEN") {
            Ok(Self::Open)
        } else if s.eq_ignore_ascii_case("CLOSED") {
            Ok(Self::Closed)
        } else {
            Err(Error::InvalidCaseStatus(s.to_owned()))
        }
    }
}

/// Body of `POST /cases/{id}/records`.
#[derive(Debug, Serialize)]
pub(crate) struct CaseRecordRequest<'a> {
    pub record_id: &'a str,
}

// ── Users ────────────────────────────────────────────────────────────

/// User : `POST /users`, `GET|PUT /users/{id}`.
///
/// The password pair is write-only: the service never echoes it back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "expose_secret"
    )]
    pub password: Option<SecretString>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "expose_secret"
    )]
    pub password_confirmation: Option<SecretString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_id: Option<i64>,
}

// ── Directory groups ─────────────────────────────────────────────────

/// Directory group : `POST /directory_groups`, `GET|PUT /directory_groups/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ── Retention policies ───────────────────────────────────────────────

/// Retention policy : `POST /retention_policies`, `GET|PUT /retention_policies/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention_period_days: Option<i64>,
}

// ── Legal holds ──────────────────────────────────────────────────────

/// Legal hold : `POST /legal_holds`, `GET|PUT /legal_holds/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegalHold {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_id: Option<i64>,
}

// ── Tags ─────────────────────────────────────────────────────────────

/// Tag : `POST /tags`, `GET|PUT /tags/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ── Exports ──────────────────────────────────────────────────────────

/// Export : `POST /exports`, `GET /exports/{id}`.
///
/// `status` and `download_url` are computed by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Export {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

// ── Records ──────────────────────────────────────────────────────────

/// Archived record : `GET /records/{id}`.
///
/// `content_date` and `participants` are derived by the service; only the
/// review state and comment are writable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub content_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub participants: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Body of `PUT /records/{id}/review_state`.
#[derive(Debug, Serialize)]
pub(crate) struct ReviewStateRequest<'a> {
    pub review_state: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<&'a str>,
}

// ── Integration state ────────────────────────────────────────────────

/// Current state of an ingestion integration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationState {
    #[serde(deserialize_with = "null_as_default")]
    pub paused: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_upload: Option<String>,
}

impl IntegrationState {
    /// A state without `last_run` is a partial answer and must be re-read.
    pub fn is_complete(&self) -> bool {
        self.last_run.as_deref().is_some_and(|run| !run.is_empty())
    }
}

/// `{"state": {...}}` wrapper used by `GET|PUT /ingestion/integration/{id}/state`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct IntegrationStateEnvelope {
    pub state: IntegrationState,
}

/// Requested integration status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IntegrationStatus {
    Active,
    Paused,
}

impl IntegrationStatus {
    pub fn from_paused(paused: bool) -> Self {
        if paused { Self::Paused } else { Self::Active }
    }
}

/// Body of `PUT /ingestion/integration/{id}/state`.
#[derive(Debug, Serialize)]
pub(crate) struct IntegrationStateRequest {
    pub status: IntegrationStatus,
}

// ── Read-only aggregates ─────────────────────────────────────────────

/// Audit log entry, from `GET /audit_logs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditLog {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub user: String,
    #[serde(deserialize_with = "null_as_default")]
    pub action: String,
    #[serde(deserialize_with = "null_as_default")]
    pub resource: String,
    #[serde(deserialize_with = "null_as_default")]
    pub timestamp: String,
}

/// Event, from `GET /events`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub event_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(deserialize_with = "null_as_default")]
    pub timestamp: String,
}

/// Analysis policy, from `GET /analysis/policies`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisPolicy {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_built_in: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: String,
}

/// `{"policies": [...]}` envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct AnalysisPoliciesEnvelope {
    #[serde(default, deserialize_with = "null_as_default")]
    pub policies: Vec<AnalysisPolicy>,
}

/// Policy hit, from `GET /analysis/policy_hits`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyHit {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub policy_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub record_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub hit_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub confidence: i64,
}

/// `{"hits": [...]}` envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct PolicyHitsEnvelope {
    #[serde(default, deserialize_with = "null_as_default")]
    pub hits: Vec<PolicyHit>,
}

/// Platform health, from `GET /system/status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemStatus {
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Analysis result, from `GET /analysis/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Analysis {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn case_status_parses_case_insensitively() {
        assert_eq!("OPEN".parse::<CaseStatus>().unwrap(), CaseStatus::Open);
        assert_eq!("open".parse::<CaseStatus>().unwrap(), CaseStatus::Open);
        assert_eq!("Closed".parse::<CaseStatus>().unwrap(), CaseStatus::Closed);
        assert_eq!("CLOSED".parse::<CaseStatus>().unwrap(), CaseStatus::Closed);
    }

    #[test]
    fn case_status_rejects_other_vocabulary() {
        for raw in ["close", "opened", "", "ARCHIVED", " OPEN"] {
            let err = raw.parse::<CaseStatus>().unwrap_err();
            assert!(matches!(err, Error::InvalidCaseStatus(ref s) if s == raw));
        }
    }

    #[test]
    fn case_status_maps_to_action_segment() {
        assert_eq!(CaseStatus::Open.action(), "open");
        assert_eq!(CaseStatus::Closed.action(), "close");
        assert_eq!(CaseStatus::Closed.to_string(), "CLOSED");
    }

    #[test]
    fn request_bodies_omit_absent_fields() {
        let case = Case {
            name: "test-case".into(),
            number: "CASE-TEST-001".into(),
            visibility: Some("PRIVATE".into()),
            status: Some("OPEN".into()),
            ..Case::default()
        };
        let value = serde_json::to_value(&case).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "test-case",
                "number": "CASE-TEST-001",
                "visibility": "PRIVATE"
            })
        );
    }

    #[test]
    fn user_password_is_sent_in_clear_on_the_wire_only() {
        let user = User {
            name: "Jane".into(),
            email: "jane@example.com".into(),
            password: Some(SecretString::from("s3cret".to_owned())),
            password_confirmation: Some(SecretString::from("s3cret".to_owned())),
            role_id: Some(2),
            ..User::default()
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["password"], "s3cret");
        assert_eq!(value["password_confirmation"], "s3cret");
        assert!(!format!("{user:?}").contains("s3cret"));
    }

    #[test]
    fn integration_state_without_last_run_is_partial() {
        let partial: IntegrationStateEnvelope =
            serde_json::from_str(r#"{"state":{"paused":true}}"#).unwrap();
        assert!(!partial.state.is_complete());

        let empty: IntegrationStateEnvelope =
            serde_json::from_str(r#"{"state":{"paused":true,"last_run":""}}"#).unwrap();
        assert!(!empty.state.is_complete());

        let full: IntegrationStateEnvelope = serde_json::from_str(
            r#"{"state":{"paused":false,"last_run":"2024-05-01T10:00:00Z"}}"#,
        )
        .unwrap();
        assert!(full.state.is_complete());
    }

    #[test]
    fn integration_status_serializes_lowercase() {
        let body = IntegrationStateRequest {
            status: IntegrationStatus::from_paused(true),
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"status":"paused"}"#
        );
        assert_eq!(IntegrationStatus::from_paused(false).to_string(), "active");
    }

    #[test]
    fn trimmed_create_echo_fills_zero_values() {
        let case: Case = serde_json::from_str(r#"{"id":9,"name":"x"}"#).unwrap();
        assert_eq!(case.id, Some(9));
        assert_eq!(case.name, "x");
        assert_eq!(case.number, "");

        let user: User = serde_json::from_str(r#"{"id":3,"email":null}"#).unwrap();
        assert_eq!(user.id, Some(3));
        assert_eq!(user.name, "");
        assert_eq!(user.email, "");

        let tag: Tag = serde_json::from_str(r#"{"id":4}"#).unwrap();
        assert_eq!(tag.id, Some(4));
        assert!(tag.name.is_empty());
    }

    #[test]
    fn null_service_fields_read_as_zero_values() {
        let record: Record = serde_json::from_str(
            r#"{"id":"r1","content_date":null,"participants":null,"review_state":"reviewed"}"#,
        )
        .unwrap();
        assert_eq!(record.id, "r1");
        assert_eq!(record.content_date, "");
        assert!(record.participants.is_empty());
        assert_eq!(record.review_state.as_deref(), Some("reviewed"));

        let policies: AnalysisPoliciesEnvelope = serde_json::from_str(
            r#"{"policies":[{"id":1,"name":"p","description":null,"is_built_in":null}]}"#,
        )
        .unwrap();
        assert_eq!(policies.policies.len(), 1);
        assert_eq!(policies.policies[0].description, "");
        assert!(!policies.policies[0].is_built_in);

        let hits: PolicyHitsEnvelope = serde_json::from_str(r#"{"hits":null}"#).unwrap();
        assert!(hits.hits.is_empty());

        let event: Event =
            serde_json::from_str(r#"{"id":"e1","type":null,"timestamp":null}"#).unwrap();
        assert_eq!(event.id, "e1");
        assert_eq!(event.event_type, "");
    }
}
