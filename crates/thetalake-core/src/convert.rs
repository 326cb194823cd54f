// ── API-to-domain type conversions ──
//
// Bridges `thetalake_api::types` wire records and the caller-facing
// `thetalake_core::model` records. Responses become models through `From`
// impls; models become request bodies through the `*_request` functions,
// which drop identifiers and server-computed fields.

use thetalake_api::types as wire;

use crate::model::{
    Analysis, AnalysisPolicy, AuditLog, Case, DirectoryGroup, Event, Export, IntegrationState,
    LegalHold, PolicyHit, Record, RetentionPolicy, SystemStatus, Tag, User,
};

fn id_string(id: Option<i64>) -> Option<String> {
    id.map(|id| id.to_string())
}

// ── Cases ──────────────────────────────────────────────────────────

impl From<wire::Case> for Case {
    fn from(c: wire::Case) -> Self {
        Self {
            id: id_string(c.id),
            name: c.name,
            number: c.number,
            open_date: c.open_date,
            visibility: c.visibility,
            description: c.description,
            status: c.status,
        }
    }
}

pub(crate) fn case_request(c: &Case) -> wire::Case {
    wire::Case {
        id: None,
        name: c.name.clone(),
        number: c.number.clone(),
        open_date: c.open_date.clone(),
        visibility: c.visibility.clone(),
        description: c.description.clone(),
        status: None,
    }
}

// ── Users ──────────────────────────────────────────────────────────

impl From<wire::User> for User {
    fn from(u: wire::User) -> Self {
        Self {
            id: id_string(u.id),
            name: u.name,
            email: u.email,
            role_id: u.role_id,
            search_id: u.search_id,
            password: None,
            password_confirmation: None,
        }
    }
}

/// Request body for a user; the password pair is included only when asked.
pub(crate) fn user_request(u: &User, with_password: bool) -> wire::User {
    let (password, password_confirmation) = if with_password {
        (u.password.clone(), u.password_confirmation.clone())
    } else {
        (None, None)
    };
    wire::User {
        id: None,
        name: u.name.clone(),
        email: u.email.clone(),
        password,
        password_confirmation,
        role_id: u.role_id,
        search_id: u.search_id,
    }
}

// ── Governance ─────────────────────────────────────────────────────

impl From<wire::DirectoryGroup> for DirectoryGroup {
    fn from(g: wire::DirectoryGroup) -> Self {
        Self {
            id: id_string(g.id),
            name: g.name,
            external_id: g.external_id,
            description: g.description,
        }
    }
}

pub(crate) fn directory_group_request(g: &DirectoryGroup) -> wire::DirectoryGroup {
    wire::DirectoryGroup {
        id: None,
        name: g.name.clone(),
        external_id: g.external_id.clone(),
        description: g.description.clone(),
    }
}

impl From<wire::RetentionPolicy> for RetentionPolicy {
    fn from(p: wire::RetentionPolicy) -> Self {
        Self {
            id: id_string(p.id),
            name: p.name,
            description: p.description,
            retention_period_days: p.retention_period_days,
        }
    }
}

pub(crate) fn retention_policy_request(p: &RetentionPolicy) -> wire::RetentionPolicy {
    wire::RetentionPolicy {
        id: None,
        name: p.name.clone(),
        description: p.description.clone(),
        retention_period_days: p.retention_period_days,
    }
}

impl From<wire::LegalHold> for LegalHold {
    fn from(h: wire::LegalHold) -> Self {
        Self {
            id: id_string(h.id),
            name: h.name,
            description: h.description,
            case_id: h.case_id,
        }
    }
}

pub(crate) fn legal_hold_request(h: &LegalHold) -> wire::LegalHold {
    wire::LegalHold {
        id: None,
        name: h.name.clone(),
        description: h.description.clone(),
        case_id: h.case_id,
    }
}

impl From<wire::Tag> for Tag {
    fn from(t: wire::Tag) -> Self {
        Self {
            id: id_string(t.id),
            name: t.name,
            description: t.description,
        }
    }
}

pub(crate) fn tag_request(t: &Tag) -> wire::Tag {
    wire::Tag {
        id: None,
        name: t.name.clone(),
        description: t.description.clone(),
    }
}

// ── Archive ────────────────────────────────────────────────────────

impl From<wire::Export> for Export {
    fn from(e: wire::Export) -> Self {
        Self {
            id: id_string(e.id),
            name: e.name,
            description: e.description,
            query_id: e.query_id,
            format: e.format,
            status: e.status,
            download_url: e.download_url,
        }
    }
}

pub(crate) fn export_request(e: &Export) -> wire::Export {
    wire::Export {
        id: None,
        name: e.name.clone(),
        description: e.description.clone(),
        query_id: e.query_id,
        format: e.format.clone(),
        status: None,
        download_url: None,
    }
}

impl From<wire::Record> for Record {
    fn from(r: wire::Record) -> Self {
        Self {
            id: r.id,
            content_date: Some(r.content_date).filter(|d| !d.is_empty()),
            participants: r.participants,
            review_state: r.review_state.unwrap_or_default(),
            comment: r.comment,
        }
    }
}

pub(crate) fn integration_state(integration_id: &str, s: wire::IntegrationState) -> IntegrationState {
    IntegrationState {
        integration_id: integration_id.to_owned(),
        paused: s.paused,
        last_run: s.last_run,
        last_upload: s.last_upload,
    }
}

// ── Reporting ──────────────────────────────────────────────────────

impl From<wire::AuditLog> for AuditLog {
    fn from(a: wire::AuditLog) -> Self {
        Self {
            id: a.id,
            user: a.user,
            action: a.action,
            resource: a.resource,
            timestamp: a.timestamp,
        }
    }
}

impl From<wire::Event> for Event {
    fn from(e: wire::Event) -> Self {
        Self {
            id: e.id,
            event_type: e.event_type,
            content: e.content,
            timestamp: e.timestamp,
        }
    }
}

impl From<wire::AnalysisPolicy> for AnalysisPolicy {
    fn from(p: wire::AnalysisPolicy) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name,
            description: p.description,
            is_built_in: p.is_built_in,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

impl From<wire::PolicyHit> for PolicyHit {
    fn from(h: wire::PolicyHit) -> Self {
        Self {
            id: h.id,
            policy_id: h.policy_id.to_string(),
            record_id: h.record_id,
            hit_date: h.hit_date,
            confidence: h.confidence,
        }
    }
}

impl From<wire::SystemStatus> for SystemStatus {
    fn from(s: wire::SystemStatus) -> Self {
        Self {
            status: s.status,
            version: s.version,
            message: s.message,
        }
    }
}

impl From<wire::Analysis> for Analysis {
    fn from(a: wire::Analysis) -> Self {
        Self {
            id: a.id,
            name: a.name,
            status: a.status,
            created_at: a.created_at,
            updated_at: a.updated_at,
            details: a.details,
        }
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    #[test]
    fn numeric_ids_become_strings() {
        let tag = Tag::from(wire::Tag {
            id: Some(17),
            name: "priority".into(),
            description: None,
        });
        assert_eq!(tag.id.as_deref(), Some("17"));
    }

    #[test]
    fn requests_drop_identifiers_and_computed_fields() {
        let export = Export {
            id: Some("5".into()),
            name: "q1".into(),
            status: Some("complete".into()),
            download_url: Some("https://dl/5".into()),
            ..Export::default()
        };
        let body = export_request(&export);
        assert_eq!(body.id, None);
        assert_eq!(body.status, None);
        assert_eq!(body.download_url, None);
    }

    #[test]
    fn user_request_gates_password() {
        let user = User {
            name: "Jane".into(),
            password: Some(SecretString::from("pw".to_owned())),
            password_confirmation: Some(SecretString::from("pw".to_owned())),
            ..User::default()
        };
        assert!(user_request(&user, true).password.is_some());
        let without = user_request(&user, false);
        assert!(without.password.is_none());
        assert!(without.password_confirmation.is_none());
    }

    #[test]
    fn empty_content_date_is_absent() {
        let record = Record::from(wire::Record {
            id: "rec-1".into(),
            ..wire::Record::default()
        });
        assert_eq!(record.content_date, None);
        assert_eq!(record.review_state, "");
    }
}
