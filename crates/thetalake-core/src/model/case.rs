// ── Case domain types ──

use serde::{Deserialize, Serialize};

/// A legal or compliance case.
///
/// `status` is the declared lifecycle status (`OPEN` or `CLOSED`). It is
/// only overwritten from the service when the service reports one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Association of an archived record with a case.
///
/// Has no identity of its own: the pair is the identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecordLink {
    pub case_id: String,
    pub record_id: String,
}
