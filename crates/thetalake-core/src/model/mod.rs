// ── Caller-facing domain model ──
//
// Records exchanged with the reconciliation engine. Identifiers are
// strings, as the engine stores them; the wire types in
// `thetalake_api::types` are never exposed past the mappers.

pub mod archive;
pub mod case;
pub mod governance;
pub mod reporting;
pub mod user;

// ── Re-exports ──────────────────────────────────────────────────────

pub use archive::{Export, IntegrationState, Record};
pub use case::{Case, CaseRecordLink};
pub use governance::{DirectoryGroup, LegalHold, RetentionPolicy, Tag};
pub use reporting::{Analysis, AnalysisPolicy, AuditLog, Event, PolicyHit, SystemStatus};
pub use user::User;
