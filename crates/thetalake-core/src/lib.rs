// thetalake-core: Lifecycle mappers and data sources between thetalake-api and consumers.

pub mod config;
pub mod connector;
pub mod convert;
pub mod data;
pub mod error;
pub mod model;
pub mod resource;
pub mod resources;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::ConnectionConfig;
pub use connector::Connector;
pub use data::DataSources;
pub use error::CoreError;
pub use resource::{Applied, Resource, Warning};
pub use thetalake_api::Error as ApiError;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    // Managed entities
    Case, CaseRecordLink, DirectoryGroup, Export, IntegrationState, LegalHold, Record,
    RetentionPolicy, Tag, User,
    // Reporting
    Analysis, AnalysisPolicy, AuditLog, Event, PolicyHit, SystemStatus,
};
