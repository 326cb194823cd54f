// One lifecycle mapper per managed entity kind.

pub mod archive;
pub mod case;
pub mod case_record;
pub mod governance;
pub mod user;

pub use archive::{ExportResource, IntegrationStateResource, RecordResource};
pub use case::CaseResource;
pub use case_record::CaseRecordResource;
pub use governance::{
    DirectoryGroupResource, LegalHoldResource, RetentionPolicyResource, TagResource,
};
pub use user::UserResource;
