// thetalake-api: Async Rust client for the Theta Lake REST API

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::{RawResponse, ThetaLakeClient};
pub use error::Error;
pub use transport::{DEFAULT_TIMEOUT, TransportConfig};
pub use types::{CaseStatus, IntegrationStatus};
