//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with help text
//! and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use thetalake_config::ConfigError;
use thetalake_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the Theta Lake API")]
    #[diagnostic(
        code(thetalake::connection_failed),
        help("Check the endpoint URL and network access, or pass --endpoint.")
    )]
    ConnectionFailed {
        #[source]
        source: CoreError,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(thetalake::timeout),
        help("Increase the timeout with --timeout or the profile's `timeout` key.")
    )]
    Timeout {
        #[source]
        source: CoreError,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed (HTTP {status})")]
    #[diagnostic(
        code(thetalake::auth_failed),
        help(
            "Verify the API token for this tenant.\n\
             Run: thetalake config set-token"
        )
    )]
    AuthFailed {
        status: u16,
        #[source]
        source: CoreError,
    },

    #[error("No API token configured for profile '{profile}'")]
    #[diagnostic(
        code(thetalake::no_credentials),
        help(
            "Configure one with: thetalake config init\n\
             Or set the THETALAKE_TOKEN environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource} not found")]
    #[diagnostic(
        code(thetalake::not_found),
        help("The entity no longer exists on the service; drop it from stored state.")
    )]
    NotFound {
        resource: String,
        #[source]
        source: CoreError,
    },

    #[error("{message}")]
    #[diagnostic(code(thetalake::unsupported))]
    Unsupported { message: String },

    #[error(transparent)]
    #[diagnostic(code(thetalake::api_error))]
    Core(CoreError),

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(thetalake::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(thetalake::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: thetalake config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No API endpoint configured")]
    #[diagnostic(
        code(thetalake::no_config),
        help(
            "Create a profile with: thetalake config init\n\
             Or pass --endpoint / THETALAKE_ENDPOINT.\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(thetalake::config))]
    Config(ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(thetalake::render))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. }
            | Self::Unsupported { .. }
            | Self::ProfileNotFound { .. }
            | Self::NoConfig { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { resource, message } => CliError::Validation {
                field: resource.into(),
                reason: message,
            },
            CoreError::Unsupported { message, .. } => CliError::Unsupported { message },
            CoreError::Api { resource, .. } => classify_api(resource, err),
            other => CliError::Core(other),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config(other),
        }
    }
}

/// Pick the diagnostic for a service failure from its transport cause or
/// status code.
fn classify_api(resource: &str, err: CoreError) -> CliError {
    let (connect, timeout, status) = err.api_error().map_or((false, false, None), |e| {
        (e.is_connect(), e.is_timeout(), e.status())
    });

    match status {
        _ if connect => CliError::ConnectionFailed { source: err },
        _ if timeout => CliError::Timeout { source: err },
        Some(status @ (401 | 403)) => CliError::AuthFailed {
            status,
            source: err,
        },
        Some(404) => CliError::NotFound {
            resource: capitalize(resource),
            source: err,
        },
        _ => CliError::Core(err),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
