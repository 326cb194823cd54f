// ── Core error types ──
//
// Errors raised by the lifecycle mappers and data sources. API failures are
// wrapped with the resource kind and the operation that failed so the
// message reads "Unable to create case: ..."; the underlying
// `thetalake_api::Error` stays reachable as the error source.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── API errors ───────────────────────────────────────────────────
    #[error("Unable to {operation} {resource}: {source}")]
    Api {
        resource: &'static str,
        operation: &'static str,
        #[source]
        source: thetalake_api::Error,
    },

    #[error("Unable to {operation} {resource}: the service response carried no id")]
    MissingIdentifier {
        resource: &'static str,
        operation: &'static str,
    },

    // ── Local errors ─────────────────────────────────────────────────
    #[error("Invalid {resource}: {message}")]
    Validation {
        resource: &'static str,
        message: String,
    },

    #[error("{message}")]
    Unsupported {
        resource: &'static str,
        operation: &'static str,
        message: String,
    },

    #[error("Changing {attributes} of a {resource} requires replacing it")]
    RequiresReplacement {
        resource: &'static str,
        attributes: String,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Adapter for `map_err` that tags an API error with its context.
    pub fn api(
        resource: &'static str,
        operation: &'static str,
    ) -> impl FnOnce(thetalake_api::Error) -> Self {
        move |source| Self::Api {
            resource,
            operation,
            source,
        }
    }

    /// The wrapped API error, if this failure came from the service.
    pub fn api_error(&self) -> Option<&thetalake_api::Error> {
        match self {
            Self::Api { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Returns `true` if the service reported the entity as gone, so the
    /// caller can drop it from its state.
    pub fn is_not_found(&self) -> bool {
        self.api_error().is_some_and(thetalake_api::Error::is_not_found)
    }
}

// ── Conversion from construction-time API errors ─────────────────────

impl From<thetalake_api::Error> for CoreError {
    fn from(err: thetalake_api::Error) -> Self {
        match err {
            thetalake_api::Error::InvalidEndpoint { .. }
            | thetalake_api::Error::MissingToken
            | thetalake_api::Error::HttpClient(_) => CoreError::Config {
                message: err.to_string(),
            },
            other => CoreError::Api {
                resource: "connection",
                operation: "use",
                source: other,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn not_found() -> thetalake_api::Error {
        thetalake_api::Error::UnexpectedStatus {
            method: "GET".into(),
            path: "/tags/1".into(),
            status: 404,
            body: "missing".into(),
        }
    }

    #[test]
    fn api_errors_carry_resource_and_operation() {
        let err = CoreError::api("tag", "read")(not_found());
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "Unable to read tag: GET /tags/1 returned status 404, body: missing"
        );
    }

    #[test]
    fn local_errors_are_never_not_found() {
        let err = CoreError::Validation {
            resource: "case",
            message: "bad status".into(),
        };
        assert!(!err.is_not_found());
        assert!(err.api_error().is_none());
    }

    #[test]
    fn construction_errors_become_config_errors() {
        let err: CoreError = thetalake_api::Error::MissingToken.into();
        assert!(matches!(err, CoreError::Config { .. }));
    }
}
