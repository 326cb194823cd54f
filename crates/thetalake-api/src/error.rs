use thiserror::Error;

/// Top-level error type for the `thetalake-api` crate.
///
/// Covers every failure mode of the REST surface: construction-time
/// configuration, transport, unexpected HTTP status, response decoding,
/// and local validation that happens before any request is sent.
/// `thetalake-core` wraps these with the resource and operation that failed.
#[derive(Debug, Error)]
pub enum Error {
    // ── Configuration ───────────────────────────────────────────────
    /// The base endpoint is not an absolute http(s) URL.
    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// The bearer token is empty.
    #[error("API token must not be empty")]
    MissingToken,

    /// The underlying HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    // ── Status ──────────────────────────────────────────────────────
    /// The response status is outside the verb's accepted success set.
    #[error("{method} {path} returned status {status}, body: {body}")]
    UnexpectedStatus {
        method: String,
        path: String,
        status: u16,
        body: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Local validation ────────────────────────────────────────────
    /// Case status outside the OPEN / CLOSED vocabulary.
    #[error("invalid case status '{0}': expected OPEN or CLOSED")]
    InvalidCaseStatus(String),
}

impl Error {
    /// HTTP status carried by this error, if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the service reported the entity as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` if the request never got an HTTP answer in time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// Returns `true` if the connection could not be established.
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_connect())
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_status_reports_code_and_body() {
        let err = Error::UnexpectedStatus {
            method: "GET".into(),
            path: "/cases/7".into(),
            status: 404,
            body: r#"{"error":"not found"}"#.into(),
        };

        assert!(err.is_not_found());
        assert_eq!(err.status(), Some(404));
        assert_eq!(
            err.to_string(),
            r#"GET /cases/7 returned status 404, body: {"error":"not found"}"#
        );
    }

    #[test]
    fn validation_errors_carry_no_status() {
        let err = Error::InvalidCaseStatus("ARCHIVED".into());
        assert_eq!(err.status(), None);
        assert!(!err.is_not_found());
    }
}
