// Transport configuration for building the reqwest::Client behind
// ThetaLakeClient, plus the verb-specific status classification every
// typed operation goes through.

use std::time::Duration;

use reqwest::{Method, StatusCode};

/// Request timeout applied when the caller does not override it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const USER_AGENT: &str = concat!("thetalake-api/", env!("CARGO_PKG_VERSION"));

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl TransportConfig {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Build a `reqwest::Client` from this config.
    ///
    /// Only the timeout is tunable; no retry or pool settings are exposed.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| crate::error::Error::HttpClient(e.to_string()))
    }
}

/// Whether `status` counts as success for a request sent with `method`.
///
/// GET and PUT accept 200 only, POST accepts 200 or 201, DELETE accepts
/// 200 or 204. Nothing else is a success, including other 2xx codes.
pub fn accepts(method: &Method, status: StatusCode) -> bool {
    match *method {
        Method::POST => matches!(status, StatusCode::OK | StatusCode::CREATED),
        Method::DELETE => matches!(status, StatusCode::OK | StatusCode::NO_CONTENT),
        _ => status == StatusCode::OK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_and_put_accept_only_ok() {
        for method in [Method::GET, Method::PUT] {
            assert!(accepts(&method, StatusCode::OK));
            assert!(!accepts(&method, StatusCode::CREATED));
            assert!(!accepts(&method, StatusCode::NO_CONTENT));
            assert!(!accepts(&method, StatusCode::NOT_FOUND));
        }
    }

    #[test]
    fn post_accepts_ok_and_created() {
        assert!(accepts(&Method::POST, StatusCode::OK));
        assert!(accepts(&Method::POST, StatusCode::CREATED));
        assert!(!accepts(&Method::POST, StatusCode::ACCEPTED));
        assert!(!accepts(&Method::POST, StatusCode::NO_CONTENT));
    }

    #[test]
    fn delete_accepts_ok_and_no_content() {
        assert!(accepts(&Method::DELETE, StatusCode::OK));
        assert!(accepts(&Method::DELETE, StatusCode::NO_CONTENT));
        assert!(!accepts(&Method::DELETE, StatusCode::CREATED));
        assert!(!accepts(&Method::DELETE, StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn default_timeout_is_sixty_seconds() {
        assert_eq!(TransportConfig::default().timeout, Duration::from_secs(60));
    }
}
