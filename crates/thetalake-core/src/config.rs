// ── Runtime connection configuration ──
//
// Describes *how* to reach a Theta Lake tenant. Carries the credential
// but never touches disk; the CLI builds a `ConnectionConfig` from its
// profiles and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// Configuration for connecting to the Theta Lake API.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// API base, e.g. `https://api.thetalake.com/api/v1`.
    pub endpoint: Url,
    /// Bearer token.
    pub token: SecretString,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ConnectionConfig {
    pub fn new(endpoint: Url, token: SecretString) -> Self {
        Self {
            endpoint,
            token,
            timeout: thetalake_api::DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
