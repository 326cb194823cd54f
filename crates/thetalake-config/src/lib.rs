//! Configuration for the Theta Lake connector.
//!
//! TOML profiles, token resolution (env + keyring + plaintext), and
//! endpoint checking. The CLI layers its flag overrides on top and builds
//! the connection from the result.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Service name under which tokens are kept in the system keyring.
pub const KEYRING_SERVICE: &str = "thetalake";

/// Prefix of environment variables overlaid on the config file.
pub const ENV_PREFIX: &str = "THETALAKE_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no API token configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("keyring error: {0}")]
    Keyring(String),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named tenant profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "json".into()
}
fn default_timeout() -> u64 {
    60
}

/// A named tenant profile.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// API base URL (e.g., "https://api.thetalake.com/api/v1").
    pub endpoint: String,

    /// API token (plaintext; prefer keyring or env var).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Environment variable name containing the API token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_env: Option<String>,

    /// Override timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "thetalake", "thetalake").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("thetalake");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from `path` + environment.
///
/// A missing file is not an error; defaults and environment still apply.
/// Nested keys use a double underscore, e.g.
/// `THETALAKE_PROFILES__PROD__ENDPOINT`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Token resolution ────────────────────────────────────────────────

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, ConfigError> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/token"))
        .map_err(|e| ConfigError::Keyring(e.to_string()))
}

/// Store a profile's token in the system keyring.
pub fn store_token(profile_name: &str, token: &str) -> Result<(), ConfigError> {
    keyring_entry(profile_name)?
        .set_password(token)
        .map_err(|e| ConfigError::Keyring(e.to_string()))
}

fn keyring_token(profile_name: &str) -> Option<String> {
    keyring_entry(profile_name).ok()?.get_password().ok()
}

/// Resolve a profile's API token from the credential chain.
pub fn resolve_token(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    resolve_token_with(
        profile,
        profile_name,
        |var| std::env::var(var).ok(),
        keyring_token,
    )
}

/// Credential chain with injectable lookups:
/// 1. `token_env` → environment variable
/// 2. system keyring entry `thetalake` / `<profile>/token`
/// 3. plaintext `token` in the profile
///
/// Empty values are skipped.
pub fn resolve_token_with(
    profile: &Profile,
    profile_name: &str,
    env: impl Fn(&str) -> Option<String>,
    keyring: impl Fn(&str) -> Option<String>,
) -> Result<SecretString, ConfigError> {
    let found = profile
        .token_env
        .as_deref()
        .and_then(&env)
        .filter(|t| !t.is_empty())
        .or_else(|| keyring(profile_name).filter(|t| !t.is_empty()))
        .or_else(|| profile.token.clone().filter(|t| !t.is_empty()));

    found
        .map(SecretString::from)
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })
}

// ── Translation ─────────────────────────────────────────────────────

/// Parse and check an endpoint string.
pub fn parse_endpoint(endpoint: &str) -> Result<url::Url, ConfigError> {
    let invalid = |reason: String| ConfigError::Validation {
        field: "endpoint".into(),
        reason,
    };

    if endpoint.trim().is_empty() {
        return Err(invalid("missing API endpoint".into()));
    }
    let url = url::Url::parse(endpoint.trim())
        .map_err(|e| invalid(format!("invalid URL '{endpoint}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!(
            "unsupported scheme '{}' in '{endpoint}'",
            url.scheme()
        )));
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn token_env_wins_over_keyring_and_plaintext() {
        let profile = Profile {
            endpoint: "https://api.thetalake.com".into(),
            token: Some("plain".into()),
            token_env: Some("TL_TOKEN".into()),
            timeout: None,
        };
        let token = resolve_token_with(
            &profile,
            "prod",
            |var| (var == "TL_TOKEN").then(|| "from-env".to_owned()),
            |_| Some("from-keyring".into()),
        )
        .unwrap();
        assert_eq!(token.expose_secret(), "from-env");
    }

    #[test]
    fn keyring_is_keyed_by_profile() {
        let profile = Profile {
            token: Some("plain".into()),
            ..Profile::default()
        };
        let token = resolve_token_with(&profile, "prod", no_env, |name| {
            (name == "prod").then(|| "from-keyring".to_owned())
        })
        .unwrap();
        assert_eq!(token.expose_secret(), "from-keyring");
    }

    #[test]
    fn plaintext_is_the_last_resort() {
        let profile = Profile {
            token: Some("plain".into()),
            token_env: Some("UNSET".into()),
            ..Profile::default()
        };
        let token = resolve_token_with(&profile, "prod", no_env, |_| None).unwrap();
        assert_eq!(token.expose_secret(), "plain");
    }

    #[test]
    fn missing_token_is_no_credentials() {
        let profile = Profile {
            token: Some(String::new()),
            ..Profile::default()
        };
        let err = resolve_token_with(&profile, "staging", no_env, |_| None).unwrap_err();
        assert!(matches!(err, ConfigError::NoCredentials { ref profile } if profile == "staging"));
    }

    #[test]
    fn endpoint_is_required_and_http() {
        assert!(matches!(
            parse_endpoint("  "),
            Err(ConfigError::Validation { ref reason, .. }) if reason == "missing API endpoint"
        ));
        assert!(parse_endpoint("ftp://example.com").is_err());
        assert!(parse_endpoint("api.thetalake.com").is_err());
        assert_eq!(
            parse_endpoint("https://api.thetalake.com/api/v1").unwrap().path(),
            "/api/v1"
        );
    }

    #[test]
    fn config_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.profiles.insert(
            "prod".into(),
            Profile {
                endpoint: "https://api.thetalake.com/api/v1".into(),
                token_env: Some("TL_TOKEN".into()),
                timeout: Some(30),
                ..Profile::default()
            },
        );
        cfg.default_profile = Some("prod".into());
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.default_profile.as_deref(), Some("prod"));
        assert_eq!(loaded.profiles["prod"], cfg.profiles["prod"]);
        assert_eq!(loaded.defaults.timeout, 60);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded.defaults.output, "json");
        assert!(loaded.profiles.is_empty());
    }
}
