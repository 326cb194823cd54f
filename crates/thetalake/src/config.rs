//! Profile resolution with CLI flag / env overrides.
//!
//! The config crate owns the file format and the credential chain; this
//! module only decides which profile is active and lets `--endpoint`,
//! `--token` and `--timeout` win over it.

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;
use secrecy::SecretString;

use thetalake_config::{Config, Profile};
use thetalake_core::ConnectionConfig;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Config file path: `--config` / `THETALAKE_CONFIG`, else the platform path.
pub fn config_file(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(thetalake_config::config_path)
}

/// Load the config file selected by the global flags.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    Ok(thetalake_config::load_config_from(&config_file(global))?)
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Output format: `--output`, else the config default, else JSON.
pub fn output_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    global.output.unwrap_or_else(|| {
        OutputFormat::from_str(&config.defaults.output, true).unwrap_or(OutputFormat::Json)
    })
}

/// Build a `ConnectionConfig` from the active profile and global overrides.
///
/// Without a matching profile, `--endpoint` and `--token` must both be
/// given.
pub fn connection_config(
    global: &GlobalOpts,
    config: &Config,
) -> Result<ConnectionConfig, CliError> {
    let profile_name = active_profile_name(global, config);

    let Some(profile) = config.profiles.get(&profile_name) else {
        return flags_only(global, config, profile_name);
    };

    resolve_profile(profile, &profile_name, global, config)
}

/// Translate a profile plus global flags into a `ConnectionConfig`.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
    config: &Config,
) -> Result<ConnectionConfig, CliError> {
    // 1. Endpoint (flag > env > profile)
    let endpoint =
        thetalake_config::parse_endpoint(global.endpoint.as_deref().unwrap_or(&profile.endpoint))?;

    // 2. Token (flag > env > credential chain)
    let token = match global.token.as_deref().filter(|t| !t.is_empty()) {
        Some(token) => SecretString::from(token.to_owned()),
        None => thetalake_config::resolve_token(profile, profile_name)?,
    };

    // 3. Timeout (flag > env > profile > defaults)
    let timeout = global
        .timeout
        .or(profile.timeout)
        .unwrap_or(config.defaults.timeout);

    Ok(ConnectionConfig::new(endpoint, token).with_timeout(Duration::from_secs(timeout)))
}

fn flags_only(
    global: &GlobalOpts,
    config: &Config,
    profile_name: String,
) -> Result<ConnectionConfig, CliError> {
    let Some(endpoint) = global.endpoint.as_deref() else {
        // An explicitly requested profile that does not exist is its own error.
        if global.profile.is_some() {
            let mut available: Vec<&str> = config.profiles.keys().map(String::as_str).collect();
            available.sort_unstable();
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            });
        }
        return Err(CliError::NoConfig {
            path: config_file(global).display().to_string(),
        });
    };

    let endpoint = thetalake_config::parse_endpoint(endpoint)?;
    let token = global
        .token
        .clone()
        .filter(|t| !t.is_empty())
        .ok_or(CliError::NoCredentials {
            profile: profile_name,
        })?;
    let timeout = global.timeout.unwrap_or(config.defaults.timeout);

    Ok(ConnectionConfig::new(endpoint, SecretString::from(token))
        .with_timeout(Duration::from_secs(timeout)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;
    use secrecy::ExposeSecret;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["thetalake"];
        argv.extend_from_slice(args);
        argv.extend_from_slice(&["data", "system-status"]);
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config_with(name: &str, profile: Profile) -> Config {
        let mut config = Config::default();
        config.profiles.insert(name.into(), profile);
        config.default_profile = Some(name.into());
        config
    }

    #[test]
    fn flags_override_profile() {
        let config = config_with(
            "prod",
            Profile {
                endpoint: "https://profile.example.com".into(),
                token: Some("profile-token".into()),
                timeout: Some(10),
                ..Profile::default()
            },
        );
        let opts = global(&[
            "--endpoint",
            "https://flag.example.com/api",
            "--token",
            "flag-token",
            "--timeout",
            "5",
        ]);

        let resolved = connection_config(&opts, &config).unwrap();
        assert_eq!(resolved.endpoint.as_str(), "https://flag.example.com/api");
        assert_eq!(resolved.token.expose_secret(), "flag-token");
        assert_eq!(resolved.timeout, Duration::from_secs(5));
    }

    #[test]
    fn profile_timeout_beats_default() {
        let config = config_with(
            "prod",
            Profile {
                endpoint: "https://profile.example.com".into(),
                timeout: Some(10),
                ..Profile::default()
            },
        );
        let opts = global(&["--token", "flag-token"]);

        let resolved = connection_config(&opts, &config).unwrap();
        assert_eq!(resolved.timeout, Duration::from_secs(10));
    }

    #[test]
    fn flags_alone_are_enough() {
        let opts = global(&["--endpoint", "https://api.example.com", "--token", "t"]);
        let resolved = connection_config(&opts, &Config::default()).unwrap();
        assert_eq!(resolved.timeout, Duration::from_secs(60));
    }

    #[test]
    fn no_profile_and_no_endpoint_is_no_config() {
        let opts = global(&[]);
        let err = connection_config(&opts, &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::NoConfig { .. }));
    }

    #[test]
    fn unknown_explicit_profile_lists_available() {
        let config = config_with("prod", Profile::default());
        let opts = global(&["--profile", "staging"]);
        let err = connection_config(&opts, &config).unwrap_err();
        assert!(
            matches!(err, CliError::ProfileNotFound { ref available, .. } if available == "prod")
        );
    }

    #[test]
    fn endpoint_without_token_is_no_credentials() {
        let opts = global(&["--endpoint", "https://api.example.com"]);
        let err = connection_config(&opts, &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::NoCredentials { .. }));
    }

    #[test]
    fn output_falls_back_to_config_then_json() {
        let mut config = Config::default();
        config.defaults.output = "yaml".into();
        assert_eq!(output_format(&global(&[]), &config), OutputFormat::Yaml);
        assert_eq!(
            output_format(&global(&["-o", "table"]), &config),
            OutputFormat::Table
        );

        config.defaults.output = "bogus".into();
        assert_eq!(output_format(&global(&[]), &config), OutputFormat::Json);
    }
}
