//! Config subcommand handlers.

use dialoguer::{Input, Select};

use thetalake_config::{Config, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::commands::util::prompt_err;
use crate::config;
use crate::error::CliError;
use crate::output;

const REDACTED: &str = "<redacted>";

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(global),
        ConfigCommand::Show => show(global),
        ConfigCommand::SetToken { profile } => set_token(global, profile),
    }
}

// ── Init: interactive wizard ─────────────────────────────────────────

fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let config_path = config::config_file(global);
    eprintln!("Theta Lake CLI configuration wizard");
    eprintln!("   Config path: {}\n", config_path.display());

    let mut cfg = config::load(global)?;

    // 1. Profile name
    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default("default".into())
        .interact_text()
        .map_err(prompt_err)?;

    // 2. Endpoint, checked before anything is stored
    let endpoint: String = Input::new()
        .with_prompt("API endpoint URL")
        .interact_text()
        .map_err(prompt_err)?;
    thetalake_config::parse_endpoint(&endpoint)?;

    // 3. Token and where to keep it
    let store_choices = &[
        "Store token in system keyring (recommended)",
        "Read token from an environment variable",
        "Save token to config file (plaintext)",
    ];
    let store_selection = Select::new()
        .with_prompt("Where should the API token come from?")
        .items(store_choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    let mut profile = Profile {
        endpoint,
        ..Profile::default()
    };

    match store_selection {
        0 => {
            let token = prompt_token()?;
            thetalake_config::store_token(&profile_name, &token)?;
            eprintln!("   Token stored in system keyring");
        }
        1 => {
            let var: String = Input::new()
                .with_prompt("Environment variable name")
                .default("THETALAKE_API_TOKEN".into())
                .interact_text()
                .map_err(prompt_err)?;
            profile.token_env = Some(var);
        }
        _ => profile.token = Some(prompt_token()?),
    }

    // 4. Make it the default when nothing else is usable
    let default_usable = cfg
        .default_profile
        .as_ref()
        .is_some_and(|name| cfg.profiles.contains_key(name));
    if !default_usable {
        cfg.default_profile = Some(profile_name.clone());
    }
    cfg.profiles.insert(profile_name.clone(), profile);

    thetalake_config::save_config_to(&cfg, &config_path)?;

    eprintln!("\nConfiguration written to {}", config_path.display());
    eprintln!("  Profile: {profile_name}");
    eprintln!("\n  Test it: thetalake --profile {profile_name} data system-status");
    Ok(())
}

fn prompt_token() -> Result<String, CliError> {
    let token = rpassword::prompt_password("API token: ").map_err(prompt_err)?;
    if token.is_empty() {
        return Err(CliError::Validation {
            field: "token".into(),
            reason: "API token cannot be empty".into(),
        });
    }
    Ok(token)
}

// ── Show ─────────────────────────────────────────────────────────────

fn show(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load(global)?;
    let format = config::output_format(global, &cfg);
    let cfg = redacted(cfg);
    let out = output::render(format, &cfg)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn redacted(mut cfg: Config) -> Config {
    for profile in cfg.profiles.values_mut() {
        if profile.token.is_some() {
            profile.token = Some(REDACTED.into());
        }
    }
    cfg
}

// ── Set token ────────────────────────────────────────────────────────

fn set_token(global: &GlobalOpts, profile: Option<String>) -> Result<(), CliError> {
    let cfg = config::load(global)?;
    let profile_name = profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));

    if !cfg.profiles.contains_key(&profile_name) {
        eprintln!("Note: profile '{profile_name}' is not in the config file yet");
    }

    let token = prompt_token()?;
    thetalake_config::store_token(&profile_name, &token)?;
    eprintln!("Token for profile '{profile_name}' stored in system keyring");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_hides_plaintext_tokens() {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "prod".into(),
            Profile {
                endpoint: "https://api.example.com".into(),
                token: Some("secret".into()),
                ..Profile::default()
            },
        );
        cfg.profiles.insert(
            "env".into(),
            Profile {
                endpoint: "https://api.example.com".into(),
                token_env: Some("TL_TOKEN".into()),
                ..Profile::default()
            },
        );

        let shown = redacted(cfg);
        assert_eq!(shown.profiles["prod"].token.as_deref(), Some(REDACTED));
        assert_eq!(shown.profiles["env"].token, None);
        assert_eq!(shown.profiles["env"].token_env.as_deref(), Some("TL_TOKEN"));
    }
}
