//! Config subcommand handlers.

use std::path::Path;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Defaults, Profile};
use crate::error::CliError;
use crate::output;

const MASK: &str = "********";

// ── Helpers ─────────────────────────────────────────────────────────

/// Copy of the config with plaintext passwords masked.
fn redacted(cfg: &Config) -> Config {
    Config {
        default_profile: cfg.default_profile.clone(),
        defaults: Defaults {
            output: cfg.defaults.output.clone(),
            insecure: cfg.defaults.insecure,
            timeout: cfg.defaults.timeout,
        },
        profiles: cfg
            .profiles
            .iter()
            .map(|(name, profile)| {
                let masked = Profile {
                    password: profile.password.as_ref().map(|_| MASK.into()),
                    ..profile.clone()
                };
                (name.clone(), masked)
            })
            .collect(),
    }
}

fn read_password_file(path: &Path) -> Result<String, CliError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(raw.trim_end_matches(['\r', '\n']).to_owned())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = redacted(&config::load_config()?);
            let out = output::render_single(
                &global.output,
                &cfg,
                |c| toml::to_string_pretty(c).unwrap_or_else(|e| format!("{c:#?}\n# {e}")),
                |_| "config".into(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::SetPassword { profile, from_file } => {
            let cfg = config::load_config()?;
            let profile_name = profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));

            if !cfg.profiles.contains_key(&profile_name) {
                let mut available: Vec<_> = cfg.profiles.keys().cloned().collect();
                available.sort();
                return Err(CliError::ProfileNotFound {
                    name: profile_name,
                    available: if available.is_empty() {
                        "(none)".into()
                    } else {
                        available.join(", ")
                    },
                });
            }

            let secret = match (from_file, global.password.as_ref()) {
                (Some(path), _) => read_password_file(&path)?,
                (None, Some(pw)) => pw.clone(),
                (None, None) => {
                    return Err(CliError::Validation {
                        field: "password".into(),
                        reason: "set SCOM_PASSWORD or pass --from-file".into(),
                    });
                }
            };

            if secret.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "password cannot be empty".into(),
                });
            }

            scom_config::store_password(&profile_name, &secret)?;
            output::print_status(
                &format!("Password for profile '{profile_name}' stored in the system keyring"),
                global.quiet,
            );
            Ok(())
        }
    }
}
