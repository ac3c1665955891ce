//! CLI configuration -- thin wrapper around `scom_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--endpoint, --email, etc.).

use std::time::Duration;

use secrecy::SecretString;

use scom_core::{SessionConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use scom_config::{Config, Defaults, Profile, config_path, load_config};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build a `SessionConfig` from the config file, profile, and CLI overrides.
pub fn build_session_config(global: &GlobalOpts) -> Result<SessionConfig, CliError> {
    let cfg = load_config()?;
    let profile_name = active_profile_name(global, &cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        return resolve_profile(profile, &profile_name, global, &cfg.defaults);
    }

    // An explicitly requested profile must exist.
    if global.profile.is_some() && global.endpoint.is_none() {
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

    // No profile -- build from CLI flags / env vars alone
    let endpoint = global.endpoint.as_deref().ok_or_else(|| CliError::NoConfig {
        path: config_path().display().to_string(),
    })?;
    let endpoint = scom_config::parse_endpoint(endpoint)?;

    let (Some(email), Some(password)) = (global.email.clone(), global.password.clone()) else {
        return Err(CliError::NoCredentials {
            profile: profile_name,
        });
    };

    let mut config = SessionConfig::new(endpoint, email, SecretString::from(password));
    if global.insecure || cfg.defaults.insecure {
        config.tls = TlsVerification::DangerAcceptInvalid;
    }
    config.timeout = Duration::from_secs(global.timeout.unwrap_or(cfg.defaults.timeout));
    Ok(config)
}

/// Translate a `Profile` + global flags into a `SessionConfig`.
///
/// CLI flag overrides take priority over profile values.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
    defaults: &Defaults,
) -> Result<SessionConfig, CliError> {
    let mut effective = profile.clone();

    // 1. Endpoint and email (flag > env > profile)
    if let Some(ref endpoint) = global.endpoint {
        effective.endpoint.clone_from(endpoint);
    }
    if let Some(ref email) = global.email {
        effective.email.clone_from(email);
    }

    // 2. TLS and timeout
    if global.insecure {
        effective.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        effective.timeout = Some(timeout);
    }

    // 3. Password (flag > profile chain)
    let password = match global.password {
        Some(ref pw) => SecretString::from(pw.clone()),
        None => scom_config::resolve_password(profile, profile_name)?,
    };

    Ok(scom_config::session_config_with_password(
        &effective, defaults, password,
    )?)
}
