// ── Runtime session configuration ──
//
// Describes how to reach and authenticate against the control plane.
// Carries credentials and connection tuning but never touches disk; the
// CLI (or any embedding program) builds a `SessionConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use scom_api::{TlsMode, TransportConfig};
use secrecy::SecretString;
use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (lab endpoints with self-signed certs).
    DangerAcceptInvalid,
}

/// Everything needed to open one `Session`.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Control-plane base URL, e.g. `https://portal.servers.com`.
    pub endpoint: Url,
    /// Account email, sent as `X-User-Email`.
    pub email: String,
    /// Account password. Exchanged for a token at login and reused as the
    /// confirmation token of scheduled releases.
    pub password: SecretString,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl SessionConfig {
    pub fn new(endpoint: Url, email: impl Into<String>, password: SecretString) -> Self {
        Self {
            endpoint,
            email: email.into(),
            password,
            tls: TlsVerification::default(),
            timeout: scom_api::transport::DEFAULT_TIMEOUT,
        }
    }

    /// Transport settings for the API client of this session.
    pub fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}
