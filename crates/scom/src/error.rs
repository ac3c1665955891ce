//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use scom_config::ConfigError;
use scom_core::{ConsistencyError, CoreError, ResourceKind};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the control plane: {reason}")]
    #[diagnostic(
        code(scom::connection_failed),
        help(
            "Check the endpoint URL and your network connection.\n\
             Use --insecure (-k) for lab endpoints with self-signed certificates."
        )
    )]
    ConnectionFailed { reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed (HTTP {status})")]
    #[diagnostic(
        code(scom::auth_failed),
        help(
            "Verify the account email and password.\n\
             Store the password with: scom config set-password"
        )
    )]
    AuthFailed { status: u16 },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(scom::no_credentials),
        help(
            "Set SCOM_PASSWORD, pass --email and --password,\n\
             or store the password with: scom config set-password --profile {profile}"
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(scom::not_found),
        help("Run: scom {list_command} to see what exists")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("{message}")]
    #[diagnostic(code(scom::conflict), help("{detail}"))]
    Conflict { message: String, detail: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Remote API error (HTTP {status})")]
    #[diagnostic(code(scom::api_error), help("Response body: {body}"))]
    ApiError { status: u16, body: String },

    #[error("Unexpected response from the control plane: {message}")]
    #[diagnostic(code(scom::unexpected_response))]
    UnexpectedResponse { message: String },

    #[error("Deletion of L2 segment {segment_id} was not confirmed")]
    #[diagnostic(
        code(scom::unconfirmed),
        help("Run: scom l2 show {segment_id} to check whether it is gone")
    )]
    Unconfirmed { segment_id: u64 },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(scom::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(scom::profile_not_found),
        help("Available profiles: {available}")
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration file not found")]
    #[diagnostic(
        code(scom::no_config),
        help(
            "Pass --endpoint, --email and --password, or create a profile.\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(scom::config))]
    Config(Box<ConfigError>),

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(scom::timeout),
        help("Increase timeout with --timeout or check endpoint responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::ProfileNotFound { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

fn list_command(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Server => "servers list",
        ResourceKind::PtrRecord => "ptr list",
        ResourceKind::L2Segment => "l2 list",
    }
}

fn consistency_detail(err: &ConsistencyError) -> String {
    match err {
        ConsistencyError::MixedLocation { locations } => format!(
            "Members resolved to locations {locations:?}; all members of a segment must share one."
        ),
        ConsistencyError::IncompleteHostResolution { missing } => format!(
            "Not yet active: {}. Wait for provisioning or check: scom servers pending",
            missing.join(", ")
        ),
        ConsistencyError::AmbiguousHostname { hostname, matches } => {
            format!("{matches} active servers are titled '{hostname}'; rename one of them.")
        }
        ConsistencyError::HostnameInUse { hostname } => format!(
            "'{hostname}' is held by an active server, a pending server or a live order.\n\
             Check: scom servers in-use {hostname}"
        ),
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let text = err.to_string();
        let auth_rejected = err.is_auth_rejected();
        match err {
            CoreError::LoginFailed { status } => CliError::AuthFailed { status },

            CoreError::Transport { message } => CliError::ConnectionFailed { reason: message },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::RemoteApi { status, .. } if auth_rejected => CliError::AuthFailed { status },

            CoreError::RemoteApi { status, body } => CliError::ApiError { status, body },

            CoreError::Decode { message, .. } => CliError::UnexpectedResponse { message },

            CoreError::NotFound { kind, identifier } => CliError::NotFound {
                resource_type: kind.to_string(),
                identifier,
                list_command: list_command(kind).into(),
            },

            CoreError::Consistency(inner) => CliError::Conflict {
                message: text,
                detail: consistency_detail(&inner),
            },

            CoreError::InvalidStatus { segment_id, .. } => CliError::Conflict {
                message: text,
                detail: format!("Wait until the segment is active. Check: scom l2 show {segment_id}"),
            },

            CoreError::AlreadyScheduled { .. } => CliError::Conflict {
                message: text,
                detail: "The server will be released at the end of its lease.".into(),
            },

            CoreError::NoPublicNetwork { .. } => CliError::Conflict {
                message: text,
                detail: "PTR records can only be bound to a public address.".into(),
            },

            CoreError::DeletionNotConfirmed { segment_id } => CliError::Unconfirmed { segment_id },

            CoreError::Validation { field, reason } => CliError::Validation { field, reason },

            CoreError::Config { message } => CliError::Validation {
                field: "configuration".into(),
                reason: message,
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(Box::new(other)),
        }
    }
}
