// ── Core error types ──
//
// Errors surfaced by the controllers. Each variant carries the structured
// context (hostname, id, status, HTTP code) a caller needs to react
// without parsing messages. The `From<scom_api::Error>` impl translates
// transport-layer failures. Nothing here is retried.

use thiserror::Error;

use crate::resource::ResourceKind;

/// The controller operation an error occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

/// Violations of the cross-resource invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    /// Segment members resolved to more than one location.
    #[error("Hosts have different locations.")]
    MixedLocation { locations: Vec<u64> },

    /// Some declared segment members are not active servers (yet).
    #[error("Not all hosts are ready.")]
    IncompleteHostResolution { missing: Vec<String> },

    /// One hostname matched several servers.
    #[error("Hostname {hostname} matches {matches} servers")]
    AmbiguousHostname { hostname: String, matches: usize },

    /// The hostname is taken by an active server, a pending server or a
    /// live order.
    #[error("Order cannot be created: hostname {hostname} is not unique")]
    HostnameInUse { hostname: String },
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Session errors ───────────────────────────────────────────────
    #[error("Login failed with HTTP status {status}")]
    LoginFailed { status: u16 },

    #[error("Cannot reach the control plane: {message}")]
    Transport { message: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Remote API errors ────────────────────────────────────────────
    #[error("Remote API error (HTTP {status}): {body}")]
    RemoteApi { status: u16, body: String },

    #[error("Unexpected response payload: {message}")]
    Decode { message: String, body: String },

    // ── Reconciliation errors ────────────────────────────────────────
    #[error("{kind} not found: {identifier}")]
    NotFound {
        kind: ResourceKind,
        identifier: String,
    },

    #[error(transparent)]
    Consistency(#[from] ConsistencyError),

    #[error("Cannot {operation} L2 segment {segment_id}: status is \"{status}\", expected \"active\"")]
    InvalidStatus {
        segment_id: u64,
        status: String,
        operation: Operation,
    },

    #[error("Server {hostname} is already in cancellation state")]
    AlreadyScheduled { hostname: String },

    #[error("Server {hostname} has no public network")]
    NoPublicNetwork { hostname: String },

    #[error("Deletion of L2 segment {segment_id} was not confirmed")]
    DeletionNotConfirmed { segment_id: u64 },

    // ── Input errors ─────────────────────────────────────────────────
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    pub(crate) fn not_found(kind: ResourceKind, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            identifier: identifier.into(),
        }
    }

    pub(crate) fn validation(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_owned(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if the credentials or token were rejected.
    pub fn is_auth_rejected(&self) -> bool {
        matches!(self, Self::LoginFailed { .. })
            || matches!(self, Self::RemoteApi { status: 401 | 403, .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<scom_api::Error> for CoreError {
    fn from(err: scom_api::Error) -> Self {
        match err {
            scom_api::Error::LoginFailed { status } => CoreError::LoginFailed { status },
            scom_api::Error::Transport(e) => CoreError::Transport {
                message: e.to_string(),
            },
            scom_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            scom_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            scom_api::Error::Tls(msg) => CoreError::Transport {
                message: format!("TLS error: {msg}"),
            },
            scom_api::Error::Api { status, body } => CoreError::RemoteApi { status, body },
            scom_api::Error::Deserialization { message, body } => {
                CoreError::Decode { message, body }
            }
            scom_api::Error::Serialization(e) => CoreError::Validation {
                field: "request body".into(),
                reason: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consistency_messages_are_stable() {
        let mixed: CoreError = ConsistencyError::MixedLocation {
            locations: vec![10, 12],
        }
        .into();
        assert_eq!(mixed.to_string(), "Hosts have different locations.");

        let incomplete: CoreError = ConsistencyError::IncompleteHostResolution {
            missing: vec!["web-02".into()],
        }
        .into();
        assert_eq!(incomplete.to_string(), "Not all hosts are ready.");
    }

    #[test]
    fn api_rejection_keeps_status_and_body() {
        let err: CoreError = scom_api::Error::Api {
            status: 409,
            body: "conflict".into(),
        }
        .into();
        assert!(matches!(
            err,
            CoreError::RemoteApi { status: 409, ref body } if body == "conflict"
        ));
    }

    #[test]
    fn invalid_status_names_operation() {
        let err = CoreError::InvalidStatus {
            segment_id: 4,
            status: "pending".into(),
            operation: Operation::Delete,
        };
        assert_eq!(
            err.to_string(),
            "Cannot delete L2 segment 4: status is \"pending\", expected \"active\""
        );
    }
}
