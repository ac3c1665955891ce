use thiserror::Error;

/// Top-level error type for the `scom-api` crate.
///
/// Covers every failure mode of the remote API surface: login,
/// transport, non-success HTTP responses, and payload decoding.
/// `scom-core` maps these into its reconciliation error taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The login endpoint answered with something other than 200/201.
    #[error("Login failed with HTTP status {status}")]
    LoginFailed { status: u16 },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS setup or HTTP client construction failed.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Remote API ──────────────────────────────────────────────────
    /// Any HTTP status other than 200/201. `body` is the raw response text.
    #[error("Remote API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization of a successful response failed, with the raw body.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// A request body could not be encoded as JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_carries_status_and_body() {
        let err = Error::Api {
            status: 422,
            body: "{\"message\":\"bad hostname\"}".into(),
        };
        assert!(err.to_string().contains("422"));
        assert!(err.to_string().contains("bad hostname"));
    }
}
