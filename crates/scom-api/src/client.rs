// Remote API HTTP client
//
// Wraps `reqwest::Client` with the control plane's authentication headers,
// URL construction, status classification, and `{ "data": ... }` envelope
// unwrapping. Endpoint groups (hosts, orders, dns, l2) are implemented as
// inherent methods in separate files to keep this module focused on
// transport mechanics.

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::DataEnvelope;
use crate::transport::{DEFAULT_TIMEOUT, TransportConfig};

/// Header carrying the account email on every authenticated call.
pub const EMAIL_HEADER: &str = "X-User-Email";
/// Header carrying the bearer token on every authenticated call.
pub const TOKEN_HEADER: &str = "X-User-Token";

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Authenticated HTTP client for the control-plane REST API.
///
/// Owns its `reqwest::Client` for the lifetime of one reconciliation
/// invocation. Every request is a single attempt: no retries, no backoff.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    email: String,
    token: SecretString,
    timeout_secs: u64,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client from a `TransportConfig` and an already issued token.
    pub fn new(
        base_url: Url,
        email: String,
        token: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            email,
            token,
            timeout_secs: transport.timeout_secs(),
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    ///
    /// The caller is responsible for the client's timeout; errors report
    /// the default 60 second budget.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        email: String,
        token: SecretString,
    ) -> Self {
        Self {
            http,
            base_url,
            email,
            token,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }

    /// Override the timeout reported by [`Error::Timeout`].
    pub(crate) fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// The endpoint base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The account email sent in `X-User-Email`.
    pub fn email(&self) -> &str {
        &self.email
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/rest/{path}`.
    ///
    /// `path` is appended verbatim, so the empty segments some endpoints
    /// require (`dns/records//`) survive.
    pub(crate) fn rest_url(&self, path: &str) -> Result<Url, Error> {
        endpoint_url(&self.base_url, &format!("rest/{path}"))
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send one authenticated request and classify the response.
    ///
    /// 200 and 201 return the raw body. Any other status becomes
    /// [`Error::Api`] with the body text; it is never decoded.
    pub async fn send(&self, method: Method, url: Url, body: Option<String>) -> Result<Bytes, Error> {
        debug!(%method, %url, "sending request");

        let mut builder = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(EMAIL_HEADER, self.email.as_str())
            .header(TOKEN_HEADER, self.token.expose_secret());
        if let Some(body) = body {
            // Bodies may carry the account secret; log the size only.
            trace!(len = body.len(), "request body");
            builder = builder.body(body);
        }

        let resp = builder.send().await.map_err(|e| self.classify(e))?;
        let status = resp.status();
        let payload = resp.bytes().await.map_err(|e| self.classify(e))?;

        if is_success(status) {
            Ok(payload)
        } else {
            debug!(status = status.as_u16(), "remote API rejected request");
            Err(Error::Api {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&payload).into_owned(),
            })
        }
    }

    /// GET a resource and unwrap the `{ "data": ... }` envelope.
    pub(crate) async fn get_data<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        let payload = self.send(Method::GET, url, None).await?;
        let envelope: DataEnvelope<T> = decode(&payload)?;
        Ok(envelope.data)
    }

    /// Send a JSON body and unwrap the `{ "data": ... }` envelope of the reply.
    pub(crate) async fn send_data<B, T>(&self, method: Method, url: Url, body: &B) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = self.send(method, url, Some(serde_json::to_string(body)?)).await?;
        let envelope: DataEnvelope<T> = decode(&payload)?;
        Ok(envelope.data)
    }

    /// Send a JSON body and discard the reply.
    pub(crate) async fn send_discard<B>(&self, method: Method, url: Url, body: &B) -> Result<(), Error>
    where
        B: Serialize + ?Sized,
    {
        self.send(method, url, Some(serde_json::to_string(body)?))
            .await
            .map(|_| ())
    }

    fn classify(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            Error::Transport(err)
        }
    }
}

/// Join a relative path onto the endpoint, tolerating a trailing slash on the base.
pub(crate) fn endpoint_url(base: &Url, path: &str) -> Result<Url, Error> {
    let base = base.as_str().trim_end_matches('/');
    Ok(Url::parse(&format!("{base}/{path}"))?)
}

pub(crate) fn is_success(status: StatusCode) -> bool {
    status == StatusCode::OK || status == StatusCode::CREATED
}

/// Decode a successful payload, keeping the raw body on failure.
pub(crate) fn decode<T: DeserializeOwned>(payload: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(payload).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: String::from_utf8_lossy(payload).into_owned(),
    })
}
