// Token exchange
//
// Credentials (endpoint, account email, password) are traded once for a
// bearer token at `POST /p/login_token`. The token has no tracked expiry;
// a stale token only shows up later as a 401/403 `Error::Api`.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::client::{ApiClient, decode, endpoint_url, is_success};
use crate::error::Error;
use crate::transport::TransportConfig;

const LOGIN_PATH: &str = "p/login_token";

#[derive(Deserialize)]
struct LoginToken {
    token: String,
}

impl ApiClient {
    /// Authenticate and return a client carrying the issued token.
    ///
    /// The `reqwest::Client` built for the login is reused for every
    /// subsequent call of this session.
    pub async fn login(
        base_url: Url,
        email: &str,
        password: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let token = request_token(&http, &base_url, email, password)
            .await
            .map_err(|e| match e {
                Error::Transport(ref inner) if inner.is_timeout() => Error::Timeout {
                    timeout_secs: transport.timeout_secs(),
                },
                other => other,
            })?;
        Ok(Self::with_client(http, base_url, email.to_owned(), token)
            .with_timeout_secs(transport.timeout_secs()))
    }
}

/// Exchange credentials for a bearer token.
///
/// `POST {endpoint}/p/login_token` with form fields `email` and `pwd`.
/// 200/201 decode `{"token": "..."}`; any other status is
/// [`Error::LoginFailed`].
pub async fn request_token(
    http: &reqwest::Client,
    base_url: &Url,
    email: &str,
    password: &SecretString,
) -> Result<SecretString, Error> {
    let url = endpoint_url(base_url, LOGIN_PATH)?;
    debug!(%url, email, "requesting login token");

    let resp = http
        .post(url)
        .form(&[("email", email), ("pwd", password.expose_secret())])
        .send()
        .await?;

    let status = resp.status();
    if !is_success(status) {
        debug!(status = status.as_u16(), "login rejected");
        return Err(Error::LoginFailed {
            status: status.as_u16(),
        });
    }

    let payload = resp.bytes().await?;
    let LoginToken { token } = decode(&payload)?;
    debug!("login successful");
    Ok(SecretString::from(token))
}
