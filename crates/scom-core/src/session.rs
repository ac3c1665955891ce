// ── Authenticated session ──
//
// One login per process invocation. The session owns the API client (and
// with it the HTTP connection pool) plus the account password, which the
// release flow needs again as a confirmation token. There is no global
// client; controllers borrow the session.

use secrecy::SecretString;
use tracing::info;

use scom_api::ApiClient;

use crate::config::SessionConfig;
use crate::error::CoreError;
use crate::l2::L2SegmentController;
use crate::ptr::PtrController;
use crate::server::ServerController;

pub struct Session {
    client: ApiClient,
    account_secret: SecretString,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Log in and keep the resulting token for every later call.
    pub async fn establish(config: &SessionConfig) -> Result<Self, CoreError> {
        info!(endpoint = %config.endpoint, email = %config.email, "establishing session");
        let client = ApiClient::login(
            config.endpoint.clone(),
            &config.email,
            &config.password,
            &config.transport(),
        )
        .await?;
        Ok(Self::from_parts(client, config.password.clone()))
    }

    /// Assemble a session from an already authenticated client.
    pub fn from_parts(client: ApiClient, account_secret: SecretString) -> Self {
        Self {
            client,
            account_secret,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub(crate) fn account_secret(&self) -> &SecretString {
        &self.account_secret
    }

    // ── Controllers ──────────────────────────────────────────────────

    pub fn servers(&self) -> ServerController<'_> {
        ServerController::new(self)
    }

    pub fn ptr_records(&self) -> PtrController<'_> {
        PtrController::new(self)
    }

    pub fn l2_segments(&self) -> L2SegmentController<'_> {
        L2SegmentController::new(self)
    }
}
