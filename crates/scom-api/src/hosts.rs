// Host endpoints
//
// Active hosts (`/rest/hosts`), hosts still being provisioned
// (`/rest/hosts_pending`), the title-filtered lookup, and scheduled release.

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Host, ScheduleReleaseRequest};

impl ApiClient {
    /// List all active hosts.
    ///
    /// `GET /rest/hosts`
    pub async fn list_hosts(&self) -> Result<Vec<Host>, Error> {
        let url = self.rest_url("hosts")?;
        debug!("listing hosts");
        self.get_data(url).await
    }

    /// List hosts that are ordered but not yet delivered.
    ///
    /// `GET /rest/hosts_pending`
    pub async fn list_pending_hosts(&self) -> Result<Vec<Host>, Error> {
        let url = self.rest_url("hosts_pending")?;
        debug!("listing pending hosts");
        self.get_data(url).await
    }

    /// Hosts whose title matches, filtered server-side.
    ///
    /// `GET /rest/hosts?title={title}`
    pub async fn find_hosts_by_title(&self, title: &str) -> Result<Vec<Host>, Error> {
        let mut url = self.rest_url("hosts")?;
        url.query_pairs_mut().append_pair("title", title);
        debug!(title, "looking up host by title");
        self.get_data(url).await
    }

    /// Mark a host for release at the end of its lease.
    ///
    /// `POST /rest/hosts/{id}/schedule_release` with `{"token": <password>}`.
    /// The account password doubles as the confirmation token.
    pub async fn schedule_release(&self, host_id: u64, confirmation: &SecretString) -> Result<(), Error> {
        let url = self.rest_url(&format!("hosts/{host_id}/schedule_release"))?;
        debug!(host_id, "scheduling host release");
        let body = ScheduleReleaseRequest {
            token: confirmation.expose_secret(),
        };
        self.send_discard(Method::POST, url, &body).await
    }
}
