// ── Server controller ──
//
// Servers are identified by hostname. A hostname is "in use" while an
// active server, a pending server or a live (not cancelled) order claims
// it. Creation is cart + checkout; deletion is a scheduled release that
// takes effect at the end of the lease.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use scom_api::{Host, Order};

use crate::error::{ConsistencyError, CoreError};
use crate::resource::{Applied, Resource, ResourceKind};
use crate::session::Session;

/// Placeholder in a cart template that receives the hostname.
pub const HOSTNAME_PLACEHOLDER: &str = "%s";

/// Declared server: hostname plus the cart template to order it with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSpec {
    pub hostname: String,
    /// JSON cart item with `%s` wherever the hostname goes.
    pub config: String,
}

/// Observed server fields. Only the hostname is tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerState {
    pub hostname: String,
}

/// Render the cart body for `hostname`.
///
/// Every `%s` is replaced. A template without a placeholder, or one that
/// does not render to valid JSON, is rejected before any remote call.
pub fn render_cart_template(template: &str, hostname: &str) -> Result<String, CoreError> {
    if hostname.trim().is_empty() {
        return Err(CoreError::validation("hostname", "must not be empty"));
    }
    if !template.contains(HOSTNAME_PLACEHOLDER) {
        return Err(CoreError::validation(
            "config",
            "template has no %s hostname placeholder",
        ));
    }
    let rendered = template.replace(HOSTNAME_PLACEHOLDER, hostname);
    serde_json::from_str::<serde_json::Value>(&rendered).map_err(|e| {
        CoreError::validation("config", format!("rendered template is not valid JSON: {e}"))
    })?;
    Ok(rendered)
}

/// Reconciles declared servers against the control plane.
#[derive(Debug, Clone, Copy)]
pub struct ServerController<'a> {
    session: &'a Session,
}

impl<'a> ServerController<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub async fn list_servers(&self) -> Result<Vec<Host>, CoreError> {
        Ok(self.session.client().list_hosts().await?)
    }

    pub async fn list_pending_servers(&self) -> Result<Vec<Host>, CoreError> {
        Ok(self.session.client().list_pending_hosts().await?)
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, CoreError> {
        Ok(self.session.client().list_orders().await?)
    }

    /// The live server titled `hostname`, if any.
    ///
    /// The remote side filters by title; more than one returned server is
    /// an `AmbiguousHostname` consistency error.
    pub async fn find_server_by_hostname(&self, hostname: &str) -> Result<Option<Host>, CoreError> {
        let mut matches = self.session.client().find_hosts_by_title(hostname).await?;

        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            n => Err(ConsistencyError::AmbiguousHostname {
                hostname: hostname.to_owned(),
                matches: n,
            }
            .into()),
        }
    }

    /// Whether an active server, a pending server or a non-cancelled order
    /// already claims `hostname`.
    ///
    /// Sources are consulted in that order and the first hit answers.
    pub async fn hostname_in_use(&self, hostname: &str) -> Result<bool, CoreError> {
        if self.list_servers().await?.iter().any(|h| h.title == hostname) {
            debug!(hostname, "hostname held by an active server");
            return Ok(true);
        }
        if self
            .list_pending_servers()
            .await?
            .iter()
            .any(|h| h.title == hostname)
        {
            debug!(hostname, "hostname held by a pending server");
            return Ok(true);
        }
        let in_order = self
            .list_orders()
            .await?
            .iter()
            .any(|o| !o.is_cancelled() && o.lists_hostname(hostname));
        if in_order {
            debug!(hostname, "hostname held by a live order");
        }
        Ok(in_order)
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Order a server: uniqueness check, cart, checkout.
    ///
    /// A checkout failure after a successful cart add is not rolled back.
    pub async fn order(&self, spec: &ServerSpec) -> Result<Applied<ServerState>, CoreError> {
        let body = render_cart_template(&spec.config, &spec.hostname)?;

        if self.hostname_in_use(&spec.hostname).await? {
            return Err(ConsistencyError::HostnameInUse {
                hostname: spec.hostname.clone(),
            }
            .into());
        }

        let client = self.session.client();
        client.add_to_cart(body).await?;
        if let Err(e) = client.checkout().await {
            warn!(
                hostname = %spec.hostname,
                error = %e,
                "checkout failed after the cart add; the cart item is left in place"
            );
            return Err(e.into());
        }

        info!(hostname = %spec.hostname, "server ordered");
        Ok(Applied::new(
            spec.hostname.clone(),
            ServerState {
                hostname: spec.hostname.clone(),
            },
        ))
    }

    /// Report the hostname while anything still claims it.
    pub async fn observe(&self, hostname: &str) -> Result<Applied<ServerState>, CoreError> {
        if !self.hostname_in_use(hostname).await? {
            return Err(CoreError::not_found(ResourceKind::Server, hostname));
        }
        Ok(Applied::new(
            hostname,
            ServerState {
                hostname: hostname.to_owned(),
            },
        ))
    }

    /// Schedule the release of the live server `hostname`.
    ///
    /// The account password is sent again as the confirmation token.
    pub async fn release(&self, hostname: &str) -> Result<(), CoreError> {
        let Some(server) = self.find_server_by_hostname(hostname).await? else {
            return Err(CoreError::not_found(ResourceKind::Server, hostname));
        };
        if server.is_release_scheduled() {
            return Err(CoreError::AlreadyScheduled {
                hostname: hostname.to_owned(),
            });
        }

        self.session
            .client()
            .schedule_release(server.id, self.session.account_secret())
            .await?;
        info!(hostname, server_id = server.id, "server release scheduled");
        Ok(())
    }
}

impl Resource for ServerController<'_> {
    type Spec = ServerSpec;
    type State = ServerState;

    const KIND: ResourceKind = ResourceKind::Server;

    async fn create(&self, spec: &ServerSpec) -> Result<Applied<ServerState>, CoreError> {
        self.order(spec).await
    }

    async fn read(&self, id: &str, _spec: &ServerSpec) -> Result<Applied<ServerState>, CoreError> {
        self.observe(id).await
    }

    /// A hostname change releases the old server and orders a new one.
    /// Other changes (including the template) are not propagated.
    async fn update(
        &self,
        id: &str,
        prior: Option<&ServerSpec>,
        spec: &ServerSpec,
    ) -> Result<Applied<ServerState>, CoreError> {
        let current = prior.map_or(id, |p| p.hostname.as_str());
        if current == spec.hostname {
            debug!(hostname = %spec.hostname, "no hostname change; nothing to apply");
            return self.observe(&spec.hostname).await;
        }

        // Validate the new template before releasing anything.
        render_cart_template(&spec.config, &spec.hostname)?;

        info!(from = current, to = %spec.hostname, "renaming server");
        self.release(current).await?;
        self.order(spec).await
    }

    async fn delete(&self, id: &str, _spec: &ServerSpec) -> Result<(), CoreError> {
        self.release(id).await
    }
}
