// ── PTR record controller ──
//
// A declared reverse-DNS record binds a server's public address to a PTR
// target. The remote API has no update endpoint, so changes are applied
// as delete-then-create and the record gets a new id.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use scom_api::PtrRecord;

use crate::error::CoreError;
use crate::resource::{Applied, Resource, ResourceKind, numeric_id};
use crate::session::Session;

/// Declared PTR record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PtrSpec {
    /// Server whose public address the record is bound to.
    pub hostname: String,
    /// PTR target, e.g. `web-01.example.com`.
    pub ptr: String,
}

/// Observed PTR record fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PtrState {
    pub hostname: String,
    pub ptr: String,
    pub address: String,
    pub domain_id: u64,
}

impl PtrState {
    fn observed(record: &PtrRecord, spec: &PtrSpec) -> Self {
        Self {
            hostname: spec.hostname.clone(),
            ptr: record
                .data
                .as_str()
                .map_or_else(|| spec.ptr.clone(), str::to_owned),
            address: record.name.clone(),
            domain_id: record.domain_id,
        }
    }
}

/// Reconciles declared PTR records against the control plane.
#[derive(Debug, Clone, Copy)]
pub struct PtrController<'a> {
    session: &'a Session,
}

impl<'a> PtrController<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub async fn list_records(&self) -> Result<Vec<PtrRecord>, CoreError> {
        Ok(self.session.client().list_ptr_records().await?)
    }

    /// The record with `record_id`, if it still exists.
    pub async fn find_record(&self, record_id: u64) -> Result<Option<PtrRecord>, CoreError> {
        Ok(self
            .list_records()
            .await?
            .into_iter()
            .find(|r| r.id == record_id))
    }

    /// The record with `record_id`, or `NotFound`.
    pub async fn get_record(&self, record_id: u64) -> Result<PtrRecord, CoreError> {
        self.find_record(record_id)
            .await?
            .ok_or_else(|| CoreError::not_found(ResourceKind::PtrRecord, record_id.to_string()))
    }

    /// First public address of the live server `hostname`.
    ///
    /// Pending servers do not count; they have no networks yet.
    pub async fn resolve_public_address(&self, hostname: &str) -> Result<String, CoreError> {
        let server = self
            .session
            .servers()
            .find_server_by_hostname(hostname)
            .await?
            .ok_or_else(|| CoreError::not_found(ResourceKind::Server, hostname))?;

        server
            .public_network()
            .map(|n| n.host_ip.clone())
            .ok_or_else(|| CoreError::NoPublicNetwork {
                hostname: hostname.to_owned(),
            })
    }

    // ── Mutations ────────────────────────────────────────────────────

    async fn bind(&self, spec: &PtrSpec) -> Result<PtrRecord, CoreError> {
        let address = self.resolve_public_address(&spec.hostname).await?;
        self.create_bound(spec, &address).await
    }

    async fn create_bound(&self, spec: &PtrSpec, address: &str) -> Result<PtrRecord, CoreError> {
        let record = self
            .session
            .client()
            .create_ptr_record(&spec.ptr, address)
            .await?;
        info!(record_id = record.id, address, ptr = %spec.ptr, "PTR record created");
        Ok(record)
    }

    /// Delete the record with `record_id`, looking up its domain first.
    pub async fn remove(&self, record_id: u64) -> Result<(), CoreError> {
        let record = self.get_record(record_id).await?;
        self.session
            .client()
            .delete_ptr_record(record.id, record.domain_id)
            .await?;
        info!(record_id, "PTR record deleted");
        Ok(())
    }

    /// Replace the record with one matching `spec`.
    ///
    /// The new address is resolved before anything is deleted. If the
    /// create then fails, no record remains and the create's error is
    /// returned.
    pub async fn replace(&self, record_id: u64, spec: &PtrSpec) -> Result<PtrRecord, CoreError> {
        let existing = self.get_record(record_id).await?;
        let address = self.resolve_public_address(&spec.hostname).await?;

        self.session
            .client()
            .delete_ptr_record(existing.id, existing.domain_id)
            .await?;
        debug!(record_id, "old PTR record deleted");

        match self.create_bound(spec, &address).await {
            Ok(record) => Ok(record),
            Err(e) => {
                warn!(
                    record_id,
                    hostname = %spec.hostname,
                    error = %e,
                    "PTR record deleted but its replacement failed; no record exists now"
                );
                Err(e)
            }
        }
    }
}

impl Resource for PtrController<'_> {
    type Spec = PtrSpec;
    type State = PtrState;

    const KIND: ResourceKind = ResourceKind::PtrRecord;

    async fn create(&self, spec: &PtrSpec) -> Result<Applied<PtrState>, CoreError> {
        let record = self.bind(spec).await?;
        Ok(Applied::new(
            record.id.to_string(),
            PtrState::observed(&record, spec),
        ))
    }

    async fn read(&self, id: &str, spec: &PtrSpec) -> Result<Applied<PtrState>, CoreError> {
        let record = self.get_record(numeric_id(Self::KIND, id)?).await?;
        Ok(Applied::new(id, PtrState::observed(&record, spec)))
    }

    /// Applied only when the hostname or target changed, or the prior
    /// declaration is unknown.
    async fn update(
        &self,
        id: &str,
        prior: Option<&PtrSpec>,
        spec: &PtrSpec,
    ) -> Result<Applied<PtrState>, CoreError> {
        if prior.is_some_and(|p| p == spec) {
            debug!(record_id = id, "PTR declaration unchanged");
            return self.read(id, spec).await;
        }
        let record = self.replace(numeric_id(Self::KIND, id)?, spec).await?;
        Ok(Applied::new(
            record.id.to_string(),
            PtrState::observed(&record, spec),
        ))
    }

    async fn delete(&self, id: &str, _spec: &PtrSpec) -> Result<(), CoreError> {
        self.remove(numeric_id(Self::KIND, id)?).await
    }
}
