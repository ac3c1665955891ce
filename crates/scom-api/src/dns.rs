// Reverse-DNS endpoints
//
// The record collection lives at the oddly shaped `/rest/dns/records//`;
// single records at `/rest/dns/records///{id}`. There is no update
// endpoint, only create and delete.

use reqwest::Method;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{PtrCreateRequest, PtrDeleteRequest, PtrRecord};

impl ApiClient {
    /// List all PTR records of the account.
    ///
    /// `GET /rest/dns/records//`
    pub async fn list_ptr_records(&self) -> Result<Vec<PtrRecord>, Error> {
        let url = self.rest_url("dns/records//")?;
        debug!("listing PTR records");
        self.get_data(url).await
    }

    /// Create a PTR record for `address` pointing at `target`.
    ///
    /// `POST /rest/dns/records//` with `{"data": target, "name": address}`.
    pub async fn create_ptr_record(&self, target: &str, address: &str) -> Result<PtrRecord, Error> {
        let url = self.rest_url("dns/records//")?;
        debug!(address, target, "creating PTR record");
        let body = PtrCreateRequest {
            data: target,
            name: address,
        };
        self.send_data(Method::POST, url, &body).await
    }

    /// Delete a PTR record. The owning domain id must be supplied.
    ///
    /// `DELETE /rest/dns/records///{id}` with `{"domain_id": ...}`.
    pub async fn delete_ptr_record(&self, record_id: u64, domain_id: u64) -> Result<(), Error> {
        let url = self.rest_url(&format!("dns/records///{record_id}"))?;
        debug!(record_id, domain_id, "deleting PTR record");
        self.send_discard(Method::DELETE, url, &PtrDeleteRequest { domain_id })
            .await
    }
}
