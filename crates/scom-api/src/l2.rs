// Layer-2 segment endpoints

use reqwest::Method;
use tracing::debug;

use crate::client::{ApiClient, decode};
use crate::error::Error;
use crate::models::{DeleteResponse, L2Segment, L2SegmentRequest};

impl ApiClient {
    /// List all segments of the account.
    ///
    /// `GET /rest/l2_segments`
    pub async fn list_l2_segments(&self) -> Result<Vec<L2Segment>, Error> {
        let url = self.rest_url("l2_segments")?;
        debug!("listing L2 segments");
        let segments: Vec<L2Segment> = self.get_data(url).await?;
        debug!(count = segments.len(), "L2 segments fetched");
        Ok(segments)
    }

    /// Create a segment.
    ///
    /// `POST /rest/l2_segments/`
    pub async fn create_l2_segment(&self, request: &L2SegmentRequest) -> Result<L2Segment, Error> {
        let url = self.rest_url("l2_segments/")?;
        debug!(name = %request.name, hosts = request.hosts.len(), "creating L2 segment");
        self.send_data(Method::POST, url, request).await
    }

    /// Replace the definition of an existing segment.
    ///
    /// `PUT /rest/l2_segments/{id}`
    pub async fn update_l2_segment(
        &self,
        segment_id: u64,
        request: &L2SegmentRequest,
    ) -> Result<L2Segment, Error> {
        let url = self.rest_url(&format!("l2_segments/{segment_id}"))?;
        debug!(segment_id, name = %request.name, "updating L2 segment");
        self.send_data(Method::PUT, url, request).await
    }

    /// Delete a segment and report whether the API confirmed it.
    ///
    /// `DELETE /rest/l2_segments/{id}/`. The result is the `success` flag of
    /// the reply; a reply that does not decode counts as not confirmed.
    pub async fn delete_l2_segment(&self, segment_id: u64) -> Result<bool, Error> {
        let url = self.rest_url(&format!("l2_segments/{segment_id}/"))?;
        debug!(segment_id, "deleting L2 segment");
        let payload = self.send(Method::DELETE, url, None).await?;
        match decode::<DeleteResponse>(&payload) {
            Ok(reply) => Ok(reply.success),
            Err(e) => {
                debug!(segment_id, error = %e, "unreadable delete confirmation");
                Ok(false)
            }
        }
    }
}
