// ── L2 segment controller ──
//
// A segment joins servers of one location into a layer-2 network. Member
// hostnames are resolved against the active server list on every create
// and update; all members must resolve exactly once and share a location.
// Segments can only be changed or deleted while their status is "active".

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use scom_api::{Host, L2HostRequest, L2Segment, L2SegmentRequest};

use crate::error::{ConsistencyError, CoreError, Operation};
use crate::resource::{Applied, Resource, ResourceKind, numeric_id};
use crate::session::Session;

/// Member mode used when a binding names none.
pub const DEFAULT_MODE: &str = "native";

// ── Declared types ───────────────────────────────────────────────────

/// Segment visibility.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SegmentType {
    Private,
    Public,
}

impl SegmentType {
    /// Parse a declared type name, rejecting anything but the two known ones.
    pub fn parse(name: &str) -> Result<Self, CoreError> {
        Self::from_str(name).map_err(|_| {
            CoreError::validation(
                "type",
                format!("unrecognized type '{name}', expected \"public\" or \"private\""),
            )
        })
    }

    /// Numeric code used on the wire.
    pub fn code(self) -> i64 {
        match self {
            Self::Private => 0,
            Self::Public => 1,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Private),
            1 => Some(Self::Public),
            _ => None,
        }
    }
}

/// One declared member: a hostname and its port mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostBinding {
    pub name: String,
    #[serde(default = "default_mode")]
    pub mode: String,
}

fn default_mode() -> String {
    DEFAULT_MODE.to_owned()
}

impl HostBinding {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mode: default_mode(),
        }
    }

    pub fn with_mode(name: impl Into<String>, mode: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mode: mode.into(),
        }
    }
}

impl FromStr for HostBinding {
    type Err = CoreError;

    /// `name` or `name:mode`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, mode) = match s.split_once(':') {
            Some((name, mode)) => (name.trim(), mode.trim()),
            None => (s.trim(), DEFAULT_MODE),
        };
        if name.is_empty() || mode.is_empty() {
            return Err(CoreError::validation(
                "host",
                format!("'{s}' is not of the form name[:mode]"),
            ));
        }
        Ok(Self::with_mode(name, mode))
    }
}

/// Declared segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct L2SegmentSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub segment_type: SegmentType,
    pub hosts: Vec<HostBinding>,
}

/// Observed segment fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct L2SegmentState {
    pub name: String,
    pub status: String,
    pub segment_type: Option<SegmentType>,
    pub location_id: Option<u64>,
    /// Member hostnames as reported remotely.
    pub hosts: Vec<String>,
}

impl From<&L2Segment> for L2SegmentState {
    fn from(segment: &L2Segment) -> Self {
        Self {
            name: segment.name.clone(),
            status: segment.status.clone(),
            segment_type: SegmentType::from_code(segment.segment_type),
            location_id: segment.location_id(),
            hosts: segment.hosts.iter().map(|h| h.title.clone()).collect(),
        }
    }
}

// ── Host resolution ──────────────────────────────────────────────────

/// Resolve declared members against a server list.
///
/// Returns the member requests (in declaration order) and the shared
/// location id. Location disagreement is reported before missing members.
pub fn resolve_against(
    servers: &[Host],
    bindings: &[HostBinding],
) -> Result<(Vec<L2HostRequest>, u64), CoreError> {
    if bindings.is_empty() {
        return Err(CoreError::validation("hosts", "at least one host is required"));
    }

    let mut hosts = Vec::with_capacity(bindings.len());
    let mut locations: Vec<u64> = Vec::new();
    let mut missing = Vec::new();

    for binding in bindings {
        let matches: Vec<&Host> = servers.iter().filter(|s| s.title == binding.name).collect();
        match matches.as_slice() {
            [] => missing.push(binding.name.clone()),
            [server] => {
                if !locations.contains(&server.location.id) {
                    locations.push(server.location.id);
                }
                hosts.push(L2HostRequest {
                    id: server.id,
                    mode: binding.mode.clone(),
                });
            }
            several => {
                return Err(ConsistencyError::AmbiguousHostname {
                    hostname: binding.name.clone(),
                    matches: several.len(),
                }
                .into());
            }
        }
    }

    if locations.len() > 1 {
        return Err(ConsistencyError::MixedLocation { locations }.into());
    }
    if !missing.is_empty() {
        return Err(ConsistencyError::IncompleteHostResolution { missing }.into());
    }
    match locations.first() {
        Some(&location_id) => Ok((hosts, location_id)),
        None => Err(ConsistencyError::IncompleteHostResolution {
            missing: bindings.iter().map(|b| b.name.clone()).collect(),
        }
        .into()),
    }
}

fn ensure_active(segment: &L2Segment, operation: Operation) -> Result<(), CoreError> {
    if segment.is_active() {
        Ok(())
    } else {
        Err(CoreError::InvalidStatus {
            segment_id: segment.id,
            status: segment.status.clone(),
            operation,
        })
    }
}

// ── Controller ───────────────────────────────────────────────────────

/// Reconciles declared L2 segments against the control plane.
#[derive(Debug, Clone, Copy)]
pub struct L2SegmentController<'a> {
    session: &'a Session,
}

impl<'a> L2SegmentController<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub async fn list_segments(&self) -> Result<Vec<L2Segment>, CoreError> {
        Ok(self.session.client().list_l2_segments().await?)
    }

    /// The segment with `segment_id`, if it still exists.
    pub async fn find_segment(&self, segment_id: u64) -> Result<Option<L2Segment>, CoreError> {
        Ok(self
            .list_segments()
            .await?
            .into_iter()
            .find(|s| s.id == segment_id))
    }

    /// The segment with `segment_id`, or `NotFound`.
    pub async fn get_segment(&self, segment_id: u64) -> Result<L2Segment, CoreError> {
        self.find_segment(segment_id)
            .await?
            .ok_or_else(|| CoreError::not_found(ResourceKind::L2Segment, segment_id.to_string()))
    }

    /// Resolve members with a single fetch of the active server list.
    pub async fn resolve_hosts_and_location(
        &self,
        bindings: &[HostBinding],
    ) -> Result<(Vec<L2HostRequest>, u64), CoreError> {
        let servers = self.session.servers().list_servers().await?;
        let resolved = resolve_against(&servers, bindings)?;
        debug!(
            members = resolved.0.len(),
            location_id = resolved.1,
            "segment members resolved"
        );
        Ok(resolved)
    }

    async fn build_request(&self, spec: &L2SegmentSpec) -> Result<L2SegmentRequest, CoreError> {
        let (hosts, location_id) = self.resolve_hosts_and_location(&spec.hosts).await?;
        Ok(L2SegmentRequest {
            delete_ips: None,
            hosts,
            location_id,
            name: spec.name.clone(),
            segment_type: spec.segment_type.code(),
        })
    }

    // ── Mutations ────────────────────────────────────────────────────

    pub async fn create_segment(&self, spec: &L2SegmentSpec) -> Result<L2Segment, CoreError> {
        let request = self.build_request(spec).await?;
        let segment = self.session.client().create_l2_segment(&request).await?;
        info!(segment_id = segment.id, name = %spec.name, "L2 segment created");
        Ok(segment)
    }

    /// Re-resolve members and replace the segment definition.
    ///
    /// Refused without any mutating call unless the segment is active.
    pub async fn update_segment(
        &self,
        segment_id: u64,
        spec: &L2SegmentSpec,
    ) -> Result<L2Segment, CoreError> {
        let existing = self.get_segment(segment_id).await?;
        ensure_active(&existing, Operation::Update)?;

        let request = self.build_request(spec).await?;
        let segment = self
            .session
            .client()
            .update_l2_segment(segment_id, &request)
            .await?;
        info!(segment_id, name = %spec.name, "L2 segment updated");
        Ok(segment)
    }

    /// Delete an active segment; the result is the remote confirmation.
    pub async fn delete_segment(&self, segment_id: u64) -> Result<bool, CoreError> {
        let existing = self.get_segment(segment_id).await?;
        ensure_active(&existing, Operation::Delete)?;

        let confirmed = self.session.client().delete_l2_segment(segment_id).await?;
        info!(segment_id, confirmed, "L2 segment delete requested");
        Ok(confirmed)
    }
}

impl Resource for L2SegmentController<'_> {
    type Spec = L2SegmentSpec;
    type State = L2SegmentState;

    const KIND: ResourceKind = ResourceKind::L2Segment;

    async fn create(&self, spec: &L2SegmentSpec) -> Result<Applied<L2SegmentState>, CoreError> {
        let segment = self.create_segment(spec).await?;
        Ok(Applied::new(segment.id.to_string(), (&segment).into()))
    }

    async fn read(
        &self,
        id: &str,
        _spec: &L2SegmentSpec,
    ) -> Result<Applied<L2SegmentState>, CoreError> {
        let segment = self.get_segment(numeric_id(Self::KIND, id)?).await?;
        Ok(Applied::new(id, (&segment).into()))
    }

    async fn update(
        &self,
        id: &str,
        prior: Option<&L2SegmentSpec>,
        spec: &L2SegmentSpec,
    ) -> Result<Applied<L2SegmentState>, CoreError> {
        if prior.is_some_and(|p| p == spec) {
            debug!(segment_id = id, "segment declaration unchanged");
            return self.read(id, spec).await;
        }
        let segment = self
            .update_segment(numeric_id(Self::KIND, id)?, spec)
            .await?;
        Ok(Applied::new(id, (&segment).into()))
    }

    async fn delete(&self, id: &str, _spec: &L2SegmentSpec) -> Result<(), CoreError> {
        let segment_id = numeric_id(Self::KIND, id)?;
        if self.delete_segment(segment_id).await? {
            Ok(())
        } else {
            Err(CoreError::DeletionNotConfirmed { segment_id })
        }
    }
}
