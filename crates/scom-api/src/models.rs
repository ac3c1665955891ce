// Remote API request and response types
//
// Every list response is wrapped in `{ "data": [...] }` and every
// single-object response in `{ "data": {...} }`. The API omits fields
// freely and sends `null` for empty ones, so non-identity fields decode
// both a missing key and `null` to the type's default.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Decode `null` as `T::default()`. Pair with `#[serde(default)]` so a
/// missing key is covered too.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ── Envelopes ────────────────────────────────────────────────────────

/// Standard response envelope: `{ "data": ... }`.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Reply of a segment deletion: `{ "success": bool }`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

// ── Marker ───────────────────────────────────────────────────────────

/// A field whose remote shape varies (timestamp string, number, object).
///
/// Decoded explicitly into "absent" (missing or `null`) or "present" with
/// the value's text. Strings keep their content; numbers and booleans are
/// formatted; objects and arrays keep their compact JSON text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Marker {
    #[default]
    Absent,
    Present(String),
}

impl Marker {
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Present(s) => Some(s),
            Self::Absent => None,
        }
    }
}

impl<'de> Deserialize<'de> for Marker {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match raw {
            None | Some(serde_json::Value::Null) => Self::Absent,
            Some(serde_json::Value::String(s)) => Self::Present(s),
            Some(other) => Self::Present(other.to_string()),
        })
    }
}

impl Serialize for Marker {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Absent => serializer.serialize_none(),
            Self::Present(s) => serializer.serialize_str(s),
        }
    }
}

// ── Hosts ────────────────────────────────────────────────────────────

/// Physical location of a host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// One network attached to a host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub host_ip: String,
    /// `"public"`, `"private"`, ...
    #[serde(default, deserialize_with = "null_as_default")]
    pub pool_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub size: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub netmask: String,
}

impl Network {
    pub fn is_public(&self) -> bool {
        self.pool_type == "public"
    }
}

/// A bare-metal server from `/rest/hosts` or `/rest/hosts_pending`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Host {
    pub id: u64,
    /// Hostname.
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default", rename = "type")]
    pub host_type: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub conf: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub service_type: i64,
    pub location: Location,
    #[serde(default, deserialize_with = "null_as_default")]
    pub networks: Vec<Network>,
    #[serde(default)]
    pub scheduled_release_at: Marker,
    #[serde(default)]
    pub lease_end: Marker,
    #[serde(default)]
    pub project_id: Marker,
    #[serde(default)]
    pub project_name: Marker,
    #[serde(default)]
    pub rack_id: Marker,
    #[serde(default)]
    pub rack_name: Marker,
}

impl Host {
    /// First network whose pool type is `"public"`.
    pub fn public_network(&self) -> Option<&Network> {
        self.networks.iter().find(|n| n.is_public())
    }

    pub fn is_release_scheduled(&self) -> bool {
        self.scheduled_release_at.is_present()
    }
}

// ── Orders ───────────────────────────────────────────────────────────

/// An order (purchase) from `/rest/orders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    /// 2 = cancelled.
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: i64,
    /// Hostnames the order provisions.
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount_tax: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount_total: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub original_amount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub original_currency: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_time: String,
}

impl Order {
    pub const STATUS_CANCELLED: i64 = 2;

    pub fn is_cancelled(&self) -> bool {
        self.status == Self::STATUS_CANCELLED
    }

    pub fn lists_hostname(&self, hostname: &str) -> bool {
        self.description.iter().any(|h| h == hostname)
    }
}

/// Body of `POST /rest/orders` (checkout).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CheckoutRequest {
    pub ts: i64,
}

/// Body of `POST /rest/hosts/{id}/schedule_release`.
///
/// The API wants the account password again as a one-time confirmation.
#[derive(Serialize)]
pub struct ScheduleReleaseRequest<'a> {
    pub token: &'a str,
}

// ── DNS ──────────────────────────────────────────────────────────────

/// A reverse-DNS record from `/rest/dns/records//`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PtrRecord {
    pub id: u64,
    pub domain_id: u64,
    #[serde(default, deserialize_with = "null_as_default", rename = "type")]
    pub record_type: String,
    /// The address the record is bound to.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ttl: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: i64,
    /// The PTR target.
    #[serde(default)]
    pub data: Marker,
    #[serde(default, deserialize_with = "null_as_default")]
    pub disabled: bool,
}

/// Body of `POST /rest/dns/records//`.
#[derive(Debug, Clone, Serialize)]
pub struct PtrCreateRequest<'a> {
    pub data: &'a str,
    pub name: &'a str,
}

/// Body of `DELETE /rest/dns/records///{id}`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PtrDeleteRequest {
    pub domain_id: u64,
}

// ── L2 segments ──────────────────────────────────────────────────────

/// Segment location: either a bare id or a `{id, name}` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SegmentLocation {
    Id(u64),
    Detailed(Location),
}

impl SegmentLocation {
    pub fn id(&self) -> u64 {
        match self {
            Self::Id(id) => *id,
            Self::Detailed(loc) => loc.id,
        }
    }
}

/// A member host of a segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct L2Member {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mode: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub vlan: Marker,
}

/// A layer-2 segment from `/rest/l2_segments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct L2Segment {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hosts: Vec<L2Member>,
    #[serde(default)]
    pub location: Option<SegmentLocation>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    /// 0 = private, 1 = public.
    #[serde(default, deserialize_with = "null_as_default", rename = "type")]
    pub segment_type: i64,
}

impl L2Segment {
    pub const STATUS_ACTIVE: &'static str = "active";

    pub fn is_active(&self) -> bool {
        self.status == Self::STATUS_ACTIVE
    }

    pub fn location_id(&self) -> Option<u64> {
        self.location.as_ref().map(SegmentLocation::id)
    }
}

/// One `{id, mode}` pair in a segment create/update body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct L2HostRequest {
    pub id: u64,
    pub mode: String,
}

/// Body of `POST /rest/l2_segments/` and `PUT /rest/l2_segments/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct L2SegmentRequest {
    /// Always sent, as `null` unless addresses are being dropped.
    pub delete_ips: Option<Vec<String>>,
    pub hosts: Vec<L2HostRequest>,
    pub location_id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub segment_type: i64,
}
