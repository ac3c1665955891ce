// scom-api: Async Rust client for the bare-metal hosting control-plane API

pub mod auth;
pub mod client;
pub mod dns;
pub mod error;
pub mod hosts;
pub mod l2;
pub mod models;
pub mod orders;
pub mod transport;

pub use client::ApiClient;
pub use error::Error;
pub use models::{
    DataEnvelope, DeleteResponse, Host, L2HostRequest, L2Member, L2Segment, L2SegmentRequest,
    Location, Marker, Network, Order, PtrRecord, SegmentLocation,
};
pub use transport::{TlsMode, TransportConfig};
