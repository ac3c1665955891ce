// scom-core: Desired-state controllers between scom-api and consumers (CLI).

pub mod config;
pub mod error;
pub mod l2;
pub mod ptr;
pub mod resource;
pub mod server;
pub mod session;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{SessionConfig, TlsVerification};
pub use error::{ConsistencyError, CoreError, Operation};
pub use l2::{HostBinding, L2SegmentController, L2SegmentSpec, L2SegmentState, SegmentType};
pub use ptr::{PtrController, PtrSpec, PtrState};
pub use resource::{Applied, Resource, ResourceKind};
pub use server::{ServerController, ServerSpec, ServerState, render_cart_template};
pub use session::Session;

// Wire types consumers render directly.
pub use scom_api::{Host, L2Segment, Order, PtrRecord};
