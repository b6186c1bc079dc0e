//! Remote render backend interface.
//!
//! # Data Flow
//! ```text
//! DispatchClient / HealthProber
//!     → RenderBackend trait (generate / ping)
//!     → client.rs (Stable Diffusion web UI over HTTP)
//!     → types.rs (wire payloads)
//! ```
//!
//! # Design Decisions
//! - One transport shared across all endpoints; the endpoint URL is a call
//!   parameter, so connection pooling spans the whole render pool
//! - `ping` hits a cheap metadata route, never the render route
//! - Every call has a bounded timeout; timeout errors are distinct from
//!   connect errors and non-success statuses

mod client;
mod types;

pub use client::WebuiClient;
pub use types::{BackendError, RenderParams, SdModel};

use async_trait::async_trait;
use url::Url;

/// One remote worker capable of executing render jobs, addressed by base URL.
///
/// Implementations must be safe to call concurrently; the gateway shares a
/// single transport between the health prober and all in-flight dispatches.
#[async_trait]
pub trait RenderBackend: Send + Sync {
    /// Execute a render job and return the decoded image bytes.
    async fn generate(&self, endpoint: &Url, params: &RenderParams)
        -> Result<Vec<Vec<u8>>, BackendError>;

    /// Lightweight reachability check, distinct from the render route.
    async fn ping(&self, endpoint: &Url) -> Result<(), BackendError>;
}
