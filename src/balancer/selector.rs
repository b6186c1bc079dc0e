//! Backend selection.

use std::sync::Arc;

use rand::Rng;

use crate::balancer::{BackendEndpoint, BackendRegistry};
use crate::error::GatewayError;
use crate::health::HealthProber;

/// Chooses one live endpoint for a dispatch.
///
/// Selection acts on liveness data up to one probe interval stale. Only when
/// the whole pool looks dead does a dispatch pay for a probe sweep, which
/// covers requests arriving in the gap between two scheduled sweeps.
pub struct BackendSelector {
    registry: Arc<BackendRegistry>,
    prober: Arc<HealthProber>,
}

impl BackendSelector {
    pub fn new(registry: Arc<BackendRegistry>, prober: Arc<HealthProber>) -> Self {
        Self { registry, prober }
    }

    /// Select a live endpoint, re-probing the pool once if none look alive.
    pub async fn select(&self) -> Result<Arc<BackendEndpoint>, GatewayError> {
        if let Some(endpoint) = self.pick_live() {
            return Ok(endpoint);
        }

        tracing::info!("No live backend in snapshot, probing pool on demand");
        let alive = self.prober.sweep().await;
        tracing::info!(alive, "On-demand probe sweep complete");

        self.pick_live().ok_or(GatewayError::NoBackendAvailable)
    }

    /// Uniform random choice among the endpoints flagged alive.
    fn pick_live(&self) -> Option<Arc<BackendEndpoint>> {
        let mut live: Vec<Arc<BackendEndpoint>> = self
            .registry
            .snapshot()
            .into_iter()
            .filter(|ep| ep.is_alive())
            .collect();

        if live.is_empty() {
            return None;
        }
        let index = rand::thread_rng().gen_range(0..live.len());
        Some(live.swap_remove(index))
    }
}
