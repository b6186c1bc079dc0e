//! Endpoint probing.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::future::join_all;

use crate::balancer::{BackendEndpoint, BackendRegistry};
use crate::observability::metrics;
use crate::remote::RenderBackend;

/// Probes endpoints and writes the result back into the registry.
///
/// Shared between the scheduled [`super::HealthMonitor`] loop and the
/// selector's on-demand sweep.
pub struct HealthProber {
    registry: Arc<BackendRegistry>,
    transport: Arc<dyn RenderBackend>,
    timeout: Duration,
}

impl HealthProber {
    pub fn new(
        registry: Arc<BackendRegistry>,
        transport: Arc<dyn RenderBackend>,
        timeout: Duration,
    ) -> Self {
        Self {
            registry,
            transport,
            timeout,
        }
    }

    /// Probe one endpoint and record the outcome.
    ///
    /// Timeouts, connection errors and non-success statuses all map to
    /// `false`; nothing propagates to the caller.
    pub async fn probe(&self, endpoint: &BackendEndpoint) -> bool {
        let alive = match tokio::time::timeout(
            self.timeout,
            self.transport.ping(endpoint.url()),
        )
        .await
        {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                tracing::debug!(backend = endpoint.name(), error = %e, "Probe failed");
                false
            }
            Err(_) => {
                tracing::debug!(backend = endpoint.name(), "Probe timed out");
                false
            }
        };

        if alive != endpoint.is_alive() {
            tracing::info!(
                backend = endpoint.name(),
                url = %endpoint.url(),
                alive,
                "Backend liveness changed"
            );
        }

        endpoint.set_alive(alive, Instant::now());
        metrics::record_backend_health(endpoint.name(), alive);
        alive
    }

    /// Probe every endpoint concurrently; returns how many answered.
    pub async fn sweep(&self) -> usize {
        let snapshot = self.registry.snapshot();
        let results = join_all(snapshot.iter().map(|ep| self.probe(ep))).await;
        results.into_iter().filter(|alive| *alive).count()
    }

    pub fn registry(&self) -> &Arc<BackendRegistry> {
        &self.registry
    }
}
