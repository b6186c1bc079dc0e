//! Gateway assembly.
//!
//! Wires configuration, registry, prober, monitor, admission and dispatch
//! together in dependency order. The background monitor starts last, and
//! only on request.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::admission::AdmissionController;
use crate::balancer::{BackendRegistry, BackendSelector};
use crate::config::{validate_config, GatewayConfig, ValidationError};
use crate::dispatch::{DispatchClient, JobRequest, JobResult, RequesterId};
use crate::error::GatewayError;
use crate::health::{HealthMonitor, HealthProber};
use crate::ledger::Ledger;
use crate::lifecycle::Shutdown;
use crate::remote::{RenderBackend, RenderParams, WebuiClient};

/// Errors raised while building a [`Gateway`].
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid configuration: {0:?}")]
    Invalid(Vec<ValidationError>),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// The resilient compute-dispatch gateway.
///
/// Owns every subsystem for one render pool: the endpoint registry, the
/// background health monitor, the admission gate and the dispatch client.
pub struct Gateway {
    config: GatewayConfig,
    registry: Arc<BackendRegistry>,
    monitor: Arc<HealthMonitor>,
    dispatch: DispatchClient,
    shutdown: Arc<Shutdown>,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway").finish_non_exhaustive()
    }
}

impl Gateway {
    /// Build a gateway talking to real Stable Diffusion web UI backends.
    pub fn new(config: GatewayConfig, ledger: Arc<dyn Ledger>) -> Result<Self, BuildError> {
        let transport = WebuiClient::new(
            Duration::from_secs(config.dispatch.request_timeout_secs),
            Duration::from_secs(config.health_check.timeout_secs),
        )?;
        Self::with_transport(config, ledger, Arc::new(transport))
    }

    /// Build a gateway over an arbitrary transport.
    ///
    /// This is the seam used by the test-suite; production callers normally
    /// go through [`Gateway::new`].
    pub fn with_transport(
        config: GatewayConfig,
        ledger: Arc<dyn Ledger>,
        transport: Arc<dyn RenderBackend>,
    ) -> Result<Self, BuildError> {
        validate_config(&config).map_err(BuildError::Invalid)?;

        let registry = Arc::new(BackendRegistry::new(config.backends.iter().filter_map(
            |backend| {
                // Validation guarantees the addresses parse.
                backend
                    .address
                    .parse()
                    .ok()
                    .map(|url| (backend.name.clone(), url))
            },
        )));

        let prober = Arc::new(HealthProber::new(
            registry.clone(),
            transport.clone(),
            Duration::from_secs(config.health_check.timeout_secs),
        ));
        let monitor = Arc::new(HealthMonitor::new(
            prober.clone(),
            Duration::from_secs(config.health_check.interval_secs),
        ));

        let shutdown = Arc::new(Shutdown::new());
        let admission = Arc::new(AdmissionController::new(ledger));
        let selector = BackendSelector::new(registry.clone(), prober);
        let dispatch = DispatchClient::new(admission, selector, transport, shutdown.clone());

        tracing::info!(
            backends = registry.len(),
            interval_secs = config.health_check.interval_secs,
            job_cost = config.dispatch.job_cost,
            "Gateway assembled"
        );

        Ok(Self {
            config,
            registry,
            monitor,
            dispatch,
            shutdown,
        })
    }

    /// Start the background health monitor, if enabled.
    pub fn start(&self) {
        if !self.config.health_check.enabled {
            tracing::info!("Scheduled health checks disabled");
            return;
        }
        self.monitor.start();
    }

    /// Build a job for this gateway's configured cost.
    pub fn new_job(&self, requester: RequesterId, params: RenderParams) -> JobRequest {
        JobRequest::new(requester, params, self.config.dispatch.job_cost)
    }

    /// Submit one job. See [`DispatchClient::submit`].
    pub async fn submit(&self, request: JobRequest) -> Result<JobResult, GatewayError> {
        self.dispatch.submit(request).await
    }

    /// Trigger shutdown: stop the monitor and fail new or in-flight
    /// dispatches with [`GatewayError::ShuttingDown`] (compensated as usual).
    pub fn shutdown(&self) {
        self.shutdown.trigger();
        self.monitor.stop();
    }

    pub fn registry(&self) -> &Arc<BackendRegistry> {
        &self.registry
    }

    pub fn monitor(&self) -> &Arc<HealthMonitor> {
        &self.monitor
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}
