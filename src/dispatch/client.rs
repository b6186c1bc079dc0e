//! Per-job dispatch orchestration.

use std::sync::Arc;

use crate::admission::AdmissionController;
use crate::balancer::BackendSelector;
use crate::dispatch::job::{JobRequest, JobResult};
use crate::error::GatewayError;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::remote::RenderBackend;

/// Orchestrates one job end-to-end.
///
/// `submit` is synchronous from the caller's point of view: it always
/// returns a result or a typed error, never drops a job silently. A failed
/// dispatch is not retried against another backend; the caller may resubmit.
pub struct DispatchClient {
    admission: Arc<AdmissionController>,
    selector: BackendSelector,
    transport: Arc<dyn RenderBackend>,
    shutdown: Arc<Shutdown>,
}

impl DispatchClient {
    pub fn new(
        admission: Arc<AdmissionController>,
        selector: BackendSelector,
        transport: Arc<dyn RenderBackend>,
        shutdown: Arc<Shutdown>,
    ) -> Self {
        Self {
            admission,
            selector,
            transport,
            shutdown,
        }
    }

    /// Run one job through admission, reservation, selection and the remote
    /// call.
    pub async fn submit(&self, request: JobRequest) -> Result<JobResult, GatewayError> {
        let result = self.submit_inner(&request).await;
        match &result {
            Ok(_) => metrics::record_job_outcome("success"),
            Err(e) => metrics::record_job_outcome(e.outcome()),
        }
        result
    }

    async fn submit_inner(&self, request: &JobRequest) -> Result<JobResult, GatewayError> {
        if self.shutdown.is_triggered() {
            return Err(GatewayError::ShuttingDown);
        }

        // Ticket before reservation: locals drop in reverse order, so the
        // reservation settles before the ticket releases the requester.
        let _ticket = self.admission.try_admit(request.requester)?;
        let reservation = self
            .admission
            .reserve(request.requester, request.cost)
            .await?;

        match self.dispatch(request).await {
            Ok(result) => {
                reservation.consume();
                tracing::info!(
                    job = %request.id,
                    requester = %request.requester,
                    images = result.images.len(),
                    "Job completed"
                );
                Ok(result)
            }
            Err(err) => {
                tracing::warn!(
                    job = %request.id,
                    requester = %request.requester,
                    error = %err,
                    "Job failed, compensating reservation"
                );
                reservation.compensate().await;
                Err(err)
            }
        }
    }

    async fn dispatch(&self, request: &JobRequest) -> Result<JobResult, GatewayError> {
        let endpoint = self.selector.select().await?;
        tracing::info!(
            job = %request.id,
            requester = %request.requester,
            backend = endpoint.name(),
            "Dispatching job"
        );

        let mut shutdown_rx = self.shutdown.subscribe();
        let images = tokio::select! {
            outcome = self.transport.generate(endpoint.url(), &request.params) => outcome?,
            _ = shutdown_rx.recv() => return Err(GatewayError::ShuttingDown),
        };

        Ok(JobResult {
            images,
            endpoint: endpoint.url().clone(),
        })
    }
}
