//! Gateway metrics.
//!
//! # Metrics
//! - `gateway_jobs_total` (counter): submitted jobs by outcome
//! - `gateway_backend_alive` (gauge): 1=alive, 0=dead, per backend
//! - `gateway_jobs_in_flight` (gauge): requesters currently holding a ticket

use metrics::{counter, gauge};

/// Record the outcome of one submitted job.
pub fn record_job_outcome(outcome: &'static str) {
    counter!("gateway_jobs_total", "outcome" => outcome).increment(1);
}

/// Record a probe result for a backend.
pub fn record_backend_health(backend: &str, alive: bool) {
    gauge!("gateway_backend_alive", "backend" => backend.to_string())
        .set(if alive { 1.0 } else { 0.0 });
}

/// Record the size of the in-flight set.
pub fn record_in_flight(count: usize) {
    gauge!("gateway_jobs_in_flight").set(count as f64);
}
