//! Scheduled health monitoring.
//!
//! # Responsibilities
//! - Periodically sweep the whole registry in the background
//! - Keep start/stop idempotent: never two loops, stop-before-start is a no-op
//! - Exit promptly on shutdown, abandoning a half-finished sweep

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time;

use crate::health::probe::HealthProber;

/// Background task that keeps endpoint liveness approximately fresh, so a
/// dispatch only pays probe latency when the whole pool looks dead.
pub struct HealthMonitor {
    prober: Arc<HealthProber>,
    interval: Duration,
    stop: broadcast::Sender<()>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl HealthMonitor {
    pub fn new(prober: Arc<HealthProber>, interval: Duration) -> Self {
        let (stop, _) = broadcast::channel(1);
        Self {
            prober,
            interval,
            stop,
            task: Mutex::new(None),
        }
    }

    /// Start the probe loop. A second call while the loop runs is a no-op.
    ///
    /// The first sweep fires immediately, so liveness is fresh right after
    /// startup rather than one interval later.
    pub fn start(&self) {
        let mut task = self.task.lock().expect("health monitor mutex poisoned");
        if let Some(handle) = task.as_ref() {
            if !handle.is_finished() {
                tracing::debug!("Health monitor already running");
                return;
            }
        }

        tracing::info!(
            interval_secs = self.interval.as_secs(),
            backends = self.prober.registry().len(),
            "Health monitor starting"
        );

        let prober = self.prober.clone();
        let interval = self.interval;
        let mut stop_rx = self.stop.subscribe();

        *task = Some(tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            loop {
                // Biased: a pending stop always wins over a due tick.
                tokio::select! {
                    biased;
                    _ = stop_rx.recv() => break,
                    _ = ticker.tick() => {
                        // A stop signal also interrupts a sweep in progress;
                        // the remaining endpoints keep their previous state.
                        tokio::select! {
                            biased;
                            _ = stop_rx.recv() => break,
                            alive = prober.sweep() => {
                                tracing::debug!(alive, "Scheduled health sweep complete");
                            }
                        }
                    }
                }
            }
            tracing::info!("Health monitor stopped");
        }));
    }

    /// Stop the probe loop. Stopping an unstarted (or already stopped)
    /// monitor is a no-op.
    pub fn stop(&self) {
        let handle = self.task.lock().expect("health monitor mutex poisoned").take();
        match handle {
            Some(handle) => {
                // Err means the loop already exited and dropped its receiver.
                if self.stop.send(()).is_err() {
                    handle.abort();
                }
            }
            None => tracing::debug!("Health monitor not running"),
        }
    }

    /// Whether the loop is currently running.
    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .expect("health monitor mutex poisoned")
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        // A dropped monitor must not leave its loop task running.
        if let Ok(mut task) = self.task.lock() {
            if let Some(handle) = task.take() {
                handle.abort();
            }
        }
    }
}
