//! Backend endpoint abstraction.
//!
//! # Responsibilities
//! - Represent a single render backend
//! - Track liveness as observed by the most recent probe

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use url::Url;

/// A single render backend.
///
/// The address is immutable once registered; liveness is written only by
/// probes (scheduled or on-demand) and read lock-free by selectors.
#[derive(Debug)]
pub struct BackendEndpoint {
    /// Short name for logs and metrics.
    name: String,

    /// Base URL of the backend API.
    url: Url,

    /// Result of the most recent probe. Endpoints start selectable so a
    /// cold-started gateway can dispatch before the first sweep completes.
    alive: AtomicBool,

    /// When the backend was last probed. `None` until the first probe;
    /// written together with `alive`.
    last_checked: Mutex<Option<Instant>>,
}

impl BackendEndpoint {
    pub fn new(name: impl Into<String>, url: Url) -> Self {
        Self {
            name: name.into(),
            url,
            alive: AtomicBool::new(true),
            last_checked: Mutex::new(None),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Whether the endpoint was reachable as of the last probe.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Relaxed)
    }

    /// Record a probe result.
    pub fn set_alive(&self, alive: bool, checked_at: Instant) {
        let mut last = self
            .last_checked
            .lock()
            .expect("endpoint liveness mutex poisoned");
        self.alive.store(alive, Ordering::Relaxed);
        *last = Some(checked_at);
    }

    /// When the endpoint was last probed, if ever.
    pub fn last_checked(&self) -> Option<Instant> {
        *self
            .last_checked
            .lock()
            .expect("endpoint liveness mutex poisoned")
    }
}
