//! Backend registry.
//!
//! # Responsibilities
//! - Hold the fixed set of known endpoints, keyed by URL
//! - Hand out cheap read-only snapshots to selectors and the prober

use std::sync::Arc;
use std::time::Instant;

use url::Url;

use crate::balancer::endpoint::BackendEndpoint;

/// The set of known render backends.
///
/// The address set is fixed at construction; all mutation happens inside the
/// per-endpoint atomics, so the registry itself needs no lock and snapshots
/// are a clone of an `Arc` list.
#[derive(Debug, Default)]
pub struct BackendRegistry {
    endpoints: Vec<Arc<BackendEndpoint>>,
}

impl BackendRegistry {
    /// Build a registry from named addresses, dropping duplicate URLs.
    pub fn new(backends: impl IntoIterator<Item = (String, Url)>) -> Self {
        let mut endpoints: Vec<Arc<BackendEndpoint>> = Vec::new();
        for (name, url) in backends {
            if endpoints.iter().any(|ep| ep.url() == &url) {
                tracing::warn!(backend = %name, url = %url, "Ignoring duplicate backend address");
                continue;
            }
            endpoints.push(Arc::new(BackendEndpoint::new(name, url)));
        }
        Self { endpoints }
    }

    /// Read-only snapshot of every endpoint.
    pub fn snapshot(&self) -> Vec<Arc<BackendEndpoint>> {
        self.endpoints.clone()
    }

    /// Record a probe result for the endpoint with the given address.
    ///
    /// Unknown addresses are ignored; the set is fixed, so they can only
    /// come from stale callers.
    pub fn set_alive(&self, url: &Url, alive: bool, checked_at: Instant) {
        if let Some(ep) = self.endpoints.iter().find(|ep| ep.url() == url) {
            ep.set_alive(alive, checked_at);
        }
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
