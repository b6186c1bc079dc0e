//! Job request and result types.

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::remote::RenderParams;

/// Requester identity for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequesterId(pub u64);

impl From<u64> for RequesterId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for RequesterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One unit of work submitted to the gateway.
#[derive(Debug, Clone)]
pub struct JobRequest {
    /// Unique job id, used for log correlation.
    pub id: Uuid,

    /// Who is paying for and receiving the result.
    pub requester: RequesterId,

    /// Render parameters, opaque to the dispatch core.
    pub params: RenderParams,

    /// Ledger cost of the job.
    pub cost: u64,
}

impl JobRequest {
    /// Create a job with a fresh id.
    pub fn new(requester: RequesterId, params: RenderParams, cost: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            requester,
            params,
            cost,
        }
    }
}

/// The outcome of a successfully dispatched job.
#[derive(Debug, Clone)]
pub struct JobResult {
    /// Decoded images, one entry per image in the backend's batch response.
    pub images: Vec<Vec<u8>>,

    /// The endpoint that served the job.
    pub endpoint: Url,
}
