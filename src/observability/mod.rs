//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via `tracing`; every dispatch decision carries the
//!   job id and requester as fields
//! - Metrics go through the `metrics` facade; the embedder installs the
//!   exporter of its choice
//! - Metric updates are cheap enough to sit on the dispatch hot path

pub mod logging;
pub mod metrics;
