//! Dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! submit(JobRequest)
//!     → admission gate (AlreadyInFlight?)
//!     → reservation (InsufficientFunds?)
//!     → backend selection (NoBackendAvailable?)
//!     → remote render call (DispatchFailed?)
//!     → JobResult
//! ```
//!
//! Side effects are strictly ordered: the reservation is compensated before
//! the admission ticket is released, on every failure path; the ticket is
//! always released last.

mod client;
mod job;

pub use client::DispatchClient;
pub use job::{JobRequest, JobResult, RequesterId};
