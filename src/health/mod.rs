//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Scheduled path (monitor.rs):
//!     interval tick → probe every endpoint concurrently → write liveness
//!
//! On-demand path (probe.rs, via BackendSelector):
//!     live subset empty → immediate sweep → selector retries once
//! ```
//!
//! # Design Decisions
//! - A probe failure is data, never an error; the prober only writes flags
//! - Dispatches never pay probe latency unless the whole pool looks dead
//! - The monitor loop is cancellable between and inside sweeps

mod monitor;
mod probe;

pub use monitor::HealthMonitor;
pub use probe::HealthProber;
