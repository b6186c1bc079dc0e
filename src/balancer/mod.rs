//! Backend pool and selection subsystem.
//!
//! # Data Flow
//! ```text
//! Configured addresses
//!     → registry.rs (fixed endpoint set, liveness snapshots)
//!     → selector.rs (uniform random over the live subset)
//!         → on empty live subset: one on-demand probe sweep, retry once
//!     → endpoint.rs (per-endpoint atomic liveness state)
//! ```
//!
//! # Design Decisions
//! - The endpoint set is fixed at construction; only liveness mutates
//! - Snapshot reads are lock-free; staleness up to one probe interval is an
//!   accepted bound, not a defect
//! - Selection is uniformly random so load spreads without a load signal

mod endpoint;
mod registry;
mod selector;

pub use endpoint::BackendEndpoint;
pub use registry::BackendRegistry;
pub use selector::BackendSelector;
