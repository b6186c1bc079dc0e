//! Resilient dispatch gateway for Stable Diffusion render pools.
//!
//! Accepts image-generation jobs from single requesters, protects a shared
//! render pool from overload, and routes each job to one of several
//! interchangeable backends while tolerating backend unavailability.
//!
//! # Architecture Overview
//!
//! ```text
//! submit(JobRequest)
//!     │
//!     ▼
//! ┌────────────┐   ┌─────────────┐   ┌────────────┐   ┌────────────┐
//! │ admission  │──▶│ reservation │──▶│  balancer  │──▶│   remote   │──▶ backend
//! │   gate     │   │  (ledger)   │   │  selector  │   │  (web UI)  │
//! └────────────┘   └─────────────┘   └─────┬──────┘   └────────────┘
//!                                          │ liveness
//!                                    ┌─────┴──────┐
//!                                    │   health    │◀── background loop
//!                                    │  monitor    │
//!                                    └────────────┘
//! ```
//!
//! A failed dispatch compensates the ledger debit before the admission
//! ticket is released; a failed dispatch is reported, never retried against
//! another backend.

// Core subsystems
pub mod balancer;
pub mod dispatch;
pub mod health;
pub mod remote;

// Accounting
pub mod admission;
pub mod ledger;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;

mod error;
mod gateway;

pub use config::GatewayConfig;
pub use dispatch::{JobRequest, JobResult, RequesterId};
pub use error::GatewayError;
pub use gateway::{BuildError, Gateway};
pub use ledger::{Ledger, LedgerError, MemoryLedger};
pub use lifecycle::Shutdown;
pub use remote::{RenderBackend, RenderParams};
