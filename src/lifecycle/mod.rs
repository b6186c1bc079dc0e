//! Lifecycle management subsystem.
//!
//! # Design Decisions
//! - One broadcast coordinator per gateway; the monitor loop and every
//!   in-flight dispatch subscribe to it
//! - Shutdown is observable after the fact (`is_triggered`), so work that
//!   starts late still sees it
//! - In-flight jobs are not killed: they either finish or fail through the
//!   normal compensation path

mod shutdown;

pub use shutdown::Shutdown;
