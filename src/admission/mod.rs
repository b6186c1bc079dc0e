//! Admission and reservation subsystem.
//!
//! # Data Flow
//! ```text
//! submit(job)
//!     → gate.rs: atomic check-and-insert into the in-flight set
//!         → AdmissionTicket (removed on Drop, on every exit path)
//!     → gate.rs: reserve = ledger debit
//!         → reservation.rs: Reservation, armed
//!     → job succeeds  → Reservation::consume (debit kept)
//!     → job fails     → Reservation::compensate (equal credit)
//!     → job cancelled → Reservation::drop spawns the credit
//! ```
//!
//! # Design Decisions
//! - One job in flight per requester, linearized under a single mutex guard
//! - Debit happens before any backend work, credit happens if and only if
//!   the job fails after the debit
//! - A failed compensation credit is a ledger inconsistency and is logged
//!   loudly, never swallowed

mod gate;
mod reservation;

pub use gate::{AdmissionController, AdmissionTicket};
pub use reservation::Reservation;
