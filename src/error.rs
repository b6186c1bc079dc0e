//! Caller-facing error taxonomy.
//!
//! Every rejection and failure maps to a distinct variant so the command
//! layer can react differently to a busy requester, an empty wallet and a
//! down render pool.

use thiserror::Error;

use crate::remote::BackendError;

/// Errors surfaced by [`crate::dispatch::DispatchClient::submit`].
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The requester already has a job in flight.
    #[error("a job for this requester is already in flight")]
    AlreadyInFlight,

    /// The ledger refused the debit.
    #[error("insufficient funds: balance {balance} is below the job cost {required}")]
    InsufficientFunds { balance: u64, required: u64 },

    /// No backend answered, even after an on-demand probe sweep.
    #[error("no render backend available")]
    NoBackendAvailable,

    /// The remote call against the selected backend failed.
    #[error("dispatch failed: {0}")]
    DispatchFailed(#[from] BackendError),

    /// The gateway is shutting down; the job was not (or no longer) dispatched.
    #[error("gateway is shutting down")]
    ShuttingDown,

    /// The ledger failed for a reason other than insufficient funds.
    #[error("ledger error: {0}")]
    Ledger(String),
}

impl GatewayError {
    /// Stable label for metrics and logs.
    pub fn outcome(&self) -> &'static str {
        match self {
            GatewayError::AlreadyInFlight => "already_in_flight",
            GatewayError::InsufficientFunds { .. } => "insufficient_funds",
            GatewayError::NoBackendAvailable => "no_backend",
            GatewayError::DispatchFailed(_) => "dispatch_failed",
            GatewayError::ShuttingDown => "shutting_down",
            GatewayError::Ledger(_) => "ledger_error",
        }
    }
}
