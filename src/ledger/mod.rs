//! Ledger boundary.
//!
//! The gateway never stores balances itself; it consumes an external ledger
//! through exactly two operations, `debit` and `credit`. The balance check
//! lives behind `debit` so it cannot race with the charge.

mod memory;

pub use memory::MemoryLedger;

use async_trait::async_trait;
use thiserror::Error;

use crate::dispatch::RequesterId;

/// Errors reported by a ledger implementation.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The requester cannot cover the debit.
    #[error("insufficient funds: balance {balance} is below {required}")]
    InsufficientFunds { balance: u64, required: u64 },

    /// The ledger store could not be reached or rejected the operation.
    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

/// External balance store.
///
/// Implementations must be safe to call concurrently for different
/// requesters. The gateway invokes each operation at most once per logical
/// reservation step, so idempotence is not required.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Withdraw `amount` and return the new balance.
    ///
    /// Fails with [`LedgerError::InsufficientFunds`] when the balance does
    /// not cover the amount, leaving the balance untouched.
    async fn debit(&self, requester: RequesterId, amount: u64) -> Result<u64, LedgerError>;

    /// Deposit `amount` and return the new balance.
    async fn credit(&self, requester: RequesterId, amount: u64) -> Result<u64, LedgerError>;
}
