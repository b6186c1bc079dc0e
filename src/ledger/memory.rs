//! In-memory ledger.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::dispatch::RequesterId;
use crate::ledger::{Ledger, LedgerError};

/// A concurrent balance map.
///
/// Backs the test-suite and embedders that do not wire a persistent economy
/// store. Each operation holds only the per-requester shard entry, so debits
/// and credits for different requesters never contend.
#[derive(Clone, Default)]
pub struct MemoryLedger {
    balances: Arc<DashMap<RequesterId, u64>>,
}

impl MemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a requester's balance, creating the account if needed.
    pub fn set_balance(&self, requester: RequesterId, balance: u64) {
        self.balances.insert(requester, balance);
    }

    /// Read a requester's balance (0 for unknown accounts).
    pub fn balance(&self, requester: RequesterId) -> u64 {
        self.balances.get(&requester).map(|b| *b).unwrap_or(0)
    }
}

#[async_trait]
impl Ledger for MemoryLedger {
    async fn debit(&self, requester: RequesterId, amount: u64) -> Result<u64, LedgerError> {
        // The entry guard holds the shard lock, making check-and-subtract atomic.
        let mut balance = self.balances.entry(requester).or_insert(0);
        if *balance < amount {
            return Err(LedgerError::InsufficientFunds {
                balance: *balance,
                required: amount,
            });
        }
        *balance -= amount;
        Ok(*balance)
    }

    async fn credit(&self, requester: RequesterId, amount: u64) -> Result<u64, LedgerError> {
        let mut balance = self.balances.entry(requester).or_insert(0);
        *balance = balance.saturating_add(amount);
        Ok(*balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_debit_and_credit() {
        let ledger = MemoryLedger::new();
        let user = RequesterId(7);
        ledger.set_balance(user, 150);

        assert_eq!(ledger.debit(user, 100).await.unwrap(), 50);
        assert_eq!(ledger.credit(user, 25).await.unwrap(), 75);
        assert_eq!(ledger.balance(user), 75);
    }

    #[tokio::test]
    async fn test_debit_rejects_overdraft() {
        let ledger = MemoryLedger::new();
        let user = RequesterId(7);
        ledger.set_balance(user, 40);

        let err = ledger.debit(user, 100).await.unwrap_err();
        match err {
            LedgerError::InsufficientFunds { balance, required } => {
                assert_eq!(balance, 40);
                assert_eq!(required, 100);
            }
            other => panic!("unexpected error: {other}"),
        }
        // Balance untouched by the failed debit.
        assert_eq!(ledger.balance(user), 40);
    }

    #[tokio::test]
    async fn test_unknown_account_has_zero_balance() {
        let ledger = MemoryLedger::new();
        let user = RequesterId(99);

        assert_eq!(ledger.balance(user), 0);
        assert!(ledger.debit(user, 1).await.is_err());
        assert_eq!(ledger.credit(user, 10).await.unwrap(), 10);
    }
}
