//! Scoped ledger reservation.

use std::sync::Arc;

use crate::dispatch::RequesterId;
use crate::ledger::Ledger;

/// A debit awaiting the job outcome.
///
/// Created armed by [`super::AdmissionController::reserve`]. Exactly one of
/// [`consume`](Reservation::consume) (job completed, debit kept) or
/// [`compensate`](Reservation::compensate) (job failed, equal credit)
/// disarms it. If the job future is dropped while armed — caller
/// cancellation, or a panic unwinding through dispatch — `Drop` spawns the
/// compensating credit so the debit is never silently kept.
#[must_use = "a reservation must be consumed or compensated"]
pub struct Reservation {
    ledger: Arc<dyn Ledger>,
    requester: RequesterId,
    amount: u64,
    armed: bool,
}

impl Reservation {
    pub(crate) fn new(ledger: Arc<dyn Ledger>, requester: RequesterId, amount: u64) -> Self {
        Self {
            ledger,
            requester,
            amount,
            armed: true,
        }
    }

    pub fn requester(&self) -> RequesterId {
        self.requester
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    /// Keep the debit: the job completed and the reservation is spent.
    pub fn consume(mut self) {
        self.armed = false;
    }

    /// Credit back the reserved amount after a failed job.
    pub async fn compensate(mut self) {
        self.armed = false;
        refund(self.ledger.as_ref(), self.requester, self.amount).await;
    }
}

impl std::fmt::Debug for Reservation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reservation")
            .field("requester", &self.requester)
            .field("amount", &self.amount)
            .field("armed", &self.armed)
            .finish()
    }
}

impl Drop for Reservation {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        // Dropped while armed: the dispatch future was cancelled between the
        // debit and the outcome. Drop cannot await, so the credit is spawned
        // on the runtime that ran the job.
        tracing::warn!(
            requester = %self.requester,
            amount = self.amount,
            "Reservation dropped while armed, spawning compensation"
        );
        let ledger = self.ledger.clone();
        let requester = self.requester;
        let amount = self.amount;
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    refund(ledger.as_ref(), requester, amount).await;
                });
            }
            Err(_) => {
                tracing::error!(
                    %requester,
                    amount,
                    "No runtime available to compensate dropped reservation; ledger is inconsistent"
                );
            }
        }
    }
}

async fn refund(ledger: &dyn Ledger, requester: RequesterId, amount: u64) {
    match ledger.credit(requester, amount).await {
        Ok(balance) => {
            tracing::debug!(%requester, amount, balance, "Compensated reservation");
        }
        Err(e) => {
            // The round-trip law is broken; this must never pass silently.
            tracing::error!(
                %requester,
                amount,
                error = %e,
                "Compensation credit failed; ledger is inconsistent"
            );
        }
    }
}
