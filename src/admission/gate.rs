//! Per-requester admission gate.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::admission::reservation::Reservation;
use crate::dispatch::RequesterId;
use crate::error::GatewayError;
use crate::ledger::{Ledger, LedgerError};

/// Enforces the single-in-flight-job-per-requester policy and performs
/// reserve/compensate accounting against the external ledger.
pub struct AdmissionController {
    /// Requesters currently holding a ticket.
    in_flight: Mutex<HashSet<RequesterId>>,
    ledger: Arc<dyn Ledger>,
}

impl AdmissionController {
    pub fn new(ledger: Arc<dyn Ledger>) -> Self {
        Self {
            in_flight: Mutex::new(HashSet::new()),
            ledger,
        }
    }

    /// Atomically admit a requester.
    ///
    /// Membership check and insert happen under one guard, so two concurrent
    /// submissions from the same requester can never both pass. Rejection
    /// leaves no state behind.
    pub fn try_admit(self: &Arc<Self>, requester: RequesterId) -> Result<AdmissionTicket, GatewayError> {
        let mut in_flight = self.in_flight.lock().expect("admission mutex poisoned");
        if !in_flight.insert(requester) {
            tracing::debug!(%requester, "Admission rejected, job already in flight");
            return Err(GatewayError::AlreadyInFlight);
        }
        crate::observability::metrics::record_in_flight(in_flight.len());
        Ok(AdmissionTicket {
            gate: self.clone(),
            requester,
        })
    }

    /// Debit the job cost and hand back an armed reservation.
    pub async fn reserve(
        &self,
        requester: RequesterId,
        cost: u64,
    ) -> Result<Reservation, GatewayError> {
        match self.ledger.debit(requester, cost).await {
            Ok(balance) => {
                tracing::debug!(%requester, cost, balance, "Reserved job cost");
                Ok(Reservation::new(self.ledger.clone(), requester, cost))
            }
            Err(LedgerError::InsufficientFunds { balance, required }) => {
                Err(GatewayError::InsufficientFunds { balance, required })
            }
            Err(LedgerError::Unavailable(reason)) => Err(GatewayError::Ledger(reason)),
        }
    }

    /// Whether a requester currently holds a ticket.
    pub fn is_in_flight(&self, requester: RequesterId) -> bool {
        self.in_flight
            .lock()
            .expect("admission mutex poisoned")
            .contains(&requester)
    }

    fn release(&self, requester: RequesterId) {
        let mut in_flight = self.in_flight.lock().expect("admission mutex poisoned");
        in_flight.remove(&requester);
        crate::observability::metrics::record_in_flight(in_flight.len());
    }
}

/// Proof that a requester has at most one job in flight.
///
/// Dropping the ticket releases the requester; dispatch holds it for the
/// whole job scope so release runs on every exit path, exactly once, last.
pub struct AdmissionTicket {
    gate: Arc<AdmissionController>,
    requester: RequesterId,
}

impl Drop for AdmissionTicket {
    fn drop(&mut self) {
        self.gate.release(self.requester);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::ledger::MemoryLedger;

    fn controller() -> (Arc<AdmissionController>, MemoryLedger) {
        let ledger = MemoryLedger::new();
        (
            Arc::new(AdmissionController::new(Arc::new(ledger.clone()))),
            ledger,
        )
    }

    #[tokio::test]
    async fn test_second_admission_is_rejected() {
        let (gate, _) = controller();
        let user = RequesterId(1);

        let ticket = gate.try_admit(user).unwrap();
        assert!(matches!(
            gate.try_admit(user),
            Err(GatewayError::AlreadyInFlight)
        ));

        drop(ticket);
        assert!(gate.try_admit(user).is_ok());
    }

    #[tokio::test]
    async fn test_distinct_requesters_are_independent() {
        let (gate, _) = controller();

        let _a = gate.try_admit(RequesterId(1)).unwrap();
        let _b = gate.try_admit(RequesterId(2)).unwrap();
        assert!(gate.is_in_flight(RequesterId(1)));
        assert!(gate.is_in_flight(RequesterId(2)));
    }

    #[tokio::test]
    async fn test_ticket_releases_on_drop() {
        let (gate, _) = controller();
        let user = RequesterId(1);

        {
            let _ticket = gate.try_admit(user).unwrap();
            assert!(gate.is_in_flight(user));
        }
        assert!(!gate.is_in_flight(user));
    }

    #[test]
    fn test_concurrent_admissions_linearize() {
        let (gate, _) = controller();
        let user = RequesterId(1);

        // Successful tickets are parked here so they stay alive until every
        // thread has attempted admission.
        let admitted = Arc::new(Mutex::new(Vec::new()));
        let barrier = Arc::new(std::sync::Barrier::new(16));

        let threads: Vec<_> = (0..16)
            .map(|_| {
                let gate = gate.clone();
                let admitted = admitted.clone();
                let barrier = barrier.clone();
                std::thread::spawn(move || {
                    barrier.wait();
                    if let Ok(ticket) = gate.try_admit(user) {
                        admitted.lock().unwrap().push(ticket);
                    }
                })
            })
            .collect();
        for thread in threads {
            thread.join().unwrap();
        }

        assert_eq!(admitted.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reserve_maps_ledger_errors() {
        let (gate, ledger) = controller();
        let user = RequesterId(1);
        ledger.set_balance(user, 40);

        let err = gate.reserve(user, 100).await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::InsufficientFunds {
                balance: 40,
                required: 100
            }
        ));
        // Failed reserve leaves no debit behind.
        assert_eq!(ledger.balance(user), 40);
    }
}
