//! Thread-safe voting ledger service.
//!
//! Wraps [`LedgerState`] in a single `RwLock`: mutations take the write lock
//! for the whole check-apply-emit sequence, reads share the read lock and
//! always observe a counter update together with its vote-record entry.

use crate::clock::Clock;
use crate::error::VotingError;
use crate::event::{EventBus, LedgerEvent, Listener};
use crate::params::LedgerLimits;
use crate::proposal::{Proposal, ProposalOutcome, ProposalStatus};
use crate::range::ProposalRange;
use crate::state::LedgerState;
use ballot_types::{AccountId, ProposalId, Timestamp};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

/// The authoritative proposal/vote ledger.
///
/// Share it between threads behind an `Arc`. Subscribe listeners before
/// sharing; they are fixed once the ledger is in use.
pub struct VotingLedger {
    state: RwLock<LedgerState>,
    clock: Arc<dyn Clock>,
    events: EventBus,
}

impl VotingLedger {
    /// An empty ledger with default limits.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_limits(clock, LedgerLimits::default())
    }

    pub fn with_limits(clock: Arc<dyn Clock>, limits: LedgerLimits) -> Self {
        Self {
            state: RwLock::new(LedgerState::new(limits)),
            clock,
            events: EventBus::new(),
        }
    }

    /// Register a listener for [`LedgerEvent`]s.
    pub fn subscribe(&mut self, listener: Listener) {
        self.events.subscribe(listener);
    }

    pub fn limits(&self) -> LedgerLimits {
        self.read().limits()
    }

    /// Current time as seen by this ledger.
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    // ── Mutations ───────────────────────────────────────────────────────

    /// Create a proposal open for `duration_secs` from now.
    pub fn create_proposal(
        &self,
        caller: &AccountId,
        description: &str,
        duration_secs: u64,
    ) -> Result<ProposalId, VotingError> {
        let mut state = self.write();
        let now = self.clock.now();
        let id = state
            .create_proposal(caller, description, duration_secs, now)
            .inspect_err(|e| {
                debug!(kind = e.kind(), creator = %caller, "proposal rejected: {e}");
            })?;

        info!(proposal_id = id.as_u64(), creator = %caller, duration_secs, "proposal created");
        self.events.emit(&LedgerEvent::ProposalCreated {
            proposal_id: id,
            description: description.to_owned(),
            creator: caller.clone(),
        });
        Ok(id)
    }

    /// Cast `caller`'s one vote on a proposal.
    pub fn vote(
        &self,
        caller: &AccountId,
        proposal_id: ProposalId,
        support: bool,
    ) -> Result<(), VotingError> {
        let mut state = self.write();
        let now = self.clock.now();
        state
            .vote(caller, proposal_id, support, now)
            .inspect_err(|e| {
                debug!(
                    kind = e.kind(),
                    proposal_id = proposal_id.as_u64(),
                    voter = %caller,
                    "vote rejected: {e}"
                );
            })?;

        info!(proposal_id = proposal_id.as_u64(), voter = %caller, support, "vote cast");
        self.events.emit(&LedgerEvent::VoteCast {
            proposal_id,
            voter: caller.clone(),
            support,
        });
        Ok(())
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn get_proposal(&self, proposal_id: ProposalId) -> Result<Proposal, VotingError> {
        self.read().proposal(proposal_id).cloned()
    }

    pub fn get_proposals_range(
        &self,
        start: ProposalId,
        count: u64,
    ) -> Result<ProposalRange, VotingError> {
        self.read().range(start, count)
    }

    pub fn get_proposal_result(
        &self,
        proposal_id: ProposalId,
    ) -> Result<ProposalOutcome, VotingError> {
        self.read().outcome(proposal_id)
    }

    pub fn proposal_count(&self) -> u64 {
        self.read().proposal_count()
    }

    /// Whether `account` has voted on the proposal. Unknown proposals report `false`.
    pub fn has_voted(&self, proposal_id: ProposalId, account: &AccountId) -> bool {
        self.read().has_voted(proposal_id, account)
    }

    /// The most recent `min(max, proposal_count)` proposals.
    pub fn latest(&self, max: u64) -> Result<ProposalRange, VotingError> {
        self.read().latest(max)
    }

    /// Whether the proposal currently accepts votes.
    pub fn status(&self, proposal_id: ProposalId) -> Result<ProposalStatus, VotingError> {
        let state = self.read();
        let proposal = state.proposal(proposal_id)?;
        Ok(proposal.status_at(self.clock.now()))
    }

    // A panicking listener poisons the lock only after the state change has
    // fully applied, so the inner state is always consistent.
    fn read(&self) -> RwLockReadGuard<'_, LedgerState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LedgerState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct FixedClock(u64);

    impl Clock for FixedClock {
        fn now(&self) -> Timestamp {
            Timestamp::new(self.0)
        }
    }

    fn account(name: &str) -> AccountId {
        AccountId::new(name).unwrap()
    }

    #[test]
    fn emits_one_event_per_successful_mutation() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut ledger = VotingLedger::new(Arc::new(FixedClock(1_000)));
        let sink = Arc::clone(&seen);
        ledger.subscribe(Box::new(move |event| {
            sink.lock().unwrap().push(event.clone());
        }));

        let alice = account("alice");
        let id = ledger.create_proposal(&alice, "Test Proposal", 3600).unwrap();
        ledger.vote(&alice, id, true).unwrap();
        assert!(ledger.vote(&alice, id, false).is_err());
        assert!(ledger.create_proposal(&alice, "", 3600).is_err());

        let events = seen.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                LedgerEvent::ProposalCreated {
                    proposal_id: id,
                    description: "Test Proposal".into(),
                    creator: alice.clone(),
                },
                LedgerEvent::VoteCast {
                    proposal_id: id,
                    voter: alice.clone(),
                    support: true,
                },
            ]
        );
    }

    #[test]
    fn deadline_computed_from_clock() {
        let ledger = VotingLedger::new(Arc::new(FixedClock(1_000)));
        let id = ledger
            .create_proposal(&account("alice"), "p", 60)
            .unwrap();
        assert_eq!(
            ledger.get_proposal(id).unwrap().deadline,
            Timestamp::new(1_060)
        );
        assert_eq!(ledger.status(id).unwrap(), ProposalStatus::Open);
    }

    #[test]
    fn limits_are_reported() {
        let limits = LedgerLimits {
            max_description_len: 16,
            max_batch: 4,
        };
        let ledger = VotingLedger::with_limits(Arc::new(FixedClock(0)), limits);
        assert_eq!(ledger.limits(), limits);
    }
}
