//! Ledger state and its transitions.
//!
//! `LedgerState` is the whole voting state machine: a densely-indexed list of
//! proposals (index = id), the vote-record set, and the limits in force.
//! Every transition takes the caller and the current time explicitly and
//! either applies completely or returns an error having changed nothing.
//! Locking and event emission live in [`crate::engine`].

use crate::error::VotingError;
use crate::params::LedgerLimits;
use crate::proposal::{Proposal, ProposalOutcome};
use crate::range::ProposalRange;
use crate::vote_record::VoteRecord;
use ballot_types::{AccountId, ProposalId, Timestamp};

#[derive(Clone, Debug, Default)]
pub struct LedgerState {
    proposals: Vec<Proposal>,
    votes: VoteRecord,
    limits: LedgerLimits,
}

impl LedgerState {
    pub fn new(limits: LedgerLimits) -> Self {
        Self {
            proposals: Vec::new(),
            votes: VoteRecord::new(),
            limits,
        }
    }

    pub fn limits(&self) -> LedgerLimits {
        self.limits
    }

    /// Number of proposals ever created. Also the id the next one receives.
    pub fn proposal_count(&self) -> u64 {
        self.proposals.len() as u64
    }

    // ── Mutations ───────────────────────────────────────────────────────

    /// Append a proposal open until `now + duration_secs`.
    pub fn create_proposal(
        &mut self,
        creator: &AccountId,
        description: &str,
        duration_secs: u64,
        now: Timestamp,
    ) -> Result<ProposalId, VotingError> {
        let len = description.chars().count();
        if len == 0 {
            return Err(VotingError::EmptyDescription);
        }
        if len > self.limits.max_description_len {
            return Err(VotingError::DescriptionTooLong {
                len,
                max: self.limits.max_description_len,
            });
        }
        if duration_secs == 0 {
            return Err(VotingError::InvalidDuration(duration_secs));
        }

        let id = ProposalId::new(self.proposal_count());
        let deadline = now.saturating_add_secs(duration_secs);
        self.proposals.push(Proposal::new(
            id,
            description.to_owned(),
            creator.clone(),
            deadline,
        ));
        Ok(id)
    }

    /// Tally one vote from `voter`.
    ///
    /// Checks run in a fixed order: existence, then deadline, then duplicate.
    /// The counter increment and the vote-record insertion happen together
    /// after all checks pass.
    pub fn vote(
        &mut self,
        voter: &AccountId,
        proposal_id: ProposalId,
        support: bool,
        now: Timestamp,
    ) -> Result<(), VotingError> {
        let index = self.index_of(proposal_id)?;
        let deadline = self.proposals[index].deadline;
        if now > deadline {
            return Err(VotingError::VotingClosed {
                proposal_id,
                deadline,
                now,
            });
        }
        if self.votes.has_voted(proposal_id, voter) {
            return Err(VotingError::AlreadyVoted {
                proposal_id,
                voter: voter.clone(),
            });
        }

        self.votes.insert(proposal_id, voter.clone());
        self.proposals[index].record_vote(support);
        Ok(())
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn proposal(&self, proposal_id: ProposalId) -> Result<&Proposal, VotingError> {
        let index = self.index_of(proposal_id)?;
        Ok(&self.proposals[index])
    }

    pub fn outcome(&self, proposal_id: ProposalId) -> Result<ProposalOutcome, VotingError> {
        self.proposal(proposal_id).map(Proposal::outcome)
    }

    /// Proposals `[start, start + count)`, clipped to the last proposal.
    ///
    /// `count` must lie in `1..=max_batch` and `start` must name an existing
    /// proposal.
    pub fn range(&self, start: ProposalId, count: u64) -> Result<ProposalRange, VotingError> {
        if !self.limits.accepts_batch(count) {
            return Err(VotingError::InvalidDuration(count));
        }
        let total = self.proposal_count();
        if start.as_u64() >= total {
            return Err(VotingError::ProposalNotExist(start));
        }

        // start < total <= usize::MAX, so both bounds fit.
        let first = start.as_u64() as usize;
        let end = start.as_u64().saturating_add(count).min(total) as usize;
        let window = &self.proposals[first..end];

        let mut range = ProposalRange::with_capacity(start, window.len());
        for proposal in window {
            range.push(proposal);
        }
        Ok(range)
    }

    /// The most recent `min(max, proposal_count)` proposals, ascending.
    ///
    /// `max` is validated like a range `count`. An empty ledger yields an
    /// empty range instead of an error.
    pub fn latest(&self, max: u64) -> Result<ProposalRange, VotingError> {
        if !self.limits.accepts_batch(max) {
            return Err(VotingError::InvalidDuration(max));
        }
        let total = self.proposal_count();
        if total == 0 {
            return Ok(ProposalRange::default());
        }
        let start = total - max.min(total);
        self.range(ProposalId::new(start), max)
    }

    pub fn has_voted(&self, proposal_id: ProposalId, voter: &AccountId) -> bool {
        self.votes.has_voted(proposal_id, voter)
    }

    fn index_of(&self, proposal_id: ProposalId) -> Result<usize, VotingError> {
        proposal_id
            .index()
            .filter(|&i| i < self.proposals.len())
            .ok_or(VotingError::ProposalNotExist(proposal_id))
    }
}
