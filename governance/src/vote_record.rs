//! The vote-record set: which accounts have voted on which proposal.
//!
//! Only membership is stored. The direction of each vote lives solely in the
//! proposal's aggregate counters, so "has not voted" can never be confused
//! with "voted against".

use ballot_types::{AccountId, ProposalId};
use std::collections::{HashMap, HashSet};

/// Whether an account has voted on a given proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoteState {
    NotVoted,
    Voted,
}

#[derive(Clone, Debug, Default)]
pub struct VoteRecord {
    voted: HashMap<ProposalId, HashSet<AccountId>>,
}

impl VoteRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, proposal_id: ProposalId, voter: &AccountId) -> VoteState {
        let voted = self
            .voted
            .get(&proposal_id)
            .is_some_and(|voters| voters.contains(voter));
        if voted {
            VoteState::Voted
        } else {
            VoteState::NotVoted
        }
    }

    pub fn has_voted(&self, proposal_id: ProposalId, voter: &AccountId) -> bool {
        self.state(proposal_id, voter) == VoteState::Voted
    }

    /// Record a vote. Returns `false` if the pair was already present.
    pub fn insert(&mut self, proposal_id: ProposalId, voter: AccountId) -> bool {
        self.voted.entry(proposal_id).or_default().insert(voter)
    }

    /// Total number of recorded (proposal, account) pairs.
    pub fn len(&self) -> usize {
        self.voted.values().map(HashSet::len).sum()
    }

    /// Number of accounts that have voted on one proposal.
    pub fn voters_of(&self, proposal_id: ProposalId) -> usize {
        self.voted.get(&proposal_id).map_or(0, HashSet::len)
    }

    pub fn is_empty(&self) -> bool {
        self.voted.is_empty()
    }
}
