//! Proposals and the values derived from them.

use ballot_types::{AccountId, ProposalId, Timestamp};
use serde::{Deserialize, Serialize};

/// Whether a proposal still accepts votes.
///
/// Derived from the deadline and the current time; there is no stored
/// status and no way back from `Closed` to `Open`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    /// `now <= deadline`: votes are accepted.
    Open,
    /// `now > deadline`: votes are rejected, reads still answer.
    Closed,
}

/// A time-boxed binary proposal.
///
/// Once created only the two vote counters change, and they only grow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Position in creation order.
    pub id: ProposalId,
    /// Free text, 1..=512 characters with default limits.
    pub description: String,
    /// Account that created the proposal.
    pub creator: AccountId,
    /// Last instant (inclusive) at which votes are accepted.
    pub deadline: Timestamp,
    pub votes_for: u64,
    pub votes_against: u64,
}

impl Proposal {
    pub(crate) fn new(
        id: ProposalId,
        description: String,
        creator: AccountId,
        deadline: Timestamp,
    ) -> Self {
        Self {
            id,
            description,
            creator,
            deadline,
            votes_for: 0,
            votes_against: 0,
        }
    }

    /// Voting is allowed exactly at the deadline and rejected strictly after it.
    pub fn is_open_at(&self, now: Timestamp) -> bool {
        now <= self.deadline
    }

    pub fn status_at(&self, now: Timestamp) -> ProposalStatus {
        if self.is_open_at(now) {
            ProposalStatus::Open
        } else {
            ProposalStatus::Closed
        }
    }

    /// Seconds left before the proposal closes; zero at or past the deadline.
    pub fn seconds_remaining(&self, now: Timestamp) -> u64 {
        self.deadline.secs_until(now)
    }

    pub fn total_votes(&self) -> u64 {
        self.votes_for + self.votes_against
    }

    pub fn outcome(&self) -> ProposalOutcome {
        ProposalOutcome {
            passed: self.votes_for > self.votes_against,
            total_votes: self.total_votes(),
        }
    }

    pub(crate) fn record_vote(&mut self, support: bool) {
        if support {
            self.votes_for += 1;
        } else {
            self.votes_against += 1;
        }
    }
}

/// Tally of a proposal at the time of the query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalOutcome {
    /// Strict majority in favour. A tie, including 0-0, does not pass.
    pub passed: bool,
    pub total_votes: u64,
}
