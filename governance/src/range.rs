//! Paginated listing results.

use crate::proposal::Proposal;
use ballot_types::{AccountId, ProposalId, Timestamp};
use serde::Serialize;

/// A contiguous, id-ordered window of proposals.
///
/// Stored as five parallel sequences; index `i` in every sequence refers to
/// proposal `start + i`. The sequences always have the same length.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProposalRange {
    pub start: ProposalId,
    pub descriptions: Vec<String>,
    pub votes_for: Vec<u64>,
    pub votes_against: Vec<u64>,
    pub creators: Vec<AccountId>,
    pub deadlines: Vec<Timestamp>,
}

/// One proposal's entry in a [`ProposalRange`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangeRow<'a> {
    pub id: ProposalId,
    pub description: &'a str,
    pub votes_for: u64,
    pub votes_against: u64,
    pub creator: &'a AccountId,
    pub deadline: Timestamp,
}

impl ProposalRange {
    pub(crate) fn with_capacity(start: ProposalId, capacity: usize) -> Self {
        Self {
            start,
            descriptions: Vec::with_capacity(capacity),
            votes_for: Vec::with_capacity(capacity),
            votes_against: Vec::with_capacity(capacity),
            creators: Vec::with_capacity(capacity),
            deadlines: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, proposal: &Proposal) {
        self.descriptions.push(proposal.description.clone());
        self.votes_for.push(proposal.votes_for);
        self.votes_against.push(proposal.votes_against);
        self.creators.push(proposal.creator.clone());
        self.deadlines.push(proposal.deadline);
    }

    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }

    /// Identifiers covered by this window, ascending.
    pub fn ids(&self) -> impl Iterator<Item = ProposalId> + '_ {
        (self.start.as_u64()..).take(self.len()).map(ProposalId::new)
    }

    pub fn rows(&self) -> impl Iterator<Item = RangeRow<'_>> + '_ {
        self.ids().enumerate().map(move |(i, id)| RangeRow {
            id,
            description: &self.descriptions[i],
            votes_for: self.votes_for[i],
            votes_against: self.votes_against[i],
            creator: &self.creators[i],
            deadline: self.deadlines[i],
        })
    }
}
