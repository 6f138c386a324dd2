use ballot_types::{AccountId, ProposalId, Timestamp};
use thiserror::Error;

/// Every way a ledger operation can be refused.
///
/// All variants are validation or state-conflict failures. None of them is
/// transient, and an operation that returns one has changed nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VotingError {
    #[error("proposal description is empty")]
    EmptyDescription,

    #[error("proposal description is too long: {len} > {max} characters")]
    DescriptionTooLong { len: usize, max: usize },

    /// Raised for a zero voting duration and, by the range queries, for a
    /// batch count outside `1..=max_batch`.
    #[error("invalid duration or batch count: {0}")]
    InvalidDuration(u64),

    #[error("proposal {0} does not exist")]
    ProposalNotExist(ProposalId),

    #[error("voting on proposal {proposal_id} closed at {deadline} (now {now})")]
    VotingClosed {
        proposal_id: ProposalId,
        deadline: Timestamp,
        now: Timestamp,
    },

    #[error("account {voter} has already voted on proposal {proposal_id}")]
    AlreadyVoted {
        proposal_id: ProposalId,
        voter: AccountId,
    },
}

impl VotingError {
    /// Stable name of the error kind, for callers that map kinds to messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyDescription => "EmptyDescription",
            Self::DescriptionTooLong { .. } => "DescriptionTooLong",
            Self::InvalidDuration(_) => "InvalidDuration",
            Self::ProposalNotExist(_) => "ProposalNotExist",
            Self::VotingClosed { .. } => "VotingClosed",
            Self::AlreadyVoted { .. } => "AlreadyVoted",
        }
    }
}
