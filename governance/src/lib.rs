//! Time-boxed binary proposals.
//!
//! Any account may create a proposal with a voting window, and any account may
//! cast exactly one vote (for or against) on it until its deadline. Results
//! and paginated listings are answerable at any time, including after the
//! proposal has closed.
//!
//! [`LedgerState`] holds the pure transition logic; [`VotingLedger`] adds the
//! lock discipline, the clock and event emission.

pub mod clock;
pub mod engine;
pub mod error;
pub mod event;
pub mod params;
pub mod proposal;
pub mod range;
pub mod state;
pub mod vote_record;

pub use clock::{Clock, SystemClock};
pub use engine::VotingLedger;
pub use error::VotingError;
pub use event::{EventBus, LedgerEvent, Listener};
pub use params::{LedgerLimits, MAX_BATCH, MAX_DESCRIPTION_LEN};
pub use proposal::{Proposal, ProposalOutcome, ProposalStatus};
pub use range::{ProposalRange, RangeRow};
pub use state::LedgerState;
pub use vote_record::{VoteRecord, VoteState};
