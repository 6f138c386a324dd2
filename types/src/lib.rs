//! Fundamental types for the ballot ledger.
//!
//! This crate defines the primitives shared across every other crate in the
//! workspace: account identifiers, proposal identifiers and timestamps.

pub mod account;
pub mod error;
pub mod proposal_id;
pub mod time;

pub use account::AccountId;
pub use error::AccountIdError;
pub use proposal_id::ProposalId;
pub use time::Timestamp;
