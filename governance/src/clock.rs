//! Time source seam.
//!
//! Proposal status is a pure function of the stored deadline and the time
//! reported here; nothing is scheduled when a proposal closes.

use ballot_types::Timestamp;

/// Supplies the current time to the ledger.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time from the operating system.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}
