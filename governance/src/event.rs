//! Notifications emitted after successful mutations.

use ballot_types::{AccountId, ProposalId};
use serde::Serialize;

/// Ledger events that observers can subscribe to via the [`EventBus`].
///
/// Exactly one event is emitted per successful mutating call and none on
/// failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// A proposal was appended to the ledger.
    ProposalCreated {
        proposal_id: ProposalId,
        description: String,
        creator: AccountId,
    },
    /// A vote was accepted and tallied.
    VoteCast {
        proposal_id: ProposalId,
        voter: AccountId,
        support: bool,
    },
}

/// Callback invoked for every emitted event.
pub type Listener = Box<dyn Fn(&LedgerEvent) + Send + Sync>;

/// Synchronous fan-out event bus for ledger events.
///
/// Listeners are invoked inline while the ledger's write lock is held, so
/// events arrive in commit order. Listeners must not call back into the
/// ledger that emitted the event.
pub struct EventBus {
    listeners: Vec<Listener>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &LedgerEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
