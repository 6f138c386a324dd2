//! Nullable event subscriber: captures emitted ledger events.

use ballot_governance::{LedgerEvent, Listener};
use std::sync::{Arc, Mutex, PoisonError};

/// Records every event it is subscribed to, in emission order.
///
/// Cloning shares the same buffer, so keep one clone for assertions and hand
/// [`EventRecorder::listener`] to the ledger.
#[derive(Clone, Default)]
pub struct EventRecorder {
    events: Arc<Mutex<Vec<LedgerEvent>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A listener that appends into this recorder.
    pub fn listener(&self) -> Listener {
        let events = Arc::clone(&self.events);
        Box::new(move |event| {
            events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(event.clone());
        })
    }

    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<LedgerEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
