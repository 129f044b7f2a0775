// src/core/sequencer.rs
//! Request-id fencing for overlapping async calls
//!
//! Every call is tagged with a ticket when it starts. When the response
//! arrives, it is applied only if its ticket is still the latest one issued
//! for the same slot; a slower earlier call can no longer overwrite a newer
//! result.

use parking_lot::Mutex;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestTicket {
    slot: String,
    id: u64,
}

impl RequestTicket {
    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

#[derive(Debug, Default)]
pub struct RequestSequencer {
    next_id: Mutex<u64>,
    latest: Mutex<HashMap<String, u64>>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new ticket for `slot`, superseding any earlier one.
    pub fn issue(&self, slot: &str) -> RequestTicket {
        let id = {
            let mut next = self.next_id.lock();
            *next += 1;
            *next
        };
        self.latest.lock().insert(slot.to_string(), id);
        RequestTicket {
            slot: slot.to_string(),
            id,
        }
    }

    pub fn is_latest(&self, ticket: &RequestTicket) -> bool {
        self.latest.lock().get(&ticket.slot) == Some(&ticket.id)
    }

    /// Returns whether the ticket was the latest. Only the latest ticket
    /// closes its slot.
    pub fn settle(&self, ticket: &RequestTicket) -> bool {
        let mut latest = self.latest.lock();
        if latest.get(&ticket.slot) == Some(&ticket.id) {
            latest.remove(&ticket.slot);
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self, slot: &str) -> bool {
        self.latest.lock().contains_key(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_increase_monotonically() {
        let sequencer = RequestSequencer::new();
        let a = sequencer.issue("chat");
        let b = sequencer.issue("summary");
        let c = sequencer.issue("chat");
        assert!(a.id() < b.id() && b.id() < c.id());
    }

    #[test]
    fn test_stale_ticket_is_rejected() {
        let sequencer = RequestSequencer::new();
        let first = sequencer.issue("chat");
        let second = sequencer.issue("chat");

        assert!(!sequencer.is_latest(&first));
        assert!(sequencer.is_latest(&second));

        // Late arrival of the first response is discarded.
        assert!(!sequencer.settle(&first));
        assert!(sequencer.is_pending("chat"));
        assert!(sequencer.settle(&second));
        assert!(!sequencer.is_pending("chat"));
    }

    #[test]
    fn test_slots_are_independent() {
        let sequencer = RequestSequencer::new();
        let summary = sequencer.issue("summary");
        let _skills = sequencer.issue("skills");
        assert!(sequencer.is_latest(&summary));
        assert_eq!(summary.slot(), "summary");
    }
}
