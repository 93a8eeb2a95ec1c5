use serde::{Deserialize, Serialize};

use domtap_core_types::Outcome;

/// Recorded effect of one action execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReport {
    pub outcome: Outcome,

    /// Synthetic events actually sent before completion or halt.
    pub events_sent: usize,

    /// Nodes detached by a prune action.
    pub removed: usize,

    /// Whether focus was requested on the target.
    pub focused: bool,
}

impl DispatchReport {
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            events_sent: 0,
            removed: 0,
            focused: false,
        }
    }

    pub fn with_events_sent(mut self, events_sent: usize) -> Self {
        self.events_sent = events_sent;
        self
    }

    pub fn with_removed(mut self, removed: usize) -> Self {
        self.removed = removed;
        self
    }

    pub fn with_focus(mut self) -> Self {
        self.focused = true;
        self
    }
}
