use serde::{Deserialize, Serialize};

/// Pure description of what to do with a resolved target.
///
/// Execution lives in the dispatcher; keeping the description inert lets
/// the same action be dry-run in tests and carried inside playbook data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Action {
    /// Resolve only; touch nothing. Used for dry runs and idempotence
    /// checks.
    ResolveOnly,

    /// The full pointer/mouse click simulation sequence.
    ClickSequence,

    /// Request focus first, then run the click sequence.
    FocusThenClickSequence,

    /// Keep the first matched node, remove every later match from the
    /// tree, then set the survivor's text. Operates on the whole ordered
    /// candidate set, not a single tie-broken winner.
    PruneKeepFirstAndSetText { text: String },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::ResolveOnly => "resolve-only",
            Action::ClickSequence => "click-sequence",
            Action::FocusThenClickSequence => "focus-then-click-sequence",
            Action::PruneKeepFirstAndSetText { .. } => "prune-keep-first-and-set-text",
        }
    }

    /// Whether the action consumes the full ordered candidate list rather
    /// than the single tie-broken winner.
    pub fn wants_candidate_list(&self) -> bool {
        matches!(self, Action::PruneKeepFirstAndSetText { .. })
    }

    /// Whether the action mutates the tree or dispatches events at all.
    pub fn is_read_only(&self) -> bool {
        matches!(self, Action::ResolveOnly)
    }
}
