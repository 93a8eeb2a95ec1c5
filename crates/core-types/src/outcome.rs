use serde::{Deserialize, Serialize};

/// Terminal outcome of one query run.
///
/// Every variant is a normal, reportable result; the caller decides what
/// is fatal. The engine never retries on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Read-only resolution succeeded; nothing was touched.
    Resolved,

    /// The full event sequence reached the target.
    Clicked,

    /// Prune action completed; `removed` later matches were detached.
    Mutated { removed: usize },

    /// No candidate matched any strategy entry.
    NotFound,

    /// The target detached between resolution and dispatch.
    /// `events_sent` counts events actually dispatched before the halt.
    StaleTarget { events_sent: usize },

    /// Strict ambiguity mode: several equally-matching candidates.
    Ambiguous { candidates: usize },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Outcome::Resolved | Outcome::Clicked | Outcome::Mutated { .. }
        )
    }
}
