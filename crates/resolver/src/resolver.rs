//! Strategy orchestration with fallback chain and tie-break.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use domtap_core_types::{NullTrace, TraceSink};

use crate::errors::ResolveError;
use crate::snapshot::Snapshot;
use crate::types::{apply_lift, AmbiguityPolicy, Candidate, Query, Resolution, StrategyEntry};

/// Applies a query's ordered strategy list against a fresh snapshot and
/// picks at most one target (or the full ordered set for whole-set
/// actions), streaming a nested trace along the way.
pub struct Resolver {
    trace: Arc<dyn TraceSink>,
}

impl Resolver {
    pub fn new(trace: Arc<dyn TraceSink>) -> Self {
        Self { trace }
    }

    /// Resolver with a no-op sink; behaviorally identical to a traced one.
    pub fn silent() -> Self {
        Self::new(Arc::new(NullTrace))
    }

    /// Narrow the snapshot to zero or one target.
    ///
    /// `NotFound` is a normal outcome, never an error. Only a structurally
    /// invalid query (empty filter, detached scope) returns `Err`.
    pub fn resolve(&self, query: &Query) -> Result<Resolution, ResolveError> {
        self.trace.group_start("resolve");
        let outcome = self.winning_set(query);
        let resolution = match outcome {
            Ok(set) => {
                if set.len() > 1 && query.ambiguity == AmbiguityPolicy::Surface {
                    warn!(candidates = set.len(), "ambiguous match surfaced to caller");
                    self.trace.field("resolution", json!("ambiguous"));
                    Resolution::Ambiguous(set)
                } else {
                    match tie_break(set) {
                        Some(winner) => {
                            info!(
                                dom_index = winner.dom_index,
                                text = %winner.trimmed_text(),
                                "resolved target"
                            );
                            self.trace.field("selected", json!(winner.dom_index));
                            Resolution::Found(winner)
                        }
                        None => {
                            info!("no candidate matched any strategy entry");
                            self.trace.field("resolution", json!("not_found"));
                            Resolution::NotFound
                        }
                    }
                }
            }
            Err(err) => {
                self.trace.group_end();
                return Err(err);
            }
        };
        self.trace.group_end();
        Ok(resolution)
    }

    /// The full ordered candidate set of the winning strategy entry, in
    /// document order. Whole-set actions (prune) consume this instead of
    /// the tie-broken winner.
    pub fn resolve_all(&self, query: &Query) -> Result<Vec<Candidate>, ResolveError> {
        self.trace.group_start("resolve-all");
        let result = self.winning_set(query);
        self.trace.group_end();
        result
    }

    /// Evaluate strategy entries in declared order; the first entry with a
    /// non-empty match set wins. An earlier empty entry never blocks
    /// fallback.
    fn winning_set(&self, query: &Query) -> Result<Vec<Candidate>, ResolveError> {
        let snapshot = Snapshot::capture(&query.scope, &query.filter)?;
        self.trace
            .field("total_scanned", json!(snapshot.total_scanned()));
        self.trace.field("total_clickable", json!(snapshot.len()));

        for (entry_index, entry) in query.strategy.entries.iter().enumerate() {
            let set = collect_matches(&snapshot, entry);
            debug!(
                entry = entry_index,
                matches = set.len(),
                "strategy entry evaluated"
            );
            self.trace.group_start(&format!("strategy[{entry_index}]"));
            self.trace.field("matches", json!(set.len()));
            self.trace.group_end();

            if !set.is_empty() {
                self.trace_candidates(&set);
                return Ok(set);
            }
        }

        debug!("all strategy entries exhausted");
        Ok(Vec::new())
    }

    fn trace_candidates(&self, set: &[Candidate]) {
        self.trace.field("candidates", json!(set.len()));
        for (index, candidate) in set.iter().enumerate() {
            let node = &candidate.node;
            let rect = node.rect();
            self.trace.group_start(&format!("candidate[{index}]"));
            self.trace.field("tag", json!(node.tag()));
            self.trace.field("text", json!(candidate.trimmed_text()));
            self.trace.field("aria_label", json!(node.attr("aria-label")));
            self.trace.field("role", json!(node.attr("role")));
            self.trace.field("tabindex", json!(node.attr("tabindex")));
            self.trace.field("rect", json!(rect.as_numbers()));
            self.trace
                .field("in_viewport", json!(rect.in_viewport(&node.viewport())));
            self.trace.group_end();
        }
    }
}

/// Collect the entry's matches over the snapshot, applying the ancestor
/// lift and deduplicating lifted targets by node identity (first
/// occurrence kept, so document order survives).
fn collect_matches(snapshot: &Snapshot, entry: &StrategyEntry) -> Vec<Candidate> {
    let label = entry.predicate.label_text().map(str::to_string);
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for (dom_index, node) in snapshot.nodes().iter().enumerate() {
        if !entry.predicate.matches(node) {
            continue;
        }
        let target = match apply_lift(entry, node) {
            Some(target) => target,
            // Lift configured but no matching ancestor: not a candidate.
            None => continue,
        };
        if !seen.insert(target.node_id()) {
            continue;
        }
        let label_match = match &label {
            Some(expected) => target.attr("aria-label").as_deref() == Some(expected.as_str()),
            None => false,
        };
        let role_button = target.attr("role").as_deref() == Some("button");
        out.push(Candidate {
            node: target,
            dom_index,
            weight: entry.weight,
            label_match,
            role_button,
        });
    }
    out
}

/// Deterministic selection within an equally-matching set: accessibility
/// label match beats structural role alone, which beats a plain match;
/// entry weight next; first in document order among full equals.
fn tie_break(set: Vec<Candidate>) -> Option<Candidate> {
    set.into_iter()
        .reduce(|best, next| if rank(&next) > rank(&best) { next } else { best })
}

fn rank(candidate: &Candidate) -> (bool, bool, u32) {
    (
        candidate.label_match,
        candidate.role_button,
        candidate.weight,
    )
}
