//! Single entry point wiring resolution to dispatch.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use domtap_core_types::{CoreError, NodeHandle, NullTrace, Outcome, TraceSink};
use domtap_dispatch::Dispatcher;
use domtap_resolver::{Query, Resolution, Resolver};

/// Outcome of one `run`, with correlation id and timing.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub outcome: Outcome,
    pub latency_ms: u128,

    /// Size of the winning candidate set the run worked from.
    pub candidates_considered: usize,
}

/// Synchronous query executor.
///
/// One query runs to completion before another may start; nothing here
/// suspends or blocks, and no state is shared between runs — each one
/// re-derives its snapshot from the live tree. The engine never retries;
/// retry policy belongs to the caller, layered above [`Engine::run`].
pub struct Engine {
    trace: Arc<dyn TraceSink>,
    resolver: Resolver,
    dispatcher: Dispatcher,
}

impl Engine {
    pub fn new(trace: Arc<dyn TraceSink>) -> Self {
        Self {
            resolver: Resolver::new(trace.clone()),
            dispatcher: Dispatcher::new(trace.clone()),
            trace,
        }
    }

    /// Engine with a no-op diagnostics sink.
    pub fn silent() -> Self {
        Self::new(Arc::new(NullTrace))
    }

    /// Resolve the query's target and perform its action.
    ///
    /// Every non-fatal result — target found and acted on, nothing
    /// matched, target went stale mid-dispatch, strict-mode ambiguity —
    /// is reported through [`RunReport::outcome`]. `Err` is reserved for
    /// malformed queries and tree-port faults.
    pub fn run(&self, query: &Query) -> Result<RunReport, CoreError> {
        let started = Instant::now();
        let run_id = Uuid::new_v4();

        self.trace.group_start(&format!("run {run_id}"));
        self.trace.field("action", json!(query.action.name()));
        let result = self.run_inner(query);
        self.trace.group_end();

        let (outcome, candidates_considered) = result?;
        let report = RunReport {
            run_id,
            outcome,
            latency_ms: started.elapsed().as_millis(),
            candidates_considered,
        };
        info!(
            run_id = %report.run_id,
            outcome = ?report.outcome,
            latency_ms = report.latency_ms,
            "query run finished"
        );
        Ok(report)
    }

    fn run_inner(&self, query: &Query) -> Result<(Outcome, usize), CoreError> {
        if query.action.wants_candidate_list() {
            // Whole-set actions bypass tie-break and consume the full
            // ordered winning set.
            let set = self.resolver.resolve_all(query)?;
            let targets: Vec<NodeHandle> = set.iter().map(|c| c.node.clone()).collect();
            let report = self.dispatcher.run(&query.action, &targets)?;
            return Ok((report.outcome, set.len()));
        }

        match self.resolver.resolve(query)? {
            Resolution::NotFound => Ok((Outcome::NotFound, 0)),
            Resolution::Ambiguous(set) => Ok((
                Outcome::Ambiguous {
                    candidates: set.len(),
                },
                set.len(),
            )),
            Resolution::Found(candidate) => {
                let report = self
                    .dispatcher
                    .run(&query.action, &[candidate.node.clone()])?;
                Ok((report.outcome, 1))
            }
        }
    }
}
