use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use domtap_core_types::{
    Action, CoreError, EventKind, NodeHandle, NullTrace, Outcome, SyntheticEvent, TraceSink,
};

use crate::errors::DispatchError;
use crate::model::DispatchReport;

/// Executes actions against resolved targets.
///
/// The target's attachment is re-validated immediately before every step:
/// the underlying tree can be mutated by unrelated activity between
/// snapshot and action, and a detached node must produce a clean
/// `StaleTarget` report instead of a partial, silent failure.
pub struct Dispatcher {
    trace: Arc<dyn TraceSink>,
}

impl Dispatcher {
    pub fn new(trace: Arc<dyn TraceSink>) -> Self {
        Self { trace }
    }

    pub fn silent() -> Self {
        Self::new(Arc::new(NullTrace))
    }

    /// Execute `action`. Single-target actions consume the first handle;
    /// the prune action consumes the whole ordered list.
    pub fn run(
        &self,
        action: &Action,
        targets: &[NodeHandle],
    ) -> Result<DispatchReport, DispatchError> {
        match action {
            Action::ResolveOnly => Ok(DispatchReport::new(Outcome::Resolved)),
            Action::ClickSequence => match targets.first() {
                Some(target) => self.click(target, false),
                None => Ok(DispatchReport::new(Outcome::NotFound)),
            },
            Action::FocusThenClickSequence => match targets.first() {
                Some(target) => self.click(target, true),
                None => Ok(DispatchReport::new(Outcome::NotFound)),
            },
            Action::PruneKeepFirstAndSetText { text } => self.prune(targets, text),
        }
    }

    fn click(&self, target: &NodeHandle, focus_first: bool) -> Result<DispatchReport, DispatchError> {
        let label = if focus_first {
            "dispatch: focus-then-click-sequence"
        } else {
            "dispatch: click-sequence"
        };
        self.trace.group_start(label);
        let report = self.click_inner(target, focus_first);
        self.trace.group_end();
        report
    }

    fn click_inner(
        &self,
        target: &NodeHandle,
        focus_first: bool,
    ) -> Result<DispatchReport, DispatchError> {
        let mut focused = false;
        if focus_first {
            match target.focus() {
                Ok(()) => {
                    focused = true;
                    self.trace.field("focused", json!(true));
                }
                Err(CoreError::Detached(_)) => {
                    return Ok(stale_report(0, focused));
                }
                Err(err) => return Err(DispatchError::tree("focus", err)),
            }
        }

        let mut sent = 0;
        for kind in EventKind::click_sequence() {
            if !target.is_attached() {
                warn!(events_sent = sent, "target detached mid-sequence");
                self.trace.field("stale_after", json!(sent));
                return Ok(stale_report(sent, focused));
            }
            // Logged before the send, matching the trace contract.
            self.trace.field("dispatching", json!(kind.name()));
            match target.dispatch_event(&SyntheticEvent::new(kind)) {
                Ok(()) => sent += 1,
                Err(CoreError::Detached(_)) => {
                    warn!(events_sent = sent, "target detached mid-sequence");
                    self.trace.field("stale_after", json!(sent));
                    return Ok(stale_report(sent, focused));
                }
                Err(err) => return Err(DispatchError::tree("dispatch_event", err)),
            }
        }

        debug!(events_sent = sent, "click sequence complete");
        let mut report = DispatchReport::new(Outcome::Clicked).with_events_sent(sent);
        if focused {
            report = report.with_focus();
        }
        Ok(report)
    }

    /// Keep the first node, detach the rest, set the survivor's text.
    /// Nodes already detached when the prune reaches them are skipped and
    /// not counted.
    fn prune(&self, targets: &[NodeHandle], text: &str) -> Result<DispatchReport, DispatchError> {
        self.trace
            .group_start("dispatch: prune-keep-first-and-set-text");
        let report = self.prune_inner(targets, text);
        self.trace.group_end();
        report
    }

    fn prune_inner(
        &self,
        targets: &[NodeHandle],
        text: &str,
    ) -> Result<DispatchReport, DispatchError> {
        self.trace.field("matches", json!(targets.len()));
        let (first, rest) = match targets.split_first() {
            Some(split) => split,
            None => {
                debug!("prune found no matches; tree untouched");
                return Ok(DispatchReport::new(Outcome::NotFound));
            }
        };

        let mut removed = 0;
        for node in rest {
            match node.remove() {
                Ok(()) => removed += 1,
                Err(CoreError::Detached(_)) => {}
                Err(err) => return Err(DispatchError::tree("remove", err)),
            }
        }
        self.trace.field("removed", json!(removed));

        match first.set_text(text) {
            Ok(()) => {
                debug!(removed, "prune complete");
                Ok(DispatchReport::new(Outcome::Mutated { removed }).with_removed(removed))
            }
            Err(CoreError::Detached(_)) => {
                warn!(removed, "prune survivor detached before text update");
                Ok(DispatchReport::new(Outcome::StaleTarget { events_sent: 0 })
                    .with_removed(removed))
            }
            Err(err) => Err(DispatchError::tree("set_text", err)),
        }
    }
}

fn stale_report(events_sent: usize, focused: bool) -> DispatchReport {
    let mut report = DispatchReport::new(Outcome::StaleTarget { events_sent })
        .with_events_sent(events_sent);
    if focused {
        report = report.with_focus();
    }
    report
}
