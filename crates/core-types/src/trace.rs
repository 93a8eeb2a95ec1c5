use parking_lot::Mutex;
use serde_json::Value;

/// Sink for the structured, nested diagnostics stream.
///
/// Purely observational: implementations must not touch the tree or block,
/// and swapping in [`NullTrace`] must be behaviorally invisible. This is
/// the seam that lets the engine run silently in production and verbosely
/// under test.
pub trait TraceSink: Send + Sync {
    fn group_start(&self, label: &str);
    fn field(&self, key: &str, value: Value);
    fn group_end(&self);
}

/// Silent sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTrace;

impl TraceSink for NullTrace {
    fn group_start(&self, _label: &str) {}
    fn field(&self, _key: &str, _value: Value) {}
    fn group_end(&self) {}
}

/// Sink forwarding entries to `tracing` at debug level, indented by group
/// depth.
#[derive(Debug, Default)]
pub struct LogTrace {
    depth: Mutex<usize>,
}

impl LogTrace {
    pub fn new() -> Self {
        Self::default()
    }

    fn indent(&self) -> String {
        "  ".repeat(*self.depth.lock())
    }
}

impl TraceSink for LogTrace {
    fn group_start(&self, label: &str) {
        tracing::debug!(target: "domtap::trace", "{}{}", self.indent(), label);
        *self.depth.lock() += 1;
    }

    fn field(&self, key: &str, value: Value) {
        tracing::debug!(target: "domtap::trace", "{}{} = {}", self.indent(), key, value);
    }

    fn group_end(&self) {
        let mut depth = self.depth.lock();
        *depth = depth.saturating_sub(1);
    }
}

/// One recorded trace entry.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEntry {
    GroupStart(String),
    Field(String, Value),
    GroupEnd,
}

/// Test sink that records the entry stream for assertions.
#[derive(Debug, Default)]
pub struct CollectingTrace {
    entries: Mutex<Vec<TraceEntry>>,
}

impl CollectingTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<TraceEntry> {
        self.entries.lock().clone()
    }

    /// All values recorded under `key`, in order.
    pub fn fields(&self, key: &str) -> Vec<Value> {
        self.entries
            .lock()
            .iter()
            .filter_map(|e| match e {
                TraceEntry::Field(k, v) if k == key => Some(v.clone()),
                _ => None,
            })
            .collect()
    }

    /// Labels of every group opened, in order.
    pub fn group_labels(&self) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .filter_map(|e| match e {
                TraceEntry::GroupStart(label) => Some(label.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl TraceSink for CollectingTrace {
    fn group_start(&self, label: &str) {
        self.entries
            .lock()
            .push(TraceEntry::GroupStart(label.to_string()));
    }

    fn field(&self, key: &str, value: Value) {
        self.entries
            .lock()
            .push(TraceEntry::Field(key.to_string(), value));
    }

    fn group_end(&self) {
        self.entries.lock().push(TraceEntry::GroupEnd);
    }
}
