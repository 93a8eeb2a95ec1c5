//! Shared primitives for the domtap engine.
//!
//! Everything the resolver and dispatcher crates agree on lives here:
//! the [`TreeNode`] port (the only boundary to the live node tree),
//! geometry, node-type filter categories, synthetic event kinds, action
//! descriptions, the outcome/error taxonomy, the diagnostics sink, and an
//! in-memory reference tree used by tests and dry runs.

pub mod action;
pub mod errors;
pub mod event;
pub mod filter;
pub mod geom;
pub mod mem;
pub mod node;
pub mod outcome;
pub mod trace;

pub use action::Action;
pub use errors::CoreError;
pub use event::{EventKind, SyntheticEvent};
pub use filter::{Category, NodeFilter};
pub use geom::{Rect, Viewport};
pub use mem::{EventRecord, MemNode, MemTree};
pub use node::{closest, descendants, trimmed_text, NodeHandle, TreeNode};
pub use outcome::Outcome;
pub use trace::{CollectingTrace, LogTrace, NullTrace, TraceEntry, TraceSink};
