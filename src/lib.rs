//! domtap — declarative element resolution and interaction simulation.
//!
//! Per-site automation scripts keep re-implementing the same three steps:
//! find a node by visible text, accessibility label or structural marker;
//! fall back through a chain of match strategies; then simulate a user
//! interacting with it. domtap factors that out: a [`Query`] describes the
//! scope, node-type filter, ordered fallback [`Strategy`] and [`Action`],
//! and [`Engine::run`] executes it against any live tree reachable through
//! the [`TreeNode`] port, with a nested diagnostic trace on an injectable
//! [`TraceSink`].
//!
//! Site differences are configuration, not code: a [`Playbook`] maps
//! logical action names to query specs as plain serde data.
//!
//! ```
//! use domtap::{Action, Engine, MemTree, NodeFilter, Predicate, Query, Strategy};
//!
//! let tree = MemTree::new();
//! let button = tree.spawn("button");
//! button.put_text("Share");
//! tree.root().append(&button);
//!
//! let query = Query::new(
//!     tree.root().handle(),
//!     NodeFilter::button_like(),
//!     Strategy::single(Predicate::TextEquals("Share".into())),
//!     Action::ClickSequence,
//! );
//! let report = Engine::silent().run(&query).unwrap();
//! assert!(report.outcome.is_success());
//! ```

pub mod engine;
pub mod playbook;

pub use engine::{Engine, RunReport};
pub use playbook::{Playbook, QuerySpec};

pub use domtap_core_types::{
    closest, descendants, trimmed_text, Action, Category, CollectingTrace, CoreError, EventKind,
    EventRecord, LogTrace, MemNode, MemTree, NodeFilter, NodeHandle, NullTrace, Outcome, Rect,
    SyntheticEvent, TraceEntry, TraceSink, TreeNode, Viewport,
};
pub use domtap_dispatch::{DispatchError, DispatchReport, Dispatcher};
pub use domtap_resolver::{
    AmbiguityPolicy, Candidate, DescendantPath, Predicate, Query, Resolution, ResolveError,
    Resolver, Snapshot, Strategy, StrategyEntry,
};
