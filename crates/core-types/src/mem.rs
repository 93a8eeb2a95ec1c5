//! In-memory reference tree.
//!
//! The engine is normally wired to a live document through [`TreeNode`];
//! this module provides the one concrete implementation the workspace
//! owns. It records every dispatched event and focus request so tests can
//! assert exact sequences, and it honors detachment semantics (a removed
//! subtree answers `is_attached() == false` and rejects mutation verbs).

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::errors::CoreError;
use crate::event::{EventKind, SyntheticEvent};
use crate::geom::{Rect, Viewport};
use crate::node::{NodeHandle, TreeNode};

/// One event observed by the tree, in dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRecord {
    pub node_id: u64,
    pub kind: EventKind,
}

#[derive(Debug)]
struct DocState {
    viewport: Viewport,
    next_id: AtomicU64,
    events: Mutex<Vec<EventRecord>>,
    focused: Mutex<Option<u64>>,
}

/// A whole in-memory document.
pub struct MemTree {
    doc: Arc<DocState>,
    root: Arc<MemNode>,
}

impl MemTree {
    pub fn new() -> Self {
        Self::with_viewport(Viewport::default())
    }

    pub fn with_viewport(viewport: Viewport) -> Self {
        let doc = Arc::new(DocState {
            viewport,
            next_id: AtomicU64::new(1),
            events: Mutex::new(Vec::new()),
            focused: Mutex::new(None),
        });
        let root = Arc::new(MemNode {
            id: 0,
            tag: "body".to_string(),
            is_root: true,
            doc: doc.clone(),
            state: Mutex::new(NodeState::default()),
        });
        Self { doc, root }
    }

    /// The document root. Coerces to a [`NodeHandle`] where one is needed.
    pub fn root(&self) -> Arc<MemNode> {
        self.root.clone()
    }

    /// Create a detached node bound to this document. Attach it with
    /// [`MemNode::append`].
    pub fn spawn(&self, tag: &str) -> Arc<MemNode> {
        Arc::new(MemNode {
            id: self.doc.next_id.fetch_add(1, Ordering::Relaxed),
            tag: tag.to_ascii_lowercase(),
            is_root: false,
            doc: self.doc.clone(),
            state: Mutex::new(NodeState::default()),
        })
    }

    /// Every event dispatched into this document so far.
    pub fn events(&self) -> Vec<EventRecord> {
        self.doc.events.lock().clone()
    }

    /// Just the event kinds, for sequence assertions.
    pub fn event_kinds(&self) -> Vec<EventKind> {
        self.doc.events.lock().iter().map(|r| r.kind).collect()
    }

    /// Node currently holding input focus, if any.
    pub fn focused(&self) -> Option<u64> {
        *self.doc.focused.lock()
    }
}

impl Default for MemTree {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
struct NodeState {
    attrs: BTreeMap<String, String>,
    own_text: String,
    rect: Rect,
    children: Vec<Arc<MemNode>>,
    parent: Weak<MemNode>,
}

/// One element of a [`MemTree`].
pub struct MemNode {
    id: u64,
    tag: String,
    is_root: bool,
    doc: Arc<DocState>,
    state: Mutex<NodeState>,
}

impl fmt::Debug for MemNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemNode")
            .field("id", &self.id)
            .field("tag", &self.tag)
            .finish()
    }
}

impl MemNode {
    /// Shared handle as the engine sees it.
    pub fn handle(self: &Arc<Self>) -> NodeHandle {
        self.clone()
    }

    pub fn put_attr(&self, name: &str, value: &str) {
        self.state
            .lock()
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    /// Set this node's own text without touching children (builder use;
    /// the [`TreeNode::set_text`] verb has replace-subtree semantics).
    pub fn put_text(&self, text: &str) {
        self.state.lock().own_text = text.to_string();
    }

    pub fn put_rect(&self, rect: Rect) {
        self.state.lock().rect = rect;
    }

    pub fn append(self: &Arc<Self>, child: &Arc<MemNode>) {
        child.state.lock().parent = Arc::downgrade(self);
        self.state.lock().children.push(child.clone());
    }

    fn describe(&self) -> String {
        format!("<{} #{}>", self.tag, self.id)
    }
}

impl TreeNode for MemNode {
    fn node_id(&self) -> u64 {
        self.id
    }

    fn tag(&self) -> String {
        self.tag.clone()
    }

    fn text(&self) -> String {
        let (own, children) = {
            let state = self.state.lock();
            (state.own_text.clone(), state.children.clone())
        };
        let mut out = own;
        for child in children {
            out.push_str(&child.text());
        }
        out
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.state.lock().attrs.get(name).cloned()
    }

    fn rect(&self) -> Rect {
        self.state.lock().rect
    }

    fn viewport(&self) -> Viewport {
        self.doc.viewport
    }

    fn children(&self) -> Vec<NodeHandle> {
        self.state
            .lock()
            .children
            .iter()
            .map(|c| c.handle())
            .collect()
    }

    fn parent(&self) -> Option<NodeHandle> {
        self.state.lock().parent.upgrade().map(|p| p.handle())
    }

    fn is_attached(&self) -> bool {
        if self.is_root {
            return true;
        }
        let mut parent = self.state.lock().parent.upgrade();
        while let Some(node) = parent {
            if node.is_root {
                return true;
            }
            parent = node.state.lock().parent.upgrade();
        }
        false
    }

    fn focus(&self) -> Result<(), CoreError> {
        if !self.is_attached() {
            return Err(CoreError::detached(self.describe()));
        }
        *self.doc.focused.lock() = Some(self.id);
        Ok(())
    }

    fn set_text(&self, text: &str) -> Result<(), CoreError> {
        if !self.is_attached() {
            return Err(CoreError::detached(self.describe()));
        }
        let orphans = {
            let mut state = self.state.lock();
            state.own_text = text.to_string();
            std::mem::take(&mut state.children)
        };
        for child in orphans {
            child.state.lock().parent = Weak::new();
        }
        Ok(())
    }

    fn remove(&self) -> Result<(), CoreError> {
        if self.is_root {
            return Err(CoreError::Internal(
                "document root cannot be removed".to_string(),
            ));
        }
        if !self.is_attached() {
            return Err(CoreError::detached(self.describe()));
        }
        let parent = self
            .state
            .lock()
            .parent
            .upgrade()
            .ok_or_else(|| CoreError::detached(self.describe()))?;
        parent.state.lock().children.retain(|c| c.id != self.id);
        self.state.lock().parent = Weak::new();
        Ok(())
    }

    fn dispatch_event(&self, event: &SyntheticEvent) -> Result<(), CoreError> {
        if !self.is_attached() {
            return Err(CoreError::detached(self.describe()));
        }
        self.doc.events.lock().push(EventRecord {
            node_id: self.id,
            kind: event.kind,
        });
        Ok(())
    }
}
