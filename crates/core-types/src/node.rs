use std::fmt;
use std::sync::Arc;

use crate::errors::CoreError;
use crate::event::SyntheticEvent;
use crate::filter::Category;
use crate::geom::{Rect, Viewport};

/// Shared handle to a live node.
pub type NodeHandle = Arc<dyn TreeNode>;

/// Port to one element of the surrounding node tree.
///
/// The engine never owns nodes: it reads them, and for mutation actions
/// removes or edits them through this trait. A node may become detached at
/// any time between resolution and action; implementations must answer
/// [`TreeNode::is_attached`] truthfully and fail mutation verbs on
/// detached nodes with [`CoreError::Detached`] instead of acting on
/// dangling state.
pub trait TreeNode: Send + Sync + fmt::Debug {
    /// Identity stable for the lifetime of the document, used to
    /// deduplicate candidates (e.g. after an ancestor lift).
    fn node_id(&self) -> u64;

    /// Lowercase tag name.
    fn tag(&self) -> String;

    /// Full text content of the subtree, untrimmed.
    fn text(&self) -> String;

    fn attr(&self, name: &str) -> Option<String>;

    fn rect(&self) -> Rect;

    /// Viewport of the document this node belongs to.
    fn viewport(&self) -> Viewport;

    fn children(&self) -> Vec<NodeHandle>;

    fn parent(&self) -> Option<NodeHandle>;

    fn is_attached(&self) -> bool;

    /// Request input focus. Idempotent when already focused.
    fn focus(&self) -> Result<(), CoreError>;

    /// Replace the subtree's text content.
    fn set_text(&self, text: &str) -> Result<(), CoreError>;

    /// Detach this node (and its subtree) from the tree.
    fn remove(&self) -> Result<(), CoreError>;

    /// Fire-and-forget synthetic event dispatch. The engine records that
    /// the event was sent; it never waits on handler effects.
    fn dispatch_event(&self, event: &SyntheticEvent) -> Result<(), CoreError>;
}

/// Trimmed text content, the uniform matching form.
pub fn trimmed_text(node: &dyn TreeNode) -> String {
    node.text().trim().to_string()
}

/// All descendants of `root` in document (preorder) order, excluding
/// `root` itself. Re-walks the live tree on every call; never cached.
pub fn descendants(root: &NodeHandle) -> Vec<NodeHandle> {
    fn walk(node: &NodeHandle, out: &mut Vec<NodeHandle>) {
        for child in node.children() {
            out.push(child.clone());
            walk(&child, out);
        }
    }

    let mut out = Vec::new();
    walk(root, &mut out);
    out
}

/// Nearest ancestor-or-self admitted by `category`, mirroring the DOM
/// `closest()` contract.
pub fn closest(node: &NodeHandle, category: &Category) -> Option<NodeHandle> {
    let mut current = Some(node.clone());
    while let Some(n) = current {
        if category.admits(n.as_ref()) {
            return Some(n);
        }
        current = n.parent();
    }
    None
}
