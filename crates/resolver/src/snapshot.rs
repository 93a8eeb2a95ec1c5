use domtap_core_types::{descendants, NodeFilter, NodeHandle};

use crate::errors::ResolveError;

/// Immutable-at-read-time enumeration of the candidate node set.
///
/// Captured fresh from the live tree on every call; nothing is cached
/// across captures because the tree may change between queries.
#[derive(Debug, Clone)]
pub struct Snapshot {
    nodes: Vec<NodeHandle>,
    total_scanned: usize,
}

impl Snapshot {
    /// Walk `scope`'s descendants in document order and keep the nodes
    /// admitted by `filter`.
    ///
    /// Fails fast with a structural error (malformed query) before any
    /// deeper tree access: an empty filter or a detached scope can never
    /// produce a meaningful snapshot.
    pub fn capture(scope: &NodeHandle, filter: &NodeFilter) -> Result<Snapshot, ResolveError> {
        if filter.is_empty() {
            return Err(ResolveError::EmptyFilter);
        }
        if !scope.is_attached() {
            return Err(ResolveError::DetachedScope);
        }

        let all = descendants(scope);
        let total_scanned = all.len();
        let nodes = all
            .into_iter()
            .filter(|n| filter.admits(n.as_ref()))
            .collect();

        Ok(Snapshot {
            nodes,
            total_scanned,
        })
    }

    /// Filter survivors, in document order ("total clickable elements").
    pub fn nodes(&self) -> &[NodeHandle] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every element visited before filtering.
    pub fn total_scanned(&self) -> usize {
        self.total_scanned
    }
}
