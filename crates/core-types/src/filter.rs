use serde::{Deserialize, Serialize};

use crate::node::TreeNode;

/// One structural category of a node-type filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// A native `<button>` element.
    NativeButton,
    /// A native `<a>` element.
    Anchor,
    /// Any element carrying an explicit `role="button"`.
    RoleButton,
    /// An arbitrary tag name.
    Tag(String),
}

impl Category {
    pub fn admits(&self, node: &dyn TreeNode) -> bool {
        match self {
            Category::NativeButton => node.tag().eq_ignore_ascii_case("button"),
            Category::Anchor => node.tag().eq_ignore_ascii_case("a"),
            Category::RoleButton => node.attr("role").as_deref() == Some("button"),
            Category::Tag(name) => node.tag().eq_ignore_ascii_case(name),
        }
    }
}

/// Union of categories a snapshot admits. Must be non-empty; an empty
/// union is a malformed query and is rejected before any tree access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeFilter {
    categories: Vec<Category>,
}

impl NodeFilter {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Filter admitting a single tag.
    pub fn tag(name: impl Into<String>) -> Self {
        Self::new(vec![Category::Tag(name.into())])
    }

    /// `role=button` union native buttons union anchors.
    pub fn button_like() -> Self {
        Self::new(vec![
            Category::RoleButton,
            Category::NativeButton,
            Category::Anchor,
        ])
    }

    /// The broad clickable scan: button-like plus generic text containers.
    pub fn clickable_scan() -> Self {
        Self::new(vec![
            Category::RoleButton,
            Category::NativeButton,
            Category::Anchor,
            Category::Tag("div".to_string()),
            Category::Tag("span".to_string()),
        ])
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn admits(&self, node: &dyn TreeNode) -> bool {
        self.categories.iter().any(|c| c.admits(node))
    }
}
