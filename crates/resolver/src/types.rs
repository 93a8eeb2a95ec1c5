//! Declarative query model: predicates, strategies, candidates.

use serde::{Deserialize, Serialize};

use domtap_core_types::{
    closest, descendants, trimmed_text, Action, Category, NodeFilter, NodeHandle,
};

/// Pure match predicate, evaluated against snapshot nodes.
///
/// Matching is exact trimmed equality throughout; no substring policy
/// exists anywhere in the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Predicate {
    /// Trimmed text content equals the expected string exactly.
    TextEquals(String),

    /// Named attribute equals the expected string exactly.
    AttrEquals { name: String, value: String },

    /// Resolve a descendant via a structural path, then compare its
    /// trimmed text. Used when the clickable node wraps a text-bearing
    /// child (e.g. a styled label span inside a button).
    NestedTextEquals { path: DescendantPath, value: String },

    /// Logical OR over sub-predicates (e.g. text == t OR aria-label == t).
    AnyOf(Vec<Predicate>),
}

impl Predicate {
    pub fn matches(&self, node: &NodeHandle) -> bool {
        match self {
            Predicate::TextEquals(expected) => trimmed_text(node.as_ref()) == *expected,
            Predicate::AttrEquals { name, value } => node.attr(name).as_deref() == Some(value),
            Predicate::NestedTextEquals { path, value } => path
                .resolve(node)
                .map(|n| trimmed_text(n.as_ref()) == *value)
                .unwrap_or(false),
            Predicate::AnyOf(inner) => inner.iter().any(|p| p.matches(node)),
        }
    }

    /// The label text this predicate is looking for, if any. Drives the
    /// accessibility-label preference during tie-break.
    pub fn label_text(&self) -> Option<&str> {
        match self {
            Predicate::TextEquals(value) => Some(value),
            Predicate::NestedTextEquals { value, .. } => Some(value),
            Predicate::AttrEquals { name, value } if name == "aria-label" => Some(value),
            Predicate::AttrEquals { .. } => None,
            Predicate::AnyOf(inner) => inner.iter().find_map(|p| p.label_text()),
        }
    }
}

/// Structural path to a descendant of a candidate node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DescendantPath {
    /// First descendant (document order) carrying the class token.
    Class(String),

    /// Direct child at the given index.
    ChildIndex(usize),
}

impl DescendantPath {
    pub fn resolve(&self, node: &NodeHandle) -> Option<NodeHandle> {
        match self {
            DescendantPath::Class(token) => descendants(node).into_iter().find(|n| {
                n.attr("class")
                    .map(|classes| classes.split_whitespace().any(|c| c == token))
                    .unwrap_or(false)
            }),
            DescendantPath::ChildIndex(index) => node.children().get(*index).cloned(),
        }
    }
}

/// One fallback step: a predicate with a priority weight and an optional
/// ancestor lift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyEntry {
    pub predicate: Predicate,

    /// Priority weight recorded on candidates; higher outranks lower
    /// during tie-break after match quality.
    #[serde(default)]
    pub weight: u32,

    /// Lift a match to its nearest ancestor of this category (the
    /// clickable wrapper is not always the text-bearing node).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lift_to: Option<Category>,
}

impl StrategyEntry {
    pub fn new(predicate: Predicate) -> Self {
        Self {
            predicate,
            weight: 0,
            lift_to: None,
        }
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    pub fn lifted_to(mut self, category: Category) -> Self {
        self.lift_to = Some(category);
        self
    }
}

/// Ordered list of fallback entries. Entries are tried against the same
/// snapshot in declared order; the first entry producing at least one
/// match owns the candidate set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Strategy {
    pub entries: Vec<StrategyEntry>,
}

impl Strategy {
    pub fn new(entries: Vec<StrategyEntry>) -> Self {
        Self { entries }
    }

    pub fn single(predicate: Predicate) -> Self {
        Self {
            entries: vec![StrategyEntry::new(predicate)],
        }
    }

    pub fn then(mut self, entry: StrategyEntry) -> Self {
        self.entries.push(entry);
        self
    }
}

/// What to do when several candidates match equally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AmbiguityPolicy {
    /// Pick deterministically: label match over role-only, document order
    /// among equals. The engine default.
    #[default]
    TieBreak,

    /// Strict mode: surface [`Resolution::Ambiguous`] instead of choosing.
    Surface,
}

/// Immutable, reusable description of one resolution + action.
#[derive(Debug, Clone)]
pub struct Query {
    pub scope: NodeHandle,
    pub filter: NodeFilter,
    pub strategy: Strategy,
    pub action: Action,
    pub ambiguity: AmbiguityPolicy,
}

impl Query {
    pub fn new(scope: NodeHandle, filter: NodeFilter, strategy: Strategy, action: Action) -> Self {
        Self {
            scope,
            filter,
            strategy,
            action,
            ambiguity: AmbiguityPolicy::TieBreak,
        }
    }

    pub fn with_ambiguity(mut self, policy: AmbiguityPolicy) -> Self {
        self.ambiguity = policy;
        self
    }
}

/// A snapshot node that matched the winning strategy entry.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub node: NodeHandle,

    /// Position of the original match in the snapshot, for document-order
    /// tie-break.
    pub dom_index: usize,

    /// Weight of the strategy entry that matched.
    pub weight: u32,

    /// The node's accessibility label equals the text the predicate was
    /// looking for.
    pub label_match: bool,

    /// The node carries an explicit `role="button"`.
    pub role_button: bool,
}

impl Candidate {
    pub fn trimmed_text(&self) -> String {
        trimmed_text(self.node.as_ref())
    }
}

/// Result of resolving one query. Ephemeral: produced and consumed within
/// a single run, never persisted.
#[derive(Debug, Clone)]
pub enum Resolution {
    Found(Candidate),
    NotFound,
    Ambiguous(Vec<Candidate>),
}

impl Resolution {
    pub fn found(&self) -> Option<&Candidate> {
        match self {
            Resolution::Found(candidate) => Some(candidate),
            _ => None,
        }
    }
}

/// Apply the ancestor lift of an entry, when configured.
pub(crate) fn apply_lift(entry: &StrategyEntry, node: &NodeHandle) -> Option<NodeHandle> {
    match &entry.lift_to {
        Some(category) => closest(node, category),
        None => Some(node.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domtap_core_types::MemTree;

    #[test]
    fn text_equals_trims_before_comparing() {
        let tree = MemTree::new();
        let button = tree.spawn("button");
        button.put_text("  Share \n");
        tree.root().append(&button);

        let p = Predicate::TextEquals("Share".into());
        assert!(p.matches(&button.handle()));
        assert!(!Predicate::TextEquals("Shar".into()).matches(&button.handle()));
    }

    #[test]
    fn any_of_is_logical_or() {
        let tree = MemTree::new();
        let div = tree.spawn("div");
        div.put_attr("aria-label", "Post");
        tree.root().append(&div);

        let p = Predicate::AnyOf(vec![
            Predicate::TextEquals("Post".into()),
            Predicate::AttrEquals {
                name: "aria-label".into(),
                value: "Post".into(),
            },
        ]);
        assert!(p.matches(&div.handle()));
        assert_eq!(p.label_text(), Some("Post"));
    }

    #[test]
    fn class_path_finds_first_descendant() {
        let tree = MemTree::new();
        let button = tree.spawn("button");
        let deep = tree.spawn("span");
        deep.put_attr("class", "icon label-text");
        deep.put_text("Connect");
        button.append(&deep);
        tree.root().append(&button);

        let p = Predicate::NestedTextEquals {
            path: DescendantPath::Class("label-text".into()),
            value: "Connect".into(),
        };
        assert!(p.matches(&button.handle()));
    }

    #[test]
    fn child_index_path() {
        let tree = MemTree::new();
        let div = tree.spawn("div");
        let first = tree.spawn("span");
        first.put_text("a");
        let second = tree.spawn("span");
        second.put_text("b");
        div.append(&first);
        div.append(&second);
        tree.root().append(&div);

        let p = Predicate::NestedTextEquals {
            path: DescendantPath::ChildIndex(1),
            value: "b".into(),
        };
        assert!(p.matches(&div.handle()));
    }

    #[test]
    fn strategy_serde_round_trip() {
        let strategy = Strategy::single(Predicate::AttrEquals {
            name: "data-testid".into(),
            value: "headerWriteButton".into(),
        })
        .then(
            StrategyEntry::new(Predicate::TextEquals("Write".into()))
                .lifted_to(Category::Anchor),
        );

        let json = serde_json::to_string(&strategy).unwrap();
        let back: Strategy = serde_json::from_str(&json).unwrap();
        assert_eq!(strategy, back);
    }
}
