//! The per-site helper scripts this engine generalizes, replayed as pure
//! configuration data against in-memory trees shaped like each site.

use domtap::{Engine, MemNode, MemTree, Outcome, Playbook, TreeNode};
use std::sync::Arc;

fn run(tree: &MemTree, playbook_json: &str, action: &str) -> Outcome {
    let playbook = Playbook::from_json(playbook_json).expect("playbook parses");
    let spec = playbook.get(action).expect("action in playbook");
    let query = spec.bind(tree.root().handle());
    Engine::silent().run(&query).expect("run succeeds").outcome
}

#[test]
fn facebook_debug_click_prefers_labeled_candidate() {
    let playbook = r#"{
        "site": "facebook",
        "actions": {
            "click-post": {
                "filter": ["role-button", "native-button", "anchor", {"tag": "div"}, {"tag": "span"}],
                "strategy": [{
                    "predicate": {"any-of": [
                        {"text-equals": "Post"},
                        {"attr-equals": {"name": "aria-label", "value": "Post"}}
                    ]}
                }],
                "action": {"kind": "click-sequence"}
            }
        }
    }"#;

    let tree = MemTree::new();
    let decoy = tree.spawn("span");
    decoy.put_text("Post");
    let real = tree.spawn("div");
    real.put_attr("role", "button");
    real.put_attr("aria-label", "Post");
    real.put_attr("tabindex", "0");
    tree.root().append(&decoy);
    tree.root().append(&real);

    assert_eq!(run(&tree, playbook, "click-post"), Outcome::Clicked);
    assert!(tree.events().iter().all(|r| r.node_id == real.node_id()));
    assert_eq!(tree.events().len(), 9);
}

#[test]
fn instagram_next_matches_role_button_by_text() {
    let playbook = r#"{
        "site": "instagram",
        "actions": {
            "click-next": {
                "filter": ["role-button"],
                "strategy": [{"predicate": {"text-equals": "Next"}}],
                "action": {"kind": "click-sequence"}
            },
            "click-share": {
                "filter": ["native-button", "role-button"],
                "strategy": [{"predicate": {"text-equals": "Share"}}],
                "action": {"kind": "click-sequence"}
            }
        }
    }"#;

    let tree = MemTree::new();
    let next = tree.spawn("div");
    next.put_attr("role", "button");
    next.put_text("Next");
    let other = tree.spawn("div");
    other.put_attr("role", "button");
    other.put_text("Back");
    tree.root().append(&other);
    tree.root().append(&next);

    assert_eq!(run(&tree, playbook, "click-next"), Outcome::Clicked);
    assert!(tree.events().iter().all(|r| r.node_id == next.node_id()));

    assert_eq!(run(&tree, playbook, "click-share"), Outcome::NotFound);
}

#[test]
fn linkedin_primary_button_matches_by_nested_label_span() {
    let playbook = r#"{
        "site": "linkedin",
        "actions": {
            "click-connect": {
                "filter": ["native-button"],
                "strategy": [{
                    "predicate": {"nested-text-equals": {
                        "path": {"class": "artdeco-button__text"},
                        "value": "Connect"
                    }}
                }],
                "action": {"kind": "click-sequence"}
            }
        }
    }"#;

    let tree = MemTree::new();
    let follow = primary_button(&tree, "Follow");
    let connect = primary_button(&tree, "Connect");
    tree.root().append(&follow);
    tree.root().append(&connect);

    assert_eq!(run(&tree, playbook, "click-connect"), Outcome::Clicked);
    assert!(tree.events().iter().all(|r| r.node_id == connect.node_id()));
}

fn primary_button(tree: &MemTree, label: &str) -> Arc<MemNode> {
    let button = tree.spawn("button");
    button.put_attr("class", "artdeco-button artdeco-button--primary");
    let text = tree.spawn("span");
    text.put_attr("class", "artdeco-button__text");
    text.put_text(label);
    button.append(&text);
    button
}

#[test]
fn medium_write_button_uses_testid_then_text_lift_fallback() {
    let playbook = r#"{
        "site": "medium",
        "actions": {
            "click-write": {
                "filter": ["anchor", {"tag": "div"}],
                "strategy": [
                    {"predicate": {"attr-equals": {"name": "data-testid", "value": "headerWriteButton"}}, "weight": 1},
                    {"predicate": {"text-equals": "Write"}, "lift_to": "anchor"}
                ],
                "action": {"kind": "click-sequence"}
            }
        }
    }"#;

    // First shape: the anchor carries the test id.
    let tagged = MemTree::new();
    let anchor = tagged.spawn("a");
    anchor.put_attr("data-testid", "headerWriteButton");
    anchor.put_text("Write");
    tagged.root().append(&anchor);

    assert_eq!(run(&tagged, playbook, "click-write"), Outcome::Clicked);
    assert!(tagged.events().iter().all(|r| r.node_id == anchor.node_id()));

    // Second shape: no test id anywhere; the styled div matches by text
    // and the click lands on its wrapping anchor.
    let untagged = MemTree::new();
    let wrapper = untagged.spawn("a");
    let styled = untagged.spawn("div");
    styled.put_attr("class", "ao y");
    styled.put_text("Write");
    wrapper.append(&styled);
    untagged.root().append(&wrapper);

    assert_eq!(run(&untagged, playbook, "click-write"), Outcome::Clicked);
    assert!(untagged
        .events()
        .iter()
        .all(|r| r.node_id == wrapper.node_id()));
}

#[test]
fn substack_button_gets_focus_before_the_click_sequence() {
    let playbook = r#"{
        "site": "substack",
        "actions": {
            "click-continue": {
                "filter": ["native-button"],
                "strategy": [{"predicate": {"text-equals": "Continue"}}],
                "action": {"kind": "focus-then-click-sequence"}
            }
        }
    }"#;

    let tree = MemTree::new();
    let button = tree.spawn("button");
    button.put_text("Continue");
    tree.root().append(&button);

    assert_eq!(run(&tree, playbook, "click-continue"), Outcome::Clicked);
    assert_eq!(tree.focused(), Some(button.node_id()));
    assert_eq!(tree.events().len(), 9);
}

#[test]
fn twitter_editor_spans_collapse_to_one_with_new_text() {
    let playbook = r#"{
        "site": "twitter",
        "actions": {
            "collapse-editor-spans": {
                "filter": [{"tag": "span"}],
                "strategy": [{"predicate": {"attr-equals": {"name": "data-text", "value": "true"}}}],
                "action": {"kind": "prune-keep-first-and-set-text", "text": "hello world"}
            }
        }
    }"#;

    let tree = MemTree::new();
    let mut spans = Vec::new();
    for chunk in ["first ", "second ", "third"] {
        let span = tree.spawn("span");
        span.put_attr("data-text", "true");
        span.put_text(chunk);
        tree.root().append(&span);
        spans.push(span);
    }

    assert_eq!(
        run(&tree, playbook, "collapse-editor-spans"),
        Outcome::Mutated { removed: 2 }
    );
    assert!(spans[0].is_attached());
    assert!(!spans[1].is_attached());
    assert!(!spans[2].is_attached());
    assert_eq!(spans[0].text(), "hello world");
}
