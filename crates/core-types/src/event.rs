use serde::{Deserialize, Serialize};

/// Synthetic pointer/mouse event kinds the dispatcher can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    PointerOver,
    PointerEnter,
    PointerDown,
    MouseDown,
    PointerUp,
    MouseUp,
    Click,
    PointerOut,
    PointerLeave,
}

impl EventKind {
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::PointerOver => "pointerover",
            EventKind::PointerEnter => "pointerenter",
            EventKind::PointerDown => "pointerdown",
            EventKind::MouseDown => "mousedown",
            EventKind::PointerUp => "pointerup",
            EventKind::MouseUp => "mouseup",
            EventKind::Click => "click",
            EventKind::PointerOut => "pointerout",
            EventKind::PointerLeave => "pointerleave",
        }
    }

    /// The full user-click simulation sequence, in dispatch order.
    ///
    /// Enter family, down family, up family, click, leave family. Some
    /// sites bind handlers to the intermediate pointer events rather than
    /// the terminal click, so the order is contractual.
    pub fn click_sequence() -> [EventKind; 9] {
        [
            EventKind::PointerOver,
            EventKind::PointerEnter,
            EventKind::PointerDown,
            EventKind::MouseDown,
            EventKind::PointerUp,
            EventKind::MouseUp,
            EventKind::Click,
            EventKind::PointerOut,
            EventKind::PointerLeave,
        ]
    }
}

/// A fully described synthetic event, ready to hand to a node.
///
/// Execution is separate from description so the same event list can be
/// dry-run against a recording tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntheticEvent {
    pub kind: EventKind,
    pub bubbles: bool,
    pub cancelable: bool,
}

impl SyntheticEvent {
    /// Events in a click simulation always bubble and are cancelable.
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            bubbles: true,
            cancelable: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_sequence_order_is_fixed() {
        let names: Vec<&str> = EventKind::click_sequence()
            .iter()
            .map(|k| k.name())
            .collect();
        assert_eq!(
            names,
            vec![
                "pointerover",
                "pointerenter",
                "pointerdown",
                "mousedown",
                "pointerup",
                "mouseup",
                "click",
                "pointerout",
                "pointerleave",
            ]
        );
    }
}
