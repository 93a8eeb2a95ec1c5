use serde::{Deserialize, Serialize};

/// Bounding rectangle of a node, in document pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whole-rect containment check against the viewport.
    ///
    /// Observational only: resolution and dispatch never gate on this flag,
    /// it is reported through diagnostics for the caller to interpret.
    pub fn in_viewport(&self, viewport: &Viewport) -> bool {
        self.y >= 0.0
            && self.x >= 0.0
            && self.bottom() <= viewport.height
            && self.right() <= viewport.width
    }

    /// Rect as the four numbers diagnostics report.
    pub fn as_numbers(&self) -> [f64; 4] {
        [self.x, self.y, self.width, self.height]
    }
}

/// Visible document area used for the in-viewport flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}
