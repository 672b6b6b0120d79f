//! Pointer actions emitted by the gesture engines.
//!
//! Actions live for one frame: an engine produces an ordered list and the
//! pointer controller consumes it before the next frame is read.

use serde::{Deserialize, Serialize};

/// A discrete pointer command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Move the pointer toward a camera-space target.
    Move { x: i32, y: i32 },

    /// Single left click.
    Click,

    /// Vertical scroll. Positive scrolls up.
    Scroll { amount: i32 },

    /// Press and hold the left button.
    DragStart,

    /// Release a held left button.
    DragStop,

    /// Diagnostic eye aspect ratio. Has no pointer effect.
    Debug { ear: f64 },
}

impl Action {
    /// Short uppercase name, as used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Move { .. } => "MOVE",
            Action::Click => "CLICK",
            Action::Scroll { .. } => "SCROLL",
            Action::DragStart => "DRAG_START",
            Action::DragStop => "DRAG_STOP",
            Action::Debug { .. } => "DEBUG",
        }
    }

    /// Whether applying this action can touch the OS pointer.
    pub fn has_pointer_effect(&self) -> bool {
        !matches!(self, Action::Debug { .. })
    }
}
