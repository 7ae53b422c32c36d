//! Drag session state.

use crate::events::SubscriptionId;
use crate::handles::Corner;

/// Document listeners installed for the duration of a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionListeners {
    pub on_move: SubscriptionId,
    pub on_release: SubscriptionId,
}

/// State of an active drag on a resize handle.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// Handle that started the drag.
    pub corner: Corner,
    /// Horizontal pointer position at press.
    pub start_x: f64,
    /// Target width at press.
    pub start_width: u32,
    pub listeners: SessionListeners,
}

impl DragSession {
    pub fn new(corner: Corner, start_x: f64, start_width: u32, listeners: SessionListeners) -> Self {
        Self {
            corner,
            start_x,
            start_width,
            listeners,
        }
    }

    /// Horizontal drag distance from the press position.
    pub fn delta(&self, x: f64) -> f64 {
        x - self.start_x
    }

    /// Target width for a pointer at horizontal position `x`.
    pub fn width_at(&self, x: f64) -> u32 {
        resized_width(self.corner, self.start_width, self.delta(x))
    }
}

/// Observable drag state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging(Corner),
}

/// Width after dragging `corner` horizontally by `delta`.
///
/// Left-edge handles grow the target when dragged left; right-edge handles
/// grow it when dragged right. The result is rounded to whole pixels and
/// never negative.
pub fn resized_width(corner: Corner, start_width: u32, delta: f64) -> u32 {
    let start = f64::from(start_width);
    let width = if corner.is_left_edge() {
        start - delta
    } else {
        start + delta
    };
    // `as` saturates at u32::MAX and maps NaN to 0.
    width.round().max(0.0) as u32
}
