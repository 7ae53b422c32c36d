//! Pointer input unification for mouse and touch.
//!
//! Hosts deliver raw mouse and touch signals as [`RawInput`]. The adapter
//! turns them into a single [`PointerEvent`] with a phase and a position so
//! the drag controller never branches on the input source.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Phase of a pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerPhase {
    Start,
    Move,
    End,
}

/// Device that produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerSource {
    Mouse,
    Touch,
}

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    /// Position in viewport (client) coordinates.
    pub position: Point,
    pub source: PointerSource,
}

/// Mouse signal kinds the handles care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseKind {
    Down,
    Move,
    Up,
}

/// A raw mouse signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MouseInput {
    pub kind: MouseKind,
    pub client: Point,
}

/// Touch signal kinds the handles care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchKind {
    Start,
    Move,
    End,
    Cancel,
}

/// A raw touch signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchInput {
    pub kind: TouchKind,
    /// Contacts currently on the surface.
    pub touches: Vec<Point>,
    /// Contacts that changed in this signal.
    pub changed_touches: Vec<Point>,
}

/// A raw input signal as delivered by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawInput {
    Mouse(MouseInput),
    Touch(TouchInput),
}

impl RawInput {
    pub fn mouse(kind: MouseKind, x: f64, y: f64) -> Self {
        RawInput::Mouse(MouseInput { kind, client: Point::new(x, y) })
    }

    /// A single-contact touch signal at `(x, y)`.
    ///
    /// For `End`/`Cancel` the contact has left the surface, so it is only
    /// reported as changed.
    pub fn touch(kind: TouchKind, x: f64, y: f64) -> Self {
        let point = Point::new(x, y);
        let touches = match kind {
            TouchKind::Start | TouchKind::Move => vec![point],
            TouchKind::End | TouchKind::Cancel => Vec::new(),
        };
        RawInput::Touch(TouchInput { kind, touches, changed_touches: vec![point] })
    }
}

impl PointerEvent {
    /// Translate a raw signal. Returns `None` for a touch start or move that
    /// carries no contact point.
    ///
    /// Only the first contact is tracked: start reads the first active
    /// touch, move and end read the first changed touch.
    pub fn from_raw(raw: &RawInput) -> Option<Self> {
        match raw {
            RawInput::Mouse(mouse) => {
                let phase = match mouse.kind {
                    MouseKind::Down => PointerPhase::Start,
                    MouseKind::Move => PointerPhase::Move,
                    MouseKind::Up => PointerPhase::End,
                };
                Some(Self { phase, position: mouse.client, source: PointerSource::Mouse })
            }
            RawInput::Touch(touch) => {
                let first_touch = touch.touches.first().copied();
                let first_changed = touch.changed_touches.first().copied();
                let (phase, position) = match touch.kind {
                    TouchKind::Start => (PointerPhase::Start, first_touch.or(first_changed)?),
                    TouchKind::Move => (PointerPhase::Move, first_changed.or(first_touch)?),
                    TouchKind::End | TouchKind::Cancel => (
                        PointerPhase::End,
                        first_changed.or(first_touch).unwrap_or(Point::ZERO),
                    ),
                };
                Some(Self { phase, position, source: PointerSource::Touch })
            }
        }
    }
}
