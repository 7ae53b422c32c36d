//! Corner handle definitions and positioning.

use crate::config::HandleStyle;
use crate::cursor::CursorStyle;
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Corner a handle is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    /// All corners in handle creation order.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    /// Index in creation order.
    pub fn index(self) -> usize {
        match self {
            Corner::TopLeft => 0,
            Corner::TopRight => 1,
            Corner::BottomRight => 2,
            Corner::BottomLeft => 3,
        }
    }

    /// Corner for a creation-order index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Resize cursor shown over this corner.
    pub fn cursor(self) -> CursorStyle {
        match self {
            Corner::TopLeft | Corner::BottomRight => CursorStyle::NwseResize,
            Corner::TopRight | Corner::BottomLeft => CursorStyle::NeswResize,
        }
    }

    /// Whether the handle sits on the left edge. Dragging these to the
    /// right shrinks the target.
    pub fn is_left_edge(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    /// The corner point of a rectangle.
    pub fn point(self, bounds: Rect) -> Point {
        match self {
            Corner::TopLeft => Point::new(bounds.x0, bounds.y0),
            Corner::TopRight => Point::new(bounds.x1, bounds.y0),
            Corner::BottomRight => Point::new(bounds.x1, bounds.y1),
            Corner::BottomLeft => Point::new(bounds.x0, bounds.y1),
        }
    }
}

/// Offsets of a handle from the overlay's edges, in pixels.
///
/// Only the two edges adjacent to the handle's corner are set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeInsets {
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
}

impl EdgeInsets {
    /// Insets that centre a `size` handle on `corner`.
    pub fn for_corner(corner: Corner, size: Size) -> Self {
        let x = -size.width / 2.0;
        let y = -size.height / 2.0;
        match corner {
            Corner::TopLeft => Self { left: Some(x), top: Some(y), ..Self::default() },
            Corner::TopRight => Self { right: Some(x), top: Some(y), ..Self::default() },
            Corner::BottomRight => Self { right: Some(x), bottom: Some(y), ..Self::default() },
            Corner::BottomLeft => Self { left: Some(x), bottom: Some(y), ..Self::default() },
        }
    }

    /// The set edges as `(css property, value)` pairs.
    pub fn declarations(&self) -> Vec<(&'static str, f64)> {
        [
            ("left", self.left),
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }
}

/// A resize handle widget.
#[derive(Debug, Clone, PartialEq)]
pub struct HandleWidget {
    /// Corner the handle is anchored to.
    pub corner: Corner,
    /// Handle size in pixels.
    pub size: Size,
    /// Offsets relative to the overlay edges.
    pub insets: EdgeInsets,
    /// Absolute box in viewport coordinates, when a target is present.
    pub rect: Option<Rect>,
}

impl HandleWidget {
    /// Create an unpositioned handle.
    pub fn new(corner: Corner, style: &HandleStyle) -> Self {
        Self {
            corner,
            size: Size::new(style.width_px(), style.height_px()),
            insets: EdgeInsets::default(),
            rect: None,
        }
    }

    /// Index in creation order.
    pub fn index(&self) -> usize {
        self.corner.index()
    }

    /// Resize cursor of this handle.
    pub fn cursor(&self) -> CursorStyle {
        self.corner.cursor()
    }

    /// Recompute position from the style and the target's current box.
    pub fn reposition(&mut self, style: &HandleStyle, bounds: Option<Rect>) {
        self.size = Size::new(style.width_px(), style.height_px());
        self.insets = EdgeInsets::for_corner(self.corner, self.size);
        self.rect = bounds.map(|b| Rect::from_center_size(self.corner.point(b), self.size));
    }
}

/// The set of corner handles around the target.
#[derive(Debug, Clone, Default)]
pub struct HandleSet {
    handles: Vec<HandleWidget>,
}

impl HandleSet {
    /// Create all four handles in creation order.
    pub fn create(style: &HandleStyle) -> Self {
        Self {
            handles: Corner::ALL
                .iter()
                .map(|&corner| HandleWidget::new(corner, style))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HandleWidget> {
        self.handles.iter()
    }

    /// Handle anchored to `corner`, if the set is populated.
    pub fn get(&self, corner: Corner) -> Option<&HandleWidget> {
        self.handles.get(corner.index())
    }

    /// Recompute every handle's position.
    pub fn position(&mut self, style: &HandleStyle, bounds: Option<Rect>) {
        for handle in &mut self.handles {
            handle.reposition(style, bounds);
        }
    }

    /// Drop all handles.
    pub fn clear(&mut self) {
        self.handles.clear();
    }
}
