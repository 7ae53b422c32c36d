//! Recording host used by the unit tests.

use crate::handles::{Corner, HandleWidget};
use crate::host::{ResizeHost, TargetElement};
use kurbo::{Point, Rect};

/// An image-like target that keeps its aspect ratio when resized.
#[derive(Debug, Clone)]
pub struct MockTarget {
    pub width: Option<u32>,
    pub natural_width: u32,
    /// Height divided by width.
    pub aspect: f64,
    pub origin: Point,
    pub cursor: String,
    pub width_writes: usize,
}

impl MockTarget {
    pub fn new(width: u32, height: u32) -> Self {
        let aspect = if width > 0 {
            f64::from(height) / f64::from(width)
        } else {
            0.0
        };
        Self {
            width: Some(width),
            natural_width: width,
            aspect,
            origin: Point::ZERO,
            cursor: String::new(),
            width_writes: 0,
        }
    }
}

impl TargetElement for MockTarget {
    fn width(&self) -> Option<u32> {
        self.width
    }

    fn natural_width(&self) -> u32 {
        self.natural_width
    }

    fn bounds(&self) -> Rect {
        let w = f64::from(self.effective_width());
        Rect::new(
            self.origin.x,
            self.origin.y,
            self.origin.x + w,
            self.origin.y + w * self.aspect,
        )
    }

    fn set_width(&mut self, width: u32) {
        self.width = Some(width);
        self.width_writes += 1;
    }

    fn set_cursor(&mut self, cursor: &str) {
        self.cursor = cursor.to_string();
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockHost {
    pub target: Option<MockTarget>,
    pub body_cursor: String,
    pub appended: Vec<Corner>,
    pub placements: Vec<HandleWidget>,
    pub place_calls: usize,
}

impl MockHost {
    pub fn with_target(width: u32, height: u32) -> Self {
        Self {
            target: Some(MockTarget::new(width, height)),
            ..Self::default()
        }
    }

    pub fn target_ref(&self) -> &MockTarget {
        self.target.as_ref().expect("mock host has no target")
    }

    /// Most recent placement of the handle on `corner`.
    pub fn placed(&self, corner: Corner) -> Option<&HandleWidget> {
        self.placements.iter().rev().find(|h| h.corner == corner)
    }
}

impl ResizeHost for MockHost {
    fn target(&mut self) -> Option<&mut dyn TargetElement> {
        self.target.as_mut().map(|t| t as &mut dyn TargetElement)
    }

    fn append_handle(&mut self, handle: &HandleWidget) {
        self.appended.push(handle.corner);
    }

    fn place_handle(&mut self, handle: &HandleWidget) {
        self.placements.push(handle.clone());
        self.place_calls += 1;
    }

    fn set_document_cursor(&mut self, cursor: &str) {
        self.body_cursor = cursor.to_string();
    }
}
