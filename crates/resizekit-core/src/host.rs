//! Host surface abstraction.
//!
//! The resize module never owns the document. Everything it reads or writes
//! goes through these traits, which a host (a DOM binding, a native editor,
//! a test double) implements.

use crate::handles::HandleWidget;
use kurbo::Rect;

/// The element being resized (usually an image).
pub trait TargetElement {
    /// Rendered width in pixels. `None` or `Some(0)` means unset.
    fn width(&self) -> Option<u32>;

    /// Intrinsic width of the media in pixels.
    fn natural_width(&self) -> u32;

    /// Bounding box in viewport coordinates.
    fn bounds(&self) -> Rect;

    /// Set the width. Height follows from the element's own aspect ratio.
    fn set_width(&mut self, width: u32);

    /// Set the element's cursor style. An empty value clears it.
    fn set_cursor(&mut self, cursor: &str);

    /// Width to resize from: the rendered width, else the natural width.
    fn effective_width(&self) -> u32 {
        self.width()
            .filter(|w| *w > 0)
            .unwrap_or_else(|| self.natural_width())
    }
}

/// The editing surface hosting the resize handles.
pub trait ResizeHost {
    /// The element currently being edited, if any.
    fn target(&mut self) -> Option<&mut dyn TargetElement>;

    /// Add a handle widget to the overlay container.
    fn append_handle(&mut self, handle: &HandleWidget);

    /// Apply a handle's freshly computed position.
    fn place_handle(&mut self, handle: &HandleWidget);

    /// Set the cursor on the document root. An empty value clears it.
    fn set_document_cursor(&mut self, cursor: &str);
}
