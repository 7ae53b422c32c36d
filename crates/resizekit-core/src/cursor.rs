//! Drag cursor management.
//!
//! During a drag the handle's resize cursor is written to the document root
//! and to the target element, so it stays visible whatever is under the
//! pointer. It is cleared (empty value) when the drag ends.

use crate::host::ResizeHost;
use serde::{Deserialize, Serialize};

/// Resize cursor identity of a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CursorStyle {
    /// Diagonal from top-left to bottom-right.
    NwseResize,
    /// Diagonal from top-right to bottom-left.
    NeswResize,
}

impl CursorStyle {
    /// CSS cursor keyword.
    pub fn as_css(&self) -> &'static str {
        match self {
            CursorStyle::NwseResize => "nwse-resize",
            CursorStyle::NeswResize => "nesw-resize",
        }
    }
}

/// Writes the drag cursor to the document root and the target.
#[derive(Debug, Clone, Default)]
pub struct CursorManager {
    current: Option<CursorStyle>,
}

impl CursorManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cursor last applied, if it has not been cleared since.
    pub fn current(&self) -> Option<CursorStyle> {
        self.current
    }

    /// Show `style` on the document root and the target.
    pub fn apply<H: ResizeHost + ?Sized>(&mut self, host: &mut H, style: CursorStyle) {
        set_cursor(host, style.as_css());
        self.current = Some(style);
    }

    /// Reset the cursor on the document root and the target.
    pub fn clear<H: ResizeHost + ?Sized>(&mut self, host: &mut H) {
        set_cursor(host, "");
        self.current = None;
    }
}

/// Write a cursor value (empty to clear) to the document root and the target.
pub fn set_cursor<H: ResizeHost + ?Sized>(host: &mut H, value: &str) {
    host.set_document_cursor(value);
    if let Some(target) = host.target() {
        target.set_cursor(value);
    }
}
