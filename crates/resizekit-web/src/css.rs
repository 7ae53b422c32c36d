//! CSS text for handle elements.

use resizekit_core::{EdgeInsets, HandleStyle, HandleWidget};

/// Format a pixel length.
pub fn px(value: f64) -> String {
    format!("{}px", value)
}

/// Declarations written once when a handle element is created.
pub fn handle_declarations(style: &HandleStyle, handle: &HandleWidget) -> Vec<(String, String)> {
    style.declarations(handle.cursor())
}

/// Declarations that place a handle relative to the overlay. Only the two
/// edges adjacent to the handle's corner are written.
pub fn inset_declarations(insets: &EdgeInsets) -> Vec<(&'static str, String)> {
    insets
        .declarations()
        .into_iter()
        .map(|(name, value)| (name, px(value)))
        .collect()
}

/// Render declarations as an inline `style` attribute value.
pub fn style_text<K: AsRef<str>>(declarations: &[(K, String)]) -> String {
    declarations
        .iter()
        .map(|(name, value)| format!("{}: {};", name.as_ref(), value))
        .collect::<Vec<_>>()
        .join(" ")
}
