//! Configuration for resize handles.
//!
//! The shape follows the editor module options the handles are mounted with:
//!
//! ```json
//! {
//!   "handleStyles": { "width": 12, "height": 12, "backgroundColor": "white" },
//!   "debounceMs": 10
//! }
//! ```

use crate::cursor::CursorStyle;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

/// Default handle edge length in CSS pixels.
pub const DEFAULT_HANDLE_SIZE: f64 = 12.0;
/// Default delay before a viewport reflow re-positions the handles.
pub const DEFAULT_DEBOUNCE_MS: u64 = 10;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A style dimension, either a bare number or a CSS length such as `"12px"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Pixels(f64),
    Css(String),
}

impl Default for Dimension {
    fn default() -> Self {
        Self::Pixels(0.0)
    }
}

impl Dimension {
    /// Resolve to pixels. Anything that does not start with a finite number
    /// resolves to 0.
    pub fn px(&self) -> f64 {
        let value = match self {
            Dimension::Pixels(v) => Some(*v),
            Dimension::Css(s) => parse_leading_number(s),
        };
        value.filter(|v| v.is_finite()).unwrap_or(0.0)
    }
}

/// Parse the longest numeric prefix of `s`, ignoring leading whitespace.
fn parse_leading_number(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let end = s
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        .map(|(i, c)| i + c.len_utf8())
        .last()?;

    // Shrink until the prefix parses ("12e" or "1.5-" are not numbers yet).
    (1..=end).rev().find_map(|len| s[..len].parse::<f64>().ok())
}

/// Visual style of a resize handle.
///
/// `width` and `height` drive the handle geometry. Every other key is kept
/// verbatim and applied to the handle as a style declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandleStyle {
    #[serde(default)]
    pub width: Dimension,
    #[serde(default)]
    pub height: Dimension,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Default for HandleStyle {
    fn default() -> Self {
        let extra = [
            ("position", "absolute"),
            ("backgroundColor", "white"),
            ("border", "1px solid #777"),
            ("boxSizing", "border-box"),
            ("opacity", "0.80"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect();

        Self {
            width: Dimension::Pixels(DEFAULT_HANDLE_SIZE),
            height: Dimension::Pixels(DEFAULT_HANDLE_SIZE),
            extra,
        }
    }
}

impl HandleStyle {
    /// Create a style with the given size and no extra declarations.
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            width: Dimension::Pixels(width),
            height: Dimension::Pixels(height),
            extra: BTreeMap::new(),
        }
    }

    /// Handle width in pixels.
    pub fn width_px(&self) -> f64 {
        self.width.px()
    }

    /// Handle height in pixels.
    pub fn height_px(&self) -> f64 {
        self.height.px()
    }

    /// Full list of CSS declarations for a handle with the given cursor.
    ///
    /// Extra keys come first (camelCase keys are converted to CSS property
    /// names), then the cursor, then the pixel width and height.
    pub fn declarations(&self, cursor: CursorStyle) -> Vec<(String, String)> {
        let mut out: Vec<(String, String)> = self
            .extra
            .iter()
            .filter_map(|(key, value)| {
                let value = match value {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    _ => return None,
                };
                Some((css_property_name(key), value))
            })
            .collect();

        out.push(("cursor".to_string(), cursor.as_css().to_string()));
        out.push(("width".to_string(), format!("{}px", self.width_px())));
        out.push(("height".to_string(), format!("{}px", self.height_px())));
        out
    }
}

/// Convert a camelCase style key into a CSS property name.
pub fn css_property_name(key: &str) -> String {
    let mut name = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            name.push('-');
            name.push(c.to_ascii_lowercase());
        } else {
            name.push(c);
        }
    }
    name
}

/// Resize module configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResizeConfig {
    /// Style applied to every handle.
    pub handle_styles: HandleStyle,
    /// Quiet period before a viewport reflow re-positions the handles.
    pub debounce_ms: u64,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            handle_styles: HandleStyle::default(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl ResizeConfig {
    /// Parse a configuration from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Replace the handle style.
    pub fn with_handle_styles(mut self, style: HandleStyle) -> Self {
        self.handle_styles = style;
        self
    }

    /// Reflow debounce delay.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
