//! resizekit Web Binding
//!
//! Mounts resize handles on a live document: `div` handles in an overlay
//! element, browser mouse/touch/resize events routed into
//! [`resizekit_core::ResizeModule`], and timers driving the reflow debounce.

pub mod css;
pub mod error;
pub mod schedule;

pub use error::BindError;

#[cfg(target_arch = "wasm32")]
mod dom;

#[cfg(target_arch = "wasm32")]
pub use dom::{DomHost, DomImage, ImageResizer, ResizeHandles};

/// Set up panic reporting and console logging.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(js_name = initResizeKit)]
pub fn init() {
    console_error_panic_hook::set_once();

    // A second call finds the logger already installed.
    if console_log::init_with_level(log::Level::Info).is_ok() {
        log::info!("resizekit initialised");
    }
}
