//! Errors raised while binding to the DOM.

use resizekit_core::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BindError {
    #[error("No global window")]
    NoWindow,
    #[error("Window has no document")]
    NoDocument,
    #[error("Document has no body")]
    NoBody,
    #[error("DOM call failed: {0}")]
    Js(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for BindError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        BindError::Js(format!("{:?}", value))
    }
}
