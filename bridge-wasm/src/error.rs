//! Error types for WebAssembly bridge implementations

use bridge_traits::error::BridgeError;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

/// Errors raised by browser APIs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WasmError {
    /// A browser call threw
    #[error("{context}: {message}")]
    JavaScript {
        /// Operation that threw
        context: String,
        /// JS error message
        message: String,
    },
}

impl From<WasmError> for BridgeError {
    fn from(err: WasmError) -> Self {
        BridgeError::Platform(err.to_string())
    }
}

/// Converts a thrown JS value into a [`WasmError`], keeping the JS message.
pub fn js_error(context: &str, err: JsValue) -> WasmError {
    let message = if err.is_string() {
        err.as_string().unwrap_or_default()
    } else if let Some(js_err) = err.dyn_ref::<js_sys::Error>() {
        js_err.message().into()
    } else {
        format!("{err:?}")
    };
    WasmError::JavaScript {
        context: context.to_string(),
        message,
    }
}
