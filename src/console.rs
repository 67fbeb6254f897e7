//! Browser console output for the JS-facing API.
//!
//! Only the wasm-bindgen layer logs; the store and router stay silent.

use wasm_bindgen::JsValue;
use web_sys::console;

pub(crate) fn debug(message: &str) {
    console::debug_1(&JsValue::from_str(message));
}

pub(crate) fn warn(message: &str) {
    console::warn_1(&JsValue::from_str(message));
}
