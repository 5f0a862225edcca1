//! Legacy host backed by a page-global JavaScript function.
//!
//! Legacy widgets define a global callback (by convention `mainUpdate`) that
//! receives the namespace whose data changed. Its presence on `globalThis` is
//! what marks a page as needing the compatibility bridge.

use bridge_traits::error::Result as BridgeResult;
use bridge_traits::host::LegacyHost;
use js_sys::{Function, Reflect};
use tracing::trace;
use wasm_bindgen::{JsCast, JsValue};

use crate::error::{WasmError, WasmResult};

/// Global callback name legacy widgets define.
pub const DEFAULT_CALLBACK_NAME: &str = "mainUpdate";

/// [`LegacyHost`] that calls a function on `globalThis`.
///
/// The lookup happens on every call, so a callback defined or removed after
/// construction is picked up immediately.
#[derive(Debug, Clone)]
pub struct WindowHost {
    callback_name: String,
}

impl WindowHost {
    /// Host calling `globalThis.mainUpdate`.
    pub fn new() -> Self {
        Self::with_callback_name(DEFAULT_CALLBACK_NAME)
    }

    /// Host calling `globalThis[name]`.
    pub fn with_callback_name(name: impl Into<String>) -> Self {
        Self {
            callback_name: name.into(),
        }
    }

    /// Name of the global the host looks up.
    pub fn callback_name(&self) -> &str {
        &self.callback_name
    }

    fn callback(&self) -> WasmResult<Function> {
        let value = Reflect::get(&js_sys::global(), &JsValue::from_str(&self.callback_name))?;
        value
            .dyn_into::<Function>()
            .map_err(|_| WasmError::CallbackMissing(self.callback_name.clone()))
    }
}

impl Default for WindowHost {
    fn default() -> Self {
        Self::new()
    }
}

impl LegacyHost for WindowHost {
    fn is_available(&self) -> bool {
        self.callback().is_ok()
    }

    fn notify(&self, namespace: &str) -> BridgeResult<()> {
        let callback = self.callback()?;

        trace!(callback = %self.callback_name, namespace, "Calling legacy callback");
        // Invoked as a method of the global object, like `window.mainUpdate(ns)`.
        callback
            .call1(&js_sys::global(), &JsValue::from_str(namespace))
            .map_err(WasmError::from)?;
        Ok(())
    }
}
