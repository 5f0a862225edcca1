//! WebAssembly Bridge Implementations
//!
//! This crate provides the WebAssembly implementation of the legacy host
//! contract defined in `bridge-traits`. Legacy widgets running in a browser
//! page expose a global JavaScript callback; [`WindowHost`] detects it and
//! forwards change notifications to it through `js-sys`.
//!
//! # Platform Support
//!
//! This crate is designed exclusively for the `wasm32-unknown-unknown` target.
//! It will not compile for native targets.
//!
//! # Examples
//!
//! ```ignore
//! use bridge_wasm::WindowHost;
//! use bridge_traits::host::LegacyHost;
//!
//! let host = WindowHost::new();
//! if host.is_available() {
//!     host.notify("weather").ok();
//! }
//! ```

#![cfg(target_arch = "wasm32")]
#![warn(missing_docs)]

pub mod error;
pub mod host;

// Re-export commonly used types
pub use error::{WasmError, WasmResult};
pub use host::{WindowHost, DEFAULT_CALLBACK_NAME};
