//! Platform-specific helper abstractions used to keep trait bounds aligned with
//! the threading guarantees of each target.
//!
//! Native targets require `Send + Sync` so hosts, providers and observers can
//! be shared freely between threads. WebAssembly builds run entirely on a
//! single thread and cannot satisfy those bounds because browser-provided
//! objects (e.g., `js_sys::Function`) are not thread-safe. The helpers below
//! make the required bounds conditional without duplicating every trait
//! definition.

use std::sync::Arc;

/// Marker trait that applies `Send + Sync` on native targets while becoming a
/// no-op on `wasm32`.
#[cfg(not(target_arch = "wasm32"))]
pub trait PlatformSendSync: Send + Sync {}

#[cfg(not(target_arch = "wasm32"))]
impl<T> PlatformSendSync for T where T: Send + Sync {}

#[cfg(target_arch = "wasm32")]
pub trait PlatformSendSync {}

#[cfg(target_arch = "wasm32")]
impl<T> PlatformSendSync for T {}

/// Callback invoked by a provider whenever its data changes.
#[cfg(not(target_arch = "wasm32"))]
pub type Observer<T> = Arc<dyn Fn(&T) + Send + Sync>;

#[cfg(target_arch = "wasm32")]
pub type Observer<T> = Arc<dyn Fn(&T)>;
