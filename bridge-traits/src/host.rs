//! Legacy Host Abstraction
//!
//! The legacy host exposes a single callable that widgets rely on to learn
//! that a namespace's data changed. Whether that callable exists at all is the
//! signal that compatibility support is needed.

use crate::{error::Result, platform::PlatformSendSync};

/// Capability surface of the legacy host.
///
/// # Platform Support
///
/// - **Desktop**: `bridge_desktop::CallbackHost` wraps an in-process closure
/// - **Web**: `bridge_wasm::WindowHost` looks up the page's global callback
/// - **Tests**: mock with `mockall`
///
/// # Example
///
/// ```ignore
/// use bridge_traits::host::LegacyHost;
///
/// fn announce(host: &dyn LegacyHost) {
///     if host.is_available() {
///         host.notify("battery").ok();
///     }
/// }
/// ```
pub trait LegacyHost: PlatformSendSync {
    /// Whether the legacy callback is currently reachable.
    ///
    /// Must be a pure read of host state.
    fn is_available(&self) -> bool;

    /// Invoke the legacy callback with a namespace identifier.
    ///
    /// Callers are expected to check [`is_available`](Self::is_available)
    /// first. An error means the callback itself failed (for example a
    /// JavaScript exception), not that it was missing.
    fn notify(&self, namespace: &str) -> Result<()>;
}
