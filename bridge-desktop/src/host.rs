//! In-process legacy host implementations

use bridge_traits::{
    error::{BridgeError, Result},
    host::LegacyHost,
};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::trace;

type Callback = Box<dyn Fn(&str) + Send + Sync>;

/// Legacy host backed by a native closure.
///
/// Used when the legacy renderer is embedded in the same process. The host can
/// be detached and re-attached at runtime, mirroring a renderer that tears
/// down its callback while the bridge is still alive.
///
/// # Example
///
/// ```ignore
/// use bridge_desktop::CallbackHost;
///
/// let host = CallbackHost::new(|namespace| println!("{namespace} changed"));
/// host.detach();
/// assert!(!host.is_attached());
/// ```
pub struct CallbackHost {
    callback: Callback,
    attached: AtomicBool,
}

impl CallbackHost {
    /// Create an attached host forwarding every notification to `callback`.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
            attached: AtomicBool::new(true),
        }
    }

    /// Make the callback reachable again.
    pub fn attach(&self) {
        self.attached.store(true, Ordering::SeqCst);
    }

    /// Remove the callback; the host reports itself unavailable until re-attached.
    pub fn detach(&self) {
        self.attached.store(false, Ordering::SeqCst);
    }

    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for CallbackHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackHost")
            .field("attached", &self.is_attached())
            .finish()
    }
}

impl LegacyHost for CallbackHost {
    fn is_available(&self) -> bool {
        self.is_attached()
    }

    fn notify(&self, namespace: &str) -> Result<()> {
        if !self.is_attached() {
            return Err(BridgeError::NotAvailable(
                "legacy callback detached".to_string(),
            ));
        }

        trace!(namespace, "Invoking legacy callback");
        (self.callback)(namespace);
        Ok(())
    }
}

/// Host for environments without a legacy renderer.
///
/// Never available, so a coordinator built on it stays dormant.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedHost;

impl LegacyHost for DetachedHost {
    fn is_available(&self) -> bool {
        false
    }

    fn notify(&self, _namespace: &str) -> Result<()> {
        Err(BridgeError::NotAvailable(
            "no legacy host in this environment".to_string(),
        ))
    }
}
