//! Shared change notifier
//!
//! Every adapter holds a clone of the same [`SharedNotifier`]. It is the only
//! path by which change signals reach the legacy host.

use bridge_traits::{LegacyHost, Namespace};
use std::fmt;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub struct SharedNotifier {
    host: Arc<dyn LegacyHost>,
}

impl SharedNotifier {
    pub fn new(host: Arc<dyn LegacyHost>) -> Self {
        Self { host }
    }

    /// Tell the legacy host that `namespace` changed.
    ///
    /// The host is re-checked on every call. If its callback has gone away
    /// the signal is dropped without a trace. A failure inside the callback
    /// is logged and never reaches the caller.
    pub fn notify(&self, namespace: Namespace) {
        if !self.host.is_available() {
            return;
        }

        if let Err(err) = self.host.notify(namespace.as_str()) {
            warn!(%namespace, error = %err, "Legacy host callback failed");
        }
    }
}

impl fmt::Debug for SharedNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedNotifier").finish_non_exhaustive()
    }
}
