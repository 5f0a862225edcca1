//! Legacy host detection

use bridge_traits::LegacyHost;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Decides whether the legacy renderer is present and the bridge must run.
#[derive(Clone)]
pub struct CapabilityDetector {
    host: Arc<dyn LegacyHost>,
}

impl CapabilityDetector {
    pub fn new(host: Arc<dyn LegacyHost>) -> Self {
        Self { host }
    }

    /// `true` iff the host currently exposes its legacy callback.
    pub fn detect(&self) -> bool {
        let available = self.host.is_available();
        debug!(available, "Checked for legacy host callback");
        available
    }
}

impl fmt::Debug for CapabilityDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityDetector").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::error::Result;
    use mockall::mock;

    mock! {
        Host {}

        impl LegacyHost for Host {
            fn is_available(&self) -> bool;
            fn notify(&self, namespace: &str) -> Result<()>;
        }
    }

    #[test]
    fn test_detect_reflects_host() {
        let mut host = MockHost::new();
        host.expect_is_available().times(1).return_const(true);
        host.expect_notify().never();

        assert!(CapabilityDetector::new(Arc::new(host)).detect());
    }

    #[test]
    fn test_detect_absent_host() {
        let mut host = MockHost::new();
        host.expect_is_available().times(1).return_const(false);
        host.expect_notify().never();

        assert!(!CapabilityDetector::new(Arc::new(host)).detect());
    }
}
