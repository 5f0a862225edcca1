//! Host middleware contract
//!
//! The embedding host drives every middleware the same way: one
//! `initialise` with the provider registry, then any number of actions
//! forwarded from widgets.

use bridge_traits::ProviderRegistry;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Widget-originated request routed through the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostAction {
    pub namespace: String,
    pub function: String,
    #[serde(default)]
    pub data: Value,
}

pub trait HostMiddleware {
    /// Receive the provider registry. Called once by the host.
    fn initialise(&mut self, providers: Arc<ProviderRegistry>);

    /// Handle an action a widget sent through the host.
    fn invoke_action(&self, action: &HostAction);
}
