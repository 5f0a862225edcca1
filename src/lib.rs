//! Compatibility bridge façade and bootstrap helpers.
//!
//! This crate wires a legacy host and the modern data providers into the
//! update coordinator. Desktop hosts typically enable the `desktop-shims`
//! feature (which depends on `bridge-desktop`), whereas WebAssembly builds
//! enable the `wasm` feature and rely on `WindowHost` from `bridge-wasm`.
//!
//! ```ignore
//! use compat_bridge::{bootstrap, BridgeConfig, ProviderRegistry};
//! use std::sync::Arc;
//!
//! let config = BridgeConfig::builder().host(Arc::new(host)).build()?;
//! let providers = ProviderRegistry::builder().battery(battery).build();
//! let coordinator = bootstrap(config, providers);
//! ```

use std::sync::Arc;
use tracing::info;

pub use bridge_traits;
pub use core_compat;
pub use core_runtime;

#[cfg(all(feature = "desktop-shims", not(target_arch = "wasm32")))]
pub use bridge_desktop;
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub use bridge_wasm;

pub use bridge_traits::{LegacyHost, Namespace, ProviderRegistry};
pub use core_compat::{CoordinatorPhase, PublishedData, UpdateCoordinator};
pub use core_runtime::config::BridgeConfig;
pub use core_runtime::{Error, Result};

/// Build a coordinator from `config` and initialise it with `providers`.
///
/// The returned coordinator is either active or dormant, depending on whether
/// the configured host was present.
pub fn bootstrap(
    config: BridgeConfig,
    providers: impl Into<Arc<ProviderRegistry>>,
) -> UpdateCoordinator {
    let mut coordinator = UpdateCoordinator::new(config);
    coordinator.initialise(providers.into());
    info!(phase = ?coordinator.phase(), "Compatibility bridge bootstrapped");
    coordinator
}

/// Convenience bootstrapper for WebAssembly hosts.
///
/// Uses the page's global `mainUpdate` function as the legacy host.
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub fn bootstrap_wasm(providers: impl Into<Arc<ProviderRegistry>>) -> Result<UpdateCoordinator> {
    let config = BridgeConfig::builder()
        .host(Arc::new(bridge_wasm::WindowHost::new()))
        .build()?;
    Ok(bootstrap(config, providers))
}
