//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for native platforms
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! - `CallbackHost` - legacy host backed by an in-process closure
//! - `DetachedHost` - legacy host that is never present (bridge stays dormant)
//! - `InMemoryProvider` - observable provider that native data sources push into
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{CallbackHost, InMemoryProvider};
//! use bridge_traits::{BatteryData, ProviderRegistry};
//! use std::sync::Arc;
//!
//! let host = Arc::new(CallbackHost::new(|namespace| renderer.refresh(namespace)));
//! let battery = Arc::new(InMemoryProvider::<BatteryData>::new());
//! let providers = ProviderRegistry::builder().battery(battery.clone()).build();
//! ```

mod host;
mod provider;

pub use host::{CallbackHost, DetachedHost};
pub use provider::InMemoryProvider;
