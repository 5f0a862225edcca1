//! # Host Bridge Traits
//!
//! Contracts shared by the compatibility core and every platform integration.
//!
//! ## Overview
//!
//! This crate defines the boundary between the update-coordination core and
//! the environment it runs in. The legacy host, the modern data providers and
//! the time/logging facilities are all injected through the traits below, so
//! the core never touches ambient globals and can be exercised with mocks.
//!
//! ## Traits
//!
//! ### Host
//! - [`LegacyHost`](host::LegacyHost) - Presence check plus the single `notify(namespace)` callable
//!
//! ### Providers
//! - [`DataProvider`](providers::DataProvider) - Current snapshot and change observation for one namespace
//! - [`ProviderRegistry`](providers::ProviderRegistry) - Typed namespace → provider mapping
//!
//! ### Utilities
//! - [`Clock`](time::Clock) - Time source for deterministic testing
//! - [`LoggerSink`](time::LoggerSink) - Forward structured logs to host logging
//!
//! ## Platform Requirements
//!
//! | Platform | Implementation Crate | Host |
//! |----------|---------------------|------|
//! | Desktop  | `bridge-desktop`    | `CallbackHost` / `DetachedHost` |
//! | Web      | `bridge-wasm`       | `WindowHost` |
//!
//! ## Thread Safety
//!
//! Traits carry the [`PlatformSendSync`](platform::PlatformSendSync) bound:
//! `Send + Sync` on native targets, no bound on `wasm32` where browser objects
//! are single-threaded.

pub mod data;
pub mod error;
pub mod host;
pub mod namespace;
pub mod platform;
pub mod providers;
pub mod time;

pub use error::BridgeError;

// Re-export commonly used types
pub use data::{
    BatteryData, ChargingState, DailyForecast, MediaData, NowPlaying, SystemData,
    TemperatureUnit, WeatherData,
};
pub use host::LegacyHost;
pub use namespace::Namespace;
pub use platform::{Observer, PlatformSendSync};
pub use providers::{
    BatteryProvider, DataProvider, MediaProvider, ProviderRegistry, ProviderRegistryBuilder,
    Subscription, SystemProvider, WeatherProvider,
};
pub use time::{Clock, ConsoleLogger, FixedClock, LogEntry, LogLevel, LoggerSink, SystemClock};
