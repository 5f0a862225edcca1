//! # Bridge Configuration Module
//!
//! Provides configuration management for the compatibility bridge.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a
//! [`BridgeConfig`] that holds the injected legacy host plus the settings the
//! adapters use when translating provider data. It validates everything up
//! front so the coordinator itself never has to fail.
//!
//! ## Required Dependencies
//!
//! - `LegacyHost` - the legacy callback surface
//!
//! When the `desktop-shims` feature is enabled, a missing host defaults to
//! `bridge_desktop::DetachedHost`, which keeps the bridge dormant.
//!
//! ## Optional Dependencies (with defaults)
//!
//! - `Clock` - time source for media extrapolation (default: `SystemClock`)
//! - `EventBus` - lifecycle observation (default: none)
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::BridgeConfig;
//! use bridge_traits::TemperatureUnit;
//! use std::sync::Arc;
//!
//! let config = BridgeConfig::builder()
//!     .host(Arc::new(my_host))
//!     .temperature_unit(TemperatureUnit::Fahrenheit)
//!     .forecast_days(5)
//!     .build()
//!     .expect("Failed to build config");
//! ```
//!
//! ## Error Handling
//!
//! ```should_panic
//! use core_runtime::config::BridgeConfig;
//!
//! // Zero forecast days is rejected during validation
//! let config = BridgeConfig::builder()
//!     .forecast_days(0)
//!     .build()
//!     .expect("Should fail - invalid forecast length");
//! ```

use crate::error::{Error, Result};
use crate::events::EventBus;
use bridge_traits::{Clock, LegacyHost, SystemClock, TemperatureUnit};
use std::sync::Arc;

/// Default number of daily forecast entries exposed to legacy widgets.
pub const DEFAULT_FORECAST_DAYS: usize = 7;

/// Upper bound accepted for [`LegacyFormat::forecast_days`].
pub const MAX_FORECAST_DAYS: usize = 14;

/// Configuration for the compatibility bridge.
///
/// Use [`BridgeConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct BridgeConfig {
    /// Legacy host capability surface (required)
    pub host: Arc<dyn LegacyHost>,

    /// Time source used by adapters
    pub clock: Arc<dyn Clock>,

    /// Optional event bus for lifecycle events
    pub event_bus: Option<Arc<EventBus>>,

    /// Settings shaping the legacy field sets
    pub legacy: LegacyFormat,

    /// Feature flags
    pub features: FeatureFlags,
}

impl std::fmt::Debug for BridgeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeConfig")
            .field("host", &"LegacyHost { ... }")
            .field("clock", &"Clock { ... }")
            .field("event_bus", &self.event_bus)
            .field("legacy", &self.legacy)
            .field("features", &self.features)
            .finish()
    }
}

/// How adapters shape data for legacy widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyFormat {
    /// Convert temperatures into this unit; `None` keeps the provider's unit.
    pub temperature_unit: Option<TemperatureUnit>,

    /// Maximum daily forecast entries in the weather field set.
    pub forecast_days: usize,
}

impl Default for LegacyFormat {
    fn default() -> Self {
        Self {
            temperature_unit: None,
            forecast_days: DEFAULT_FORECAST_DAYS,
        }
    }
}

impl LegacyFormat {
    /// Validates the format settings
    pub fn validate(&self) -> Result<()> {
        if self.forecast_days == 0 {
            return Err(Error::Config(
                "Forecast length must be at least 1 day".to_string(),
            ));
        }

        if self.forecast_days > MAX_FORECAST_DAYS {
            return Err(Error::Config(format!(
                "Forecast length exceeds maximum of {} days",
                MAX_FORECAST_DAYS
            )));
        }

        Ok(())
    }
}

/// Feature flags control optional behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeatureFlags {
    /// Emit coordinator and adapter lifecycle events (requires an EventBus)
    pub enable_lifecycle_events: bool,
}

impl BridgeConfig {
    /// Creates a new builder for constructing a `BridgeConfig`.
    pub fn builder() -> BridgeConfigBuilder {
        BridgeConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Legacy format settings are in range
    /// - Feature flags are consistent with the injected dependencies
    pub fn validate(&self) -> Result<()> {
        self.legacy.validate()?;

        if self.features.enable_lifecycle_events && self.event_bus.is_none() {
            return Err(Error::Config(
                "Lifecycle events enabled but no EventBus provided. \
                 Disable the feature or inject an EventBus."
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Event bus to publish on, if lifecycle events are enabled.
    pub fn lifecycle_bus(&self) -> Option<Arc<EventBus>> {
        if self.features.enable_lifecycle_events {
            self.event_bus.clone()
        } else {
            None
        }
    }
}

#[cfg(not(feature = "desktop-shims"))]
fn host_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "LegacyHost".to_string(),
        message: "LegacyHost implementation is required to detect the legacy renderer. \
                 Desktop: enable the 'desktop-shims' feature or inject a CallbackHost. \
                 Web: inject bridge_wasm::WindowHost."
            .to_string(),
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_host() -> Result<Arc<dyn LegacyHost>> {
    use bridge_desktop::DetachedHost;

    let host: Arc<dyn LegacyHost> = Arc::new(DetachedHost);
    Ok(host)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_host() -> Result<Arc<dyn LegacyHost>> {
    Err(host_missing_error())
}

/// Builder for constructing [`BridgeConfig`] instances.
#[derive(Default)]
pub struct BridgeConfigBuilder {
    host: Option<Arc<dyn LegacyHost>>,
    clock: Option<Arc<dyn Clock>>,
    event_bus: Option<Arc<EventBus>>,
    legacy: LegacyFormat,
    features: FeatureFlags,
}

impl BridgeConfigBuilder {
    /// Sets the legacy host implementation.
    pub fn host(mut self, host: Arc<dyn LegacyHost>) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the time source.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Sets the event bus lifecycle events are published on.
    pub fn event_bus(mut self, bus: Arc<EventBus>) -> Self {
        self.event_bus = Some(bus);
        self
    }

    /// Converts legacy temperatures into `unit`.
    pub fn temperature_unit(mut self, unit: TemperatureUnit) -> Self {
        self.legacy.temperature_unit = Some(unit);
        self
    }

    /// Limits the legacy forecast to `days` entries.
    pub fn forecast_days(mut self, days: usize) -> Self {
        self.legacy.forecast_days = days;
        self
    }

    /// Enables or disables lifecycle events.
    pub fn enable_lifecycle_events(mut self, enabled: bool) -> Self {
        self.features.enable_lifecycle_events = enabled;
        self
    }

    /// Replaces all feature flags.
    pub fn features(mut self, features: FeatureFlags) -> Self {
        self.features = features;
        self
    }

    /// Builds the `BridgeConfig`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No host was provided and no platform default is available
    /// - Validation fails (see [`BridgeConfig::validate`])
    pub fn build(self) -> Result<BridgeConfig> {
        let host = match self.host {
            Some(host) => host,
            None => provide_default_host()?,
        };

        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        let config = BridgeConfig {
            host,
            clock,
            event_bus: self.event_bus,
            legacy: self.legacy,
            features: self.features,
        };

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_desktop::CallbackHost;
    use bridge_traits::FixedClock;
    use chrono::{TimeZone, Utc};

    fn host() -> Arc<dyn LegacyHost> {
        Arc::new(CallbackHost::new(|_| {}))
    }

    #[test]
    fn test_builder_with_host() {
        let config = BridgeConfig::builder().host(host()).build().unwrap();

        assert!(config.host.is_available());
        assert_eq!(config.legacy, LegacyFormat::default());
        assert_eq!(config.features, FeatureFlags::default());
        assert!(config.event_bus.is_none());
    }

    #[cfg(feature = "desktop-shims")]
    #[test]
    fn test_build_with_desktop_defaults() {
        let config = BridgeConfig::builder().build().unwrap();
        assert!(!config.host.is_available());
    }

    #[cfg(not(feature = "desktop-shims"))]
    #[test]
    fn test_builder_requires_host() {
        let result = BridgeConfig::builder().build();
        assert!(matches!(
            result,
            Err(Error::CapabilityMissing { ref capability, .. }) if capability == "LegacyHost"
        ));
    }

    #[test]
    fn test_builder_with_custom_clock() {
        let instant = Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap();
        let config = BridgeConfig::builder()
            .host(host())
            .clock(Arc::new(FixedClock(instant)))
            .build()
            .unwrap();

        assert_eq!(config.clock.now(), instant);
    }

    #[test]
    fn test_builder_with_legacy_format() {
        let config = BridgeConfig::builder()
            .host(host())
            .temperature_unit(TemperatureUnit::Fahrenheit)
            .forecast_days(3)
            .build()
            .unwrap();

        assert_eq!(
            config.legacy.temperature_unit,
            Some(TemperatureUnit::Fahrenheit)
        );
        assert_eq!(config.legacy.forecast_days, 3);
    }

    #[test]
    fn test_validate_rejects_zero_forecast_days() {
        let result = BridgeConfig::builder().host(host()).forecast_days(0).build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_excessive_forecast_days() {
        let result = BridgeConfig::builder()
            .host(host())
            .forecast_days(MAX_FORECAST_DAYS + 1)
            .build();
        assert!(matches!(result, Err(Error::Config(_))));

        let result = BridgeConfig::builder()
            .host(host())
            .forecast_days(MAX_FORECAST_DAYS)
            .build();
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_lifecycle_events_require_bus() {
        let result = BridgeConfig::builder()
            .host(host())
            .enable_lifecycle_events(true)
            .build();
        assert!(matches!(result, Err(Error::Config(ref msg)) if msg.contains("EventBus")));
    }

    #[test]
    fn test_lifecycle_bus_respects_flag() {
        let bus = Arc::new(EventBus::default());

        let config = BridgeConfig::builder()
            .host(host())
            .event_bus(Arc::clone(&bus))
            .build()
            .unwrap();
        assert!(config.lifecycle_bus().is_none());

        let config = BridgeConfig::builder()
            .host(host())
            .event_bus(Arc::clone(&bus))
            .features(FeatureFlags {
                enable_lifecycle_events: true,
            })
            .build()
            .unwrap();
        assert!(config.lifecycle_bus().is_some());
    }

    #[test]
    fn test_debug_hides_trait_objects() {
        let config = BridgeConfig::builder().host(host()).build().unwrap();
        let debug = format!("{:?}", config);
        assert!(debug.contains("LegacyHost { ... }"));
        assert!(debug.contains("forecast_days: 7"));
    }
}
