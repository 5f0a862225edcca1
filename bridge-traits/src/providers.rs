//! Data Provider Abstraction
//!
//! Providers own the modern, strongly-typed data for one namespace and push
//! changes to registered observers. The [`ProviderRegistry`] maps each
//! [`Namespace`] to the provider for that namespace's data shape.

use std::fmt;
use std::sync::Arc;

use crate::{
    data::{BatteryData, MediaData, SystemData, WeatherData},
    error::{BridgeError, Result},
    namespace::Namespace,
    platform::{Observer, PlatformSendSync},
};

/// Source of one namespace's data.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::providers::{DataProvider, Subscription, WeatherProvider};
/// use std::sync::Arc;
///
/// fn watch(provider: &WeatherProvider) -> Subscription {
///     provider.observe(Arc::new(|data| println!("now {}", data.temperature)))
/// }
/// ```
pub trait DataProvider: PlatformSendSync {
    type Data: Clone;

    /// Latest known data, `None` until the provider has produced any.
    fn current(&self) -> Option<Self::Data>;

    /// Register a callback fired on every subsequent change.
    ///
    /// The observer stays registered until the returned [`Subscription`]
    /// is dropped.
    fn observe(&self, observer: Observer<Self::Data>) -> Subscription;
}

#[cfg(not(target_arch = "wasm32"))]
type Unsubscribe = Box<dyn FnOnce() + Send + Sync>;

#[cfg(target_arch = "wasm32")]
type Unsubscribe = Box<dyn FnOnce()>;

/// Registration handle returned by [`DataProvider::observe`].
///
/// Dropping it unregisters the observer.
#[must_use = "dropping a Subscription unregisters the observer immediately"]
pub struct Subscription {
    unsubscribe: Option<Unsubscribe>,
}

impl Subscription {
    /// Handle that runs `unsubscribe` once, when dropped or cancelled.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new<F>(unsubscribe: F) -> Self
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// Handle that runs `unsubscribe` once, when dropped or cancelled.
    #[cfg(target_arch = "wasm32")]
    pub fn new<F>(unsubscribe: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// Handle with nothing to unregister, for providers that never notify.
    pub fn inert() -> Self {
        Self { unsubscribe: None }
    }

    /// Unregister now.
    pub fn cancel(mut self) {
        self.run();
    }

    fn run(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

pub type WeatherProvider = dyn DataProvider<Data = WeatherData>;
pub type BatteryProvider = dyn DataProvider<Data = BatteryData>;
pub type SystemProvider = dyn DataProvider<Data = SystemData>;
pub type MediaProvider = dyn DataProvider<Data = MediaData>;

/// Typed mapping from namespace to provider.
///
/// Built once by the caller and shared read-only afterwards. Every slot is
/// optional; adapters whose provider is missing simply never publish.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    weather: Option<Arc<WeatherProvider>>,
    battery: Option<Arc<BatteryProvider>>,
    system: Option<Arc<SystemProvider>>,
    media: Option<Arc<MediaProvider>>,
}

impl ProviderRegistry {
    pub fn builder() -> ProviderRegistryBuilder {
        ProviderRegistryBuilder::default()
    }

    pub fn weather(&self) -> Option<&Arc<WeatherProvider>> {
        self.weather.as_ref()
    }

    pub fn battery(&self) -> Option<&Arc<BatteryProvider>> {
        self.battery.as_ref()
    }

    pub fn system(&self) -> Option<&Arc<SystemProvider>> {
        self.system.as_ref()
    }

    pub fn media(&self) -> Option<&Arc<MediaProvider>> {
        self.media.as_ref()
    }

    /// Whether a provider is registered for `namespace`.
    pub fn contains(&self, namespace: Namespace) -> bool {
        match namespace {
            Namespace::Weather => self.weather.is_some(),
            Namespace::Battery => self.battery.is_some(),
            Namespace::System => self.system.is_some(),
            Namespace::Media => self.media.is_some(),
        }
    }

    /// Registered namespaces, in first-update order.
    pub fn namespaces(&self) -> Vec<Namespace> {
        Namespace::ALL
            .into_iter()
            .filter(|namespace| self.contains(*namespace))
            .collect()
    }

    /// Fail with [`BridgeError::MissingProvider`] unless `namespace` is registered.
    pub fn require(&self, namespace: Namespace) -> Result<()> {
        if self.contains(namespace) {
            Ok(())
        } else {
            Err(BridgeError::MissingProvider(namespace))
        }
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("namespaces", &self.namespaces())
            .finish()
    }
}

/// Builder for [`ProviderRegistry`].
#[derive(Default)]
pub struct ProviderRegistryBuilder {
    registry: ProviderRegistry,
}

impl ProviderRegistryBuilder {
    pub fn weather(mut self, provider: Arc<WeatherProvider>) -> Self {
        self.registry.weather = Some(provider);
        self
    }

    pub fn battery(mut self, provider: Arc<BatteryProvider>) -> Self {
        self.registry.battery = Some(provider);
        self
    }

    pub fn system(mut self, provider: Arc<SystemProvider>) -> Self {
        self.registry.system = Some(provider);
        self
    }

    pub fn media(mut self, provider: Arc<MediaProvider>) -> Self {
        self.registry.media = Some(provider);
        self
    }

    pub fn build(self) -> ProviderRegistry {
        self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ChargingState, SystemData};

    struct FixedBattery(BatteryData);

    impl DataProvider for FixedBattery {
        type Data = BatteryData;

        fn current(&self) -> Option<BatteryData> {
            Some(self.0.clone())
        }

        fn observe(&self, _observer: Observer<BatteryData>) -> Subscription {
            Subscription::inert()
        }
    }

    struct EmptySystem;

    impl DataProvider for EmptySystem {
        type Data = SystemData;

        fn current(&self) -> Option<SystemData> {
            None
        }

        fn observe(&self, _observer: Observer<SystemData>) -> Subscription {
            Subscription::inert()
        }
    }

    fn battery() -> Arc<BatteryProvider> {
        Arc::new(FixedBattery(BatteryData {
            percentage: 80,
            state: ChargingState::Unplugged,
            low_power_mode: false,
        }))
    }

    #[test]
    fn test_empty_registry() {
        let registry = ProviderRegistry::default();
        assert!(registry.namespaces().is_empty());
        assert!(registry.weather().is_none());
        assert!(matches!(
            registry.require(Namespace::Weather),
            Err(BridgeError::MissingProvider(Namespace::Weather))
        ));
    }

    #[test]
    fn test_builder_registers_slots_in_order() {
        let registry = ProviderRegistry::builder()
            .system(Arc::new(EmptySystem))
            .battery(battery())
            .build();

        assert_eq!(
            registry.namespaces(),
            vec![Namespace::Battery, Namespace::System]
        );
        assert!(registry.require(Namespace::Battery).is_ok());
        assert!(registry.require(Namespace::Media).is_err());
        assert_eq!(
            registry.battery().and_then(|p| p.current()).map(|d| d.percentage),
            Some(80)
        );
        assert!(registry.system().and_then(|p| p.current()).is_none());
    }

    #[test]
    fn test_subscription_unsubscribes_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let runs = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&runs);
        let subscription = Subscription::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        drop(subscription);
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        let counter = Arc::clone(&runs);
        Subscription::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .cancel();
        assert_eq!(runs.load(Ordering::SeqCst), 2);

        drop(Subscription::inert());
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_clone_shares_providers() {
        let provider = battery();
        let registry = ProviderRegistry::builder()
            .battery(Arc::clone(&provider))
            .build();
        let copy = registry.clone();

        assert!(Arc::ptr_eq(copy.battery().unwrap(), &provider));
        assert_eq!(format!("{:?}", copy), "ProviderRegistry { namespaces: [Battery] }");
    }
}
