//! # Update Coordinator
//!
//! Decides whether the compatibility bridge runs at all and, if it does,
//! builds the adapters and drives their first update.
//!
//! ## Lifecycle
//!
//! 1. [`UpdateCoordinator::initialise`] checks the legacy host once.
//! 2. Host absent: the coordinator goes [`Dormant`](CoordinatorPhase::Dormant)
//!    for good. No adapter is built and the host is never called.
//! 3. Host present: one adapter per namespace is built, all sharing a single
//!    [`SharedNotifier`]. Then each adapter's first update runs in
//!    [`Namespace::ALL`] order, so an adapter may read data published by the
//!    ones before it.
//! 4. From then on adapters notify on their own; the coordinator is passive.
//!
//! ## Usage
//!
//! ```ignore
//! use core_compat::UpdateCoordinator;
//! use core_runtime::config::BridgeConfig;
//! use std::sync::Arc;
//!
//! let config = BridgeConfig::builder().host(host).build()?;
//! let mut coordinator = UpdateCoordinator::new(config);
//! coordinator.initialise(Arc::new(providers));
//!
//! if coordinator.is_active() {
//!     let battery = coordinator.published().get(Namespace::Battery);
//! }
//! ```

use crate::adapters::{AdapterContext, AdapterFactory, CompatAdapter, DefaultAdapters};
use crate::capability::CapabilityDetector;
use crate::middleware::{HostAction, HostMiddleware};
use crate::notifier::SharedNotifier;
use crate::published::PublishedData;
use bridge_traits::{Namespace, ProviderRegistry};
use core_runtime::config::BridgeConfig;
use core_runtime::events::{CoordinatorEvent, CoreEvent};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, info_span, trace};

/// Where the coordinator is in its lifecycle.
pub enum CoordinatorState {
    Uninitialised,
    /// Legacy host was absent at initialisation.
    Dormant,
    Active(ActiveBridge),
}

/// Adapters and shared handles of an active bridge.
pub struct ActiveBridge {
    providers: Arc<ProviderRegistry>,
    notifier: SharedNotifier,
    adapters: Vec<Box<dyn CompatAdapter>>,
}

impl ActiveBridge {
    pub fn providers(&self) -> &Arc<ProviderRegistry> {
        &self.providers
    }

    pub fn notifier(&self) -> &SharedNotifier {
        &self.notifier
    }

    /// Adapter namespaces in construction order.
    pub fn namespaces(&self) -> Vec<Namespace> {
        self.adapters.iter().map(|adapter| adapter.namespace()).collect()
    }
}

/// Fieldless view of [`CoordinatorState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorPhase {
    Uninitialised,
    Dormant,
    Active,
}

pub struct UpdateCoordinator {
    config: BridgeConfig,
    detector: CapabilityDetector,
    factory: Box<dyn AdapterFactory>,
    published: PublishedData,
    state: CoordinatorState,
}

impl UpdateCoordinator {
    /// Coordinator using the bundled adapters.
    pub fn new(config: BridgeConfig) -> Self {
        Self::with_factory(config, DefaultAdapters)
    }

    /// Coordinator building adapters through `factory`.
    pub fn with_factory<F>(config: BridgeConfig, factory: F) -> Self
    where
        F: AdapterFactory + 'static,
    {
        let detector = CapabilityDetector::new(Arc::clone(&config.host));
        Self {
            config,
            detector,
            factory: Box::new(factory),
            published: PublishedData::new(),
            state: CoordinatorState::Uninitialised,
        }
    }

    /// Activate the bridge if the legacy host is present.
    ///
    /// Only the first call has any effect.
    pub fn initialise(&mut self, providers: Arc<ProviderRegistry>) {
        if !matches!(self.state, CoordinatorState::Uninitialised) {
            debug!(phase = ?self.phase(), "Coordinator already initialised, ignoring");
            return;
        }

        let span = info_span!("initialise");
        let _entered = span.enter();

        if !self.detector.detect() {
            info!("Legacy host not detected, compatibility bridge dormant");
            self.emit(CoordinatorEvent::Dormant);
            self.state = CoordinatorState::Dormant;
            return;
        }

        let notifier = SharedNotifier::new(Arc::clone(&self.config.host));
        let context = AdapterContext {
            providers: Arc::clone(&providers),
            notifier: notifier.clone(),
            published: self.published.clone(),
            format: self.config.legacy,
            clock: Arc::clone(&self.config.clock),
            events: self.config.lifecycle_bus(),
        };

        let adapters: Vec<Box<dyn CompatAdapter>> = Namespace::ALL
            .into_iter()
            .map(|namespace| self.factory.create(namespace, &context))
            .collect();

        let registered = providers.namespaces();
        info!(providers = ?registered, "Legacy host detected, adapters constructed");
        self.emit(CoordinatorEvent::Activated {
            providers: registered,
        });

        let mut order = Vec::with_capacity(adapters.len());
        for adapter in &adapters {
            let namespace = adapter.namespace();
            trace!(%namespace, "Running first update");
            adapter.on_first_update();
            order.push(namespace);
        }
        debug!(?order, "First-update pass completed");
        self.emit(CoordinatorEvent::FirstUpdatePassCompleted { order });

        self.state = CoordinatorState::Active(ActiveBridge {
            providers,
            notifier,
            adapters,
        });
    }

    /// Accepted for middleware conformance; the bridge has no actions.
    pub fn invoke_action(&self, action: &HostAction) {
        trace!(
            namespace = %action.namespace,
            function = %action.function,
            "Ignoring host action"
        );
    }

    pub fn state(&self) -> &CoordinatorState {
        &self.state
    }

    pub fn phase(&self) -> CoordinatorPhase {
        match self.state {
            CoordinatorState::Uninitialised => CoordinatorPhase::Uninitialised,
            CoordinatorState::Dormant => CoordinatorPhase::Dormant,
            CoordinatorState::Active(_) => CoordinatorPhase::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, CoordinatorState::Active(_))
    }

    /// Latest legacy data per namespace. Empty unless active.
    pub fn published(&self) -> &PublishedData {
        &self.published
    }

    /// The notifier shared by every adapter, once active.
    pub fn notifier(&self) -> Option<&SharedNotifier> {
        match &self.state {
            CoordinatorState::Active(bridge) => Some(&bridge.notifier),
            _ => None,
        }
    }

    /// Number of adapters currently held.
    pub fn adapter_count(&self) -> usize {
        match &self.state {
            CoordinatorState::Active(bridge) => bridge.adapters.len(),
            _ => 0,
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    fn emit(&self, event: CoordinatorEvent) {
        if let Some(bus) = self.config.lifecycle_bus() {
            bus.emit(CoreEvent::Coordinator(event)).ok();
        }
    }
}

impl HostMiddleware for UpdateCoordinator {
    fn initialise(&mut self, providers: Arc<ProviderRegistry>) {
        UpdateCoordinator::initialise(self, providers);
    }

    fn invoke_action(&self, action: &HostAction) {
        UpdateCoordinator::invoke_action(self, action);
    }
}

impl fmt::Debug for UpdateCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateCoordinator")
            .field("phase", &self.phase())
            .field("adapters", &self.adapter_count())
            .field("published", &self.published)
            .finish_non_exhaustive()
    }
}
