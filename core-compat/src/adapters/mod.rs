//! # Compatibility Adapters
//!
//! One adapter per [`Namespace`]. An adapter watches the provider for its
//! namespace, translates each snapshot into the legacy field set, stores it
//! in [`PublishedData`] and signals the host through the [`SharedNotifier`].
//!
//! Adapters are built by an [`AdapterFactory`] once the coordinator has seen
//! the legacy host. [`DefaultAdapters`] builds the four bundled adapters;
//! tests substitute their own factory to observe construction.

pub mod battery;
pub mod media;
pub mod system;
pub mod weather;

pub use battery::BatteryAdapter;
pub use media::MediaAdapter;
pub use system::SystemAdapter;
pub use weather::WeatherAdapter;

use crate::notifier::SharedNotifier;
use crate::published::{LegacySnapshot, PublishedData};
use bridge_traits::{Clock, Namespace, PlatformSendSync, ProviderRegistry};
use core_runtime::config::LegacyFormat;
use core_runtime::events::{AdapterEvent, CoreEvent, EventBus, UpdateTrigger};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Translator between one provider namespace and the legacy host.
pub trait CompatAdapter: PlatformSendSync {
    fn namespace(&self) -> Namespace;

    /// Publish whatever the provider currently holds.
    ///
    /// Runs exactly once, right after every adapter has been constructed.
    fn on_first_update(&self);
}

/// Builds the adapter for a namespace.
pub trait AdapterFactory: PlatformSendSync {
    fn create(&self, namespace: Namespace, context: &AdapterContext) -> Box<dyn CompatAdapter>;
}

/// Everything an adapter is allowed to touch.
#[derive(Clone)]
pub struct AdapterContext {
    pub providers: Arc<ProviderRegistry>,
    pub notifier: SharedNotifier,
    pub published: PublishedData,
    pub format: LegacyFormat,
    pub clock: Arc<dyn Clock>,
    /// Present only when lifecycle events are enabled.
    pub events: Option<Arc<EventBus>>,
}

impl fmt::Debug for AdapterContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterContext")
            .field("providers", &self.providers)
            .field("published", &self.published)
            .field("format", &self.format)
            .field("events", &self.events.is_some())
            .finish_non_exhaustive()
    }
}

/// Factory for the bundled weather, battery, system and media adapters.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultAdapters;

impl AdapterFactory for DefaultAdapters {
    fn create(&self, namespace: Namespace, context: &AdapterContext) -> Box<dyn CompatAdapter> {
        match namespace {
            Namespace::Weather => Box::new(WeatherAdapter::new(context)),
            Namespace::Battery => Box::new(BatteryAdapter::new(context)),
            Namespace::System => Box::new(SystemAdapter::new(context)),
            Namespace::Media => Box::new(MediaAdapter::new(context)),
        }
    }
}

/// Store-then-notify path shared by the bundled adapters.
#[derive(Clone)]
pub(crate) struct Publisher {
    namespace: Namespace,
    notifier: SharedNotifier,
    published: PublishedData,
    events: Option<Arc<EventBus>>,
}

impl Publisher {
    pub(crate) fn new(namespace: Namespace, context: &AdapterContext) -> Self {
        Self {
            namespace,
            notifier: context.notifier.clone(),
            published: context.published.clone(),
            events: context.events.clone(),
        }
    }

    pub(crate) fn publish(&self, snapshot: LegacySnapshot, trigger: UpdateTrigger) {
        let fields = snapshot.len();
        self.published.publish(self.namespace, snapshot);
        debug!(namespace = %self.namespace, ?trigger, fields, "Published legacy data");

        self.emit(AdapterEvent::Published {
            namespace: self.namespace,
            trigger,
            fields,
        });
        self.notifier.notify(self.namespace);
    }

    pub(crate) fn skip_first_update(&self) {
        debug!(namespace = %self.namespace, "No provider data for first update");
        self.emit(AdapterEvent::FirstUpdateSkipped {
            namespace: self.namespace,
        });
    }

    fn emit(&self, event: AdapterEvent) {
        if let Some(bus) = &self.events {
            bus.emit(CoreEvent::Adapter(event)).ok();
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{context, RecordingHost};
    use super::*;
    use core_runtime::events::EventStream;

    #[test]
    fn test_default_factory_builds_matching_adapters() {
        let host = Arc::new(RecordingHost::default());
        let context = context(ProviderRegistry::default(), Arc::clone(&host));

        for namespace in Namespace::ALL {
            let adapter = DefaultAdapters.create(namespace, &context);
            assert_eq!(adapter.namespace(), namespace);
        }
    }

    #[test]
    fn test_first_update_without_provider_is_silent() {
        let host = Arc::new(RecordingHost::default());
        let context = context(ProviderRegistry::default(), Arc::clone(&host));

        for namespace in Namespace::ALL {
            DefaultAdapters.create(namespace, &context).on_first_update();
        }

        assert!(host.calls().is_empty());
        assert!(context.published.namespaces().is_empty());
    }

    #[test]
    fn test_publisher_stores_before_notifying() {
        let host = Arc::new(RecordingHost::default());
        let bus = Arc::new(EventBus::default());
        let mut stream = EventStream::new(bus.subscribe());
        let mut context = context(ProviderRegistry::default(), Arc::clone(&host));
        context.events = Some(bus);

        let publisher = Publisher::new(Namespace::System, &context);
        publisher.publish(
            LegacySnapshot::new().with("locale", "en-GB"),
            UpdateTrigger::ProviderChange,
        );
        publisher.skip_first_update();

        assert_eq!(host.calls(), vec!["system"]);
        assert!(context.published.contains(Namespace::System));
        assert_eq!(
            stream.drain(),
            vec![
                CoreEvent::Adapter(AdapterEvent::Published {
                    namespace: Namespace::System,
                    trigger: UpdateTrigger::ProviderChange,
                    fields: 1,
                }),
                CoreEvent::Adapter(AdapterEvent::FirstUpdateSkipped {
                    namespace: Namespace::System,
                }),
            ]
        );
    }
}
