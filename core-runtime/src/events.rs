//! # Event Bus System
//!
//! Lifecycle events for the compatibility bridge, broadcast over
//! `tokio::sync::broadcast`.
//!
//! ## Overview
//!
//! The coordinator and the adapters announce what they did (went dormant,
//! activated, finished the first-update pass, published a namespace) on an
//! optional [`EventBus`]. Hosts and tests subscribe to observe the bridge
//! without hooking into the legacy callback itself.
//!
//! ```text
//! ┌─────────────┐     emit      ┌───────────┐
//! │ Coordinator ├──────────────>│           │     subscribe    ┌────────────┐
//! └─────────────┘               │ EventBus  ├─────────────────>│ Subscriber │
//! ┌─────────────┐     emit      │ (broadcast│                  └────────────┘
//! │  Adapters   ├──────────────>│  channel) │
//! └─────────────┘               └───────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::events::{CoordinatorEvent, CoreEvent, EventBus};
//!
//! let bus = EventBus::new(16);
//! let mut rx = bus.subscribe();
//!
//! bus.emit(CoreEvent::Coordinator(CoordinatorEvent::Dormant)).ok();
//! assert_eq!(rx.try_recv().unwrap(), CoreEvent::Coordinator(CoordinatorEvent::Dormant));
//! ```
//!
//! Emission never blocks and needs no async runtime. With no subscribers
//! `emit` returns an error, which publishers ignore.

use bridge_traits::Namespace;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;

// Re-export commonly used types
pub use tokio::sync::broadcast::error::{SendError, TryRecvError};
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the event bus channel.
///
/// Subscribers that can't keep up will receive `TryRecvError::Lagged`.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 64;

// ============================================================================
// Core Event Types
// ============================================================================

/// Top-level event enum encompassing all event categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload")]
pub enum CoreEvent {
    /// Coordinator lifecycle
    Coordinator(CoordinatorEvent),
    /// Adapter activity
    Adapter(AdapterEvent),
}

impl CoreEvent {
    /// Returns a human-readable description of the event.
    pub fn description(&self) -> &str {
        match self {
            CoreEvent::Coordinator(e) => e.description(),
            CoreEvent::Adapter(e) => e.description(),
        }
    }

    /// Returns the severity level of the event.
    pub fn severity(&self) -> EventSeverity {
        match self {
            CoreEvent::Coordinator(CoordinatorEvent::Activated { .. }) => EventSeverity::Info,
            CoreEvent::Coordinator(CoordinatorEvent::FirstUpdatePassCompleted { .. }) => {
                EventSeverity::Info
            }
            _ => EventSeverity::Debug,
        }
    }

    /// Namespace the event concerns, if any.
    pub fn namespace(&self) -> Option<Namespace> {
        match self {
            CoreEvent::Adapter(AdapterEvent::Published { namespace, .. }) => Some(*namespace),
            CoreEvent::Adapter(AdapterEvent::FirstUpdateSkipped { namespace }) => Some(*namespace),
            CoreEvent::Coordinator(_) => None,
        }
    }
}

/// Event severity levels for filtering and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventSeverity {
    Debug,
    Info,
}

// ============================================================================
// Coordinator Events
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum CoordinatorEvent {
    /// Legacy host absent at initialisation; the bridge stays inactive.
    Dormant,
    /// Legacy host present; adapters constructed.
    Activated {
        /// Namespaces with a registered provider.
        providers: Vec<Namespace>,
    },
    /// Every adapter ran its first update.
    FirstUpdatePassCompleted {
        /// Namespaces in the order their first update ran.
        order: Vec<Namespace>,
    },
}

impl CoordinatorEvent {
    fn description(&self) -> &str {
        match self {
            CoordinatorEvent::Dormant => "Legacy host absent, bridge dormant",
            CoordinatorEvent::Activated { .. } => "Legacy host detected, adapters constructed",
            CoordinatorEvent::FirstUpdatePassCompleted { .. } => "First-update pass completed",
        }
    }
}

// ============================================================================
// Adapter Events
// ============================================================================

/// What caused an adapter to publish.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UpdateTrigger {
    FirstUpdate,
    ProviderChange,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum AdapterEvent {
    /// Legacy data for a namespace was (re)published.
    Published {
        namespace: Namespace,
        trigger: UpdateTrigger,
        /// Number of legacy fields in the snapshot.
        fields: usize,
    },
    /// First update ran but the provider had nothing to publish.
    FirstUpdateSkipped { namespace: Namespace },
}

impl AdapterEvent {
    fn description(&self) -> &str {
        match self {
            AdapterEvent::Published { .. } => "Legacy data published",
            AdapterEvent::FirstUpdateSkipped { .. } => "First update found no provider data",
        }
    }
}

// ============================================================================
// Event Bus
// ============================================================================

/// Central broadcast channel for bridge events.
///
/// Cheap to clone; all clones share the same channel.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CoreEvent>,
}

impl EventBus {
    /// Create a bus buffering up to `capacity` events per subscriber.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero (a `tokio::sync::broadcast` requirement).
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to every current subscriber.
    ///
    /// Returns the number of subscribers reached, or an error when there are none.
    pub fn emit(&self, event: CoreEvent) -> Result<usize, SendError<CoreEvent>> {
        self.sender.send(event)
    }

    pub fn subscribe(&self) -> Receiver<CoreEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

// ============================================================================
// Event Stream Wrapper
// ============================================================================

type EventFilter = Box<dyn Fn(&CoreEvent) -> bool + Send + Sync>;

/// Subscriber with an optional predicate applied before events are returned.
pub struct EventStream {
    receiver: Receiver<CoreEvent>,
    filter: Option<EventFilter>,
}

impl EventStream {
    pub fn new(receiver: Receiver<CoreEvent>) -> Self {
        Self {
            receiver,
            filter: None,
        }
    }

    /// Only yield events matching `predicate`.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&CoreEvent) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(predicate));
        self
    }

    /// Next buffered event matching the filter, without waiting.
    ///
    /// Returns `None` once the buffer holds no matching event.
    pub fn try_recv(&mut self) -> Option<Result<CoreEvent, TryRecvError>> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    let Some(filter) = &self.filter else {
                        return Some(Ok(event));
                    };

                    if filter(&event) {
                        return Some(Ok(event));
                    }
                }
                Err(TryRecvError::Empty) => return None,
                Err(err) => return Some(Err(err)),
            }
        }
    }

    /// Drain every buffered matching event.
    pub fn drain(&mut self) -> Vec<CoreEvent> {
        let mut events = Vec::new();
        while let Some(result) = self.try_recv() {
            match result {
                Ok(event) => events.push(event),
                Err(TryRecvError::Lagged(_)) => continue,
                Err(_) => break,
            }
        }
        events
    }
}

impl fmt::Debug for EventStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStream")
            .field("has_filter", &self.filter.is_some())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn published(namespace: Namespace) -> CoreEvent {
        CoreEvent::Adapter(AdapterEvent::Published {
            namespace,
            trigger: UpdateTrigger::ProviderChange,
            fields: 4,
        })
    }

    #[test]
    fn test_event_bus_creation() {
        let bus = EventBus::new(10);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_event_bus_subscription() {
        let bus = EventBus::new(10);
        let _sub1 = bus.subscribe();
        let _sub2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);
    }

    #[test]
    fn test_event_emission_no_subscribers() {
        let bus = EventBus::new(10);
        assert!(bus
            .emit(CoreEvent::Coordinator(CoordinatorEvent::Dormant))
            .is_err());
    }

    #[test]
    fn test_multiple_subscribers_receive_same_event() {
        let bus = EventBus::new(10);
        let mut sub1 = bus.subscribe();
        let mut sub2 = bus.subscribe();

        let event = CoreEvent::Coordinator(CoordinatorEvent::Activated {
            providers: vec![Namespace::Weather, Namespace::Media],
        });

        assert_eq!(bus.emit(event.clone()).unwrap(), 2);
        assert_eq!(sub1.try_recv().unwrap(), event);
        assert_eq!(sub2.try_recv().unwrap(), event);
    }

    #[test]
    fn test_event_stream_with_filter() {
        let bus = EventBus::new(10);
        let mut stream = EventStream::new(bus.subscribe())
            .filter(|event| event.namespace() == Some(Namespace::Battery));

        bus.emit(published(Namespace::Weather)).ok();
        bus.emit(CoreEvent::Coordinator(CoordinatorEvent::Dormant)).ok();
        bus.emit(published(Namespace::Battery)).ok();

        assert_eq!(stream.try_recv().unwrap().unwrap(), published(Namespace::Battery));
        assert!(stream.try_recv().is_none());
    }

    #[test]
    fn test_drain_collects_in_emission_order() {
        let bus = EventBus::new(10);
        let mut stream = EventStream::new(bus.subscribe());

        for namespace in Namespace::ALL {
            bus.emit(published(namespace)).ok();
        }

        let namespaces: Vec<_> = stream
            .drain()
            .iter()
            .filter_map(CoreEvent::namespace)
            .collect();
        assert_eq!(namespaces, Namespace::ALL.to_vec());
    }

    #[test]
    fn test_lagged_subscriber() {
        let bus = EventBus::new(2);
        let mut sub = bus.subscribe();

        for _ in 0..5 {
            bus.emit(published(Namespace::Media)).ok();
        }

        assert!(matches!(sub.try_recv(), Err(TryRecvError::Lagged(_))));
    }

    #[test]
    fn test_event_severity() {
        let activated = CoreEvent::Coordinator(CoordinatorEvent::Activated { providers: vec![] });
        assert_eq!(activated.severity(), EventSeverity::Info);

        let dormant = CoreEvent::Coordinator(CoordinatorEvent::Dormant);
        assert_eq!(dormant.severity(), EventSeverity::Debug);
        assert_eq!(dormant.description(), "Legacy host absent, bridge dormant");

        assert_eq!(published(Namespace::System).severity(), EventSeverity::Debug);
    }

    #[test]
    fn test_event_serialization() {
        let event = CoreEvent::Coordinator(CoordinatorEvent::FirstUpdatePassCompleted {
            order: Namespace::ALL.to_vec(),
        });

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"weather\""));

        let deserialized: CoreEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, event);
    }

    #[test]
    fn test_try_recv_empty() {
        let bus = EventBus::default();
        let mut stream = EventStream::new(bus.subscribe());
        assert!(stream.try_recv().is_none());
    }
}
