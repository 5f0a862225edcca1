//! In-memory data provider
//!
//! Holds the latest snapshot for one namespace and fans every new snapshot
//! out to registered observers. Native data sources (battery daemons, media
//! session listeners) push into it with [`InMemoryProvider::publish`].

use bridge_traits::{
    platform::Observer,
    providers::{DataProvider, Subscription},
};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::debug;

type ObserverList<T> = Arc<Mutex<Vec<(u64, Observer<T>)>>>;

pub struct InMemoryProvider<T> {
    current: RwLock<Option<T>>,
    observers: ObserverList<T>,
    next_id: AtomicU64,
}

impl<T> InMemoryProvider<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a provider with no data yet.
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
            observers: Arc::default(),
            next_id: AtomicU64::new(0),
        }
    }

    /// Create a provider seeded with `data`.
    pub fn with_data(data: T) -> Self {
        Self {
            current: RwLock::new(Some(data)),
            observers: Arc::default(),
            next_id: AtomicU64::new(0),
        }
    }

    /// Replace the current snapshot and notify every observer.
    ///
    /// Observers run on the calling thread, after the snapshot is stored and
    /// without any internal lock held.
    pub fn publish(&self, data: T) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(data.clone());

        let observers = self
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect::<Vec<_>>();

        debug!(observers = observers.len(), "Publishing provider update");
        for observer in observers {
            observer(&data);
        }
    }

    /// Number of observers whose subscription is still alive.
    pub fn observer_count(&self) -> usize {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl<T> Default for InMemoryProvider<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for InMemoryProvider<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let has_data = self
            .current
            .read()
            .map(|current| current.is_some())
            .unwrap_or(false);
        f.debug_struct("InMemoryProvider")
            .field("has_data", &has_data)
            .finish()
    }
}

impl<T> DataProvider for InMemoryProvider<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Data = T;

    fn current(&self) -> Option<T> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn observe(&self, observer: Observer<T>) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, observer));

        let observers = Arc::downgrade(&self.observers);
        Subscription::new(move || {
            if let Some(observers) = observers.upgrade() {
                observers
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .retain(|(registered, _)| *registered != id);
                debug!(id, "Observer unregistered");
            }
        })
    }
}
