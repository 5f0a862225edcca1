//! Published legacy data
//!
//! Adapters write the translated field set for their namespace here before
//! notifying the host. The host (and adapters running later in the
//! first-update pass) read it back by namespace.

use bridge_traits::Namespace;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Flat legacy field set for one namespace.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LegacySnapshot(Map<String, Value>);

impl LegacySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `field`, replacing any previous value.
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.0.insert(field.to_string(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<LegacySnapshot> for Value {
    fn from(snapshot: LegacySnapshot) -> Self {
        Value::Object(snapshot.0)
    }
}

/// Shared store of the latest snapshot per namespace.
///
/// Cheap to clone; clones share the same store.
#[derive(Clone, Default)]
pub struct PublishedData {
    inner: Arc<RwLock<BTreeMap<Namespace, LegacySnapshot>>>,
}

impl PublishedData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot for `namespace`.
    pub fn publish(&self, namespace: Namespace, snapshot: LegacySnapshot) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(namespace, snapshot);
    }

    pub fn get(&self, namespace: Namespace) -> Option<LegacySnapshot> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&namespace)
            .cloned()
    }

    pub fn contains(&self, namespace: Namespace) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&namespace)
    }

    /// Namespaces with published data, in first-update order.
    pub fn namespaces(&self) -> Vec<Namespace> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect()
    }

    /// Every snapshot as one JSON object keyed by namespace identifier.
    pub fn to_json(&self) -> Value {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let object: Map<String, Value> = guard
            .iter()
            .map(|(namespace, snapshot)| (namespace.as_str().to_string(), snapshot.clone().into()))
            .collect();
        Value::Object(object)
    }
}

impl fmt::Debug for PublishedData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublishedData")
            .field("namespaces", &self.namespaces())
            .finish()
    }
}
