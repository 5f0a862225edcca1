//! System adapter

use super::{AdapterContext, CompatAdapter, Publisher};
use crate::published::LegacySnapshot;
use bridge_traits::{Namespace, Subscription, SystemData, SystemProvider};
use core_runtime::events::UpdateTrigger;
use std::sync::Arc;
use tracing::debug;

pub struct SystemAdapter {
    provider: Option<Arc<SystemProvider>>,
    publisher: Publisher,
    _subscription: Option<Subscription>,
}

impl SystemAdapter {
    pub fn new(context: &AdapterContext) -> Self {
        let publisher = Publisher::new(Namespace::System, context);
        let provider = context.providers.system().cloned();

        let subscription = match &provider {
            Some(provider) => {
                let publisher = publisher.clone();
                Some(provider.observe(Arc::new(move |data: &SystemData| {
                    publisher.publish(to_legacy(data), UpdateTrigger::ProviderChange);
                })))
            }
            None => {
                debug!("No system provider registered");
                None
            }
        };

        Self {
            provider,
            publisher,
            _subscription: subscription,
        }
    }
}

impl CompatAdapter for SystemAdapter {
    fn namespace(&self) -> Namespace {
        Namespace::System
    }

    fn on_first_update(&self) {
        match self.provider.as_ref().and_then(|provider| provider.current()) {
            Some(data) => self
                .publisher
                .publish(to_legacy(&data), UpdateTrigger::FirstUpdate),
            None => self.publisher.skip_first_update(),
        }
    }
}

pub fn to_legacy(data: &SystemData) -> LegacySnapshot {
    LegacySnapshot::new()
        .with("deviceName", data.device_name.as_str())
        .with("deviceModel", data.device_model.as_str())
        .with("systemVersion", data.system_version.as_str())
        .with("twentyFourHour", data.uses_24_hour_clock)
        .with("locale", data.locale.as_str())
}
