//! Battery adapter

use super::{AdapterContext, CompatAdapter, Publisher};
use crate::published::LegacySnapshot;
use bridge_traits::{BatteryData, BatteryProvider, Namespace, Subscription};
use core_runtime::events::UpdateTrigger;
use std::sync::Arc;
use tracing::debug;

pub struct BatteryAdapter {
    provider: Option<Arc<BatteryProvider>>,
    publisher: Publisher,
    _subscription: Option<Subscription>,
}

impl BatteryAdapter {
    pub fn new(context: &AdapterContext) -> Self {
        let publisher = Publisher::new(Namespace::Battery, context);
        let provider = context.providers.battery().cloned();

        let subscription = match &provider {
            Some(provider) => {
                let publisher = publisher.clone();
                Some(provider.observe(Arc::new(move |data: &BatteryData| {
                    publisher.publish(to_legacy(data), UpdateTrigger::ProviderChange);
                })))
            }
            None => {
                debug!("No battery provider registered");
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

impl CompatAdapter for BatteryAdapter {
    fn namespace(&self) -> Namespace {
        Namespace::Battery
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

/// Legacy battery fields.
pub fn to_legacy(data: &BatteryData) -> LegacySnapshot {
    LegacySnapshot::new()
        .with("percent", data.percentage)
        .with("charging", data.state.is_plugged_in())
        .with("state", data.state.as_str())
        .with("lowPowerMode", data.low_power_mode)
}
