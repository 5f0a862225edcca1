//! Weather adapter
//!
//! Legacy widgets expect whole-degree temperatures in a single unit and a
//! bounded daily forecast. Both are controlled by [`LegacyFormat`].

use super::{AdapterContext, CompatAdapter, Publisher};
use crate::published::LegacySnapshot;
use bridge_traits::{Namespace, Subscription, WeatherData, WeatherProvider};
use core_runtime::config::LegacyFormat;
use core_runtime::events::UpdateTrigger;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

pub struct WeatherAdapter {
    provider: Option<Arc<WeatherProvider>>,
    format: LegacyFormat,
    publisher: Publisher,
    _subscription: Option<Subscription>,
}

impl WeatherAdapter {
    pub fn new(context: &AdapterContext) -> Self {
        let publisher = Publisher::new(Namespace::Weather, context);
        let provider = context.providers.weather().cloned();
        let format = context.format;

        let subscription = match &provider {
            Some(provider) => {
                let publisher = publisher.clone();
                Some(provider.observe(Arc::new(move |data: &WeatherData| {
                    publisher.publish(to_legacy(data, &format), UpdateTrigger::ProviderChange);
                })))
            }
            None => {
                debug!("No weather provider registered");
                None
            }
        };

        Self {
            provider,
            format,
            publisher,
            _subscription: subscription,
        }
    }
}

impl CompatAdapter for WeatherAdapter {
    fn namespace(&self) -> Namespace {
        Namespace::Weather
    }

    fn on_first_update(&self) {
        match self.provider.as_ref().and_then(|provider| provider.current()) {
            Some(data) => self
                .publisher
                .publish(to_legacy(&data, &self.format), UpdateTrigger::FirstUpdate),
            None => self.publisher.skip_first_update(),
        }
    }
}

/// Legacy weather fields, converted and trimmed per `format`.
pub fn to_legacy(data: &WeatherData, format: &LegacyFormat) -> LegacySnapshot {
    let unit = format.temperature_unit.unwrap_or(data.unit);
    let degrees = |value: f64| data.unit.convert(value, unit).round() as i64;

    let forecast: Vec<Value> = data
        .forecast
        .iter()
        .take(format.forecast_days)
        .map(|day| {
            json!({
                "date": day.date.format("%Y-%m-%d").to_string(),
                "low": degrees(day.low),
                "high": degrees(day.high),
                "conditionCode": day.condition_code,
            })
        })
        .collect();

    LegacySnapshot::new()
        .with("city", data.city.as_str())
        .with("temperature", degrees(data.temperature))
        .with("low", degrees(data.low))
        .with("high", degrees(data.high))
        .with("feelsLike", degrees(data.feels_like))
        .with("unit", unit.symbol())
        .with("condition", data.condition.as_str())
        .with("conditionCode", data.condition_code)
        .with("humidity", data.humidity)
        .with("windSpeed", data.wind_speed)
        .with("isDay", data.is_day)
        .with("forecast", forecast)
        .with("updatedAt", data.updated_at.to_rfc3339())
}
