//! Provider data shapes
//!
//! Modern data providers publish these strongly-typed snapshots. Adapters in
//! `core-compat` translate them into the flat field sets the legacy host
//! expects.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Weather
// ============================================================================

/// Temperature scale used by a weather snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// Single-letter suffix shown by legacy widgets.
    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
        }
    }

    /// Convert a reading expressed in `self` into `target`.
    pub fn convert(&self, value: f64, target: TemperatureUnit) -> f64 {
        match (self, target) {
            (TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit) => value * 9.0 / 5.0 + 32.0,
            (TemperatureUnit::Fahrenheit, TemperatureUnit::Celsius) => (value - 32.0) * 5.0 / 9.0,
            _ => value,
        }
    }
}

/// One day of forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub low: f64,
    pub high: f64,
    pub condition_code: u32,
}

/// Current conditions plus forecast for the user's location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    pub city: String,
    pub temperature: f64,
    pub low: f64,
    pub high: f64,
    pub feels_like: f64,
    pub unit: TemperatureUnit,
    /// Human-readable condition, e.g. "Partly Cloudy"
    pub condition: String,
    pub condition_code: u32,
    /// Relative humidity, 0-100
    pub humidity: u8,
    /// Wind speed in the provider's native unit
    pub wind_speed: f64,
    pub is_day: bool,
    pub forecast: Vec<DailyForecast>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Battery
// ============================================================================

/// Charging state of the device battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChargingState {
    Unplugged,
    Charging,
    Full,
}

impl ChargingState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChargingState::Unplugged => "unplugged",
            ChargingState::Charging => "charging",
            ChargingState::Full => "full",
        }
    }

    /// Whether the device is connected to external power.
    pub fn is_plugged_in(&self) -> bool {
        !matches!(self, ChargingState::Unplugged)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatteryData {
    /// Charge level, 0-100
    pub percentage: u8,
    pub state: ChargingState,
    pub low_power_mode: bool,
}

// ============================================================================
// System
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemData {
    pub device_name: String,
    pub device_model: String,
    pub system_version: String,
    pub uses_24_hour_clock: bool,
    /// BCP 47 tag, e.g. "en-GB"
    pub locale: String,
}

// ============================================================================
// Media
// ============================================================================

/// Item currently loaded in the system media player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NowPlaying {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub artwork_url: Option<String>,
    pub duration_secs: f64,
    /// Elapsed time at `captured_at`
    pub elapsed_secs: f64,
    pub captured_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaData {
    pub is_playing: bool,
    pub now_playing: Option<NowPlaying>,
    /// Bundle identifier of the app owning the session
    pub source_bundle: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_conversion() {
        let unit = TemperatureUnit::Celsius;
        assert_eq!(unit.convert(100.0, TemperatureUnit::Fahrenheit), 212.0);
        assert_eq!(unit.convert(21.5, TemperatureUnit::Celsius), 21.5);

        let unit = TemperatureUnit::Fahrenheit;
        assert_eq!(unit.convert(32.0, TemperatureUnit::Celsius), 0.0);
        assert_eq!(unit.symbol(), "F");
    }

    #[test]
    fn test_charging_state() {
        assert!(!ChargingState::Unplugged.is_plugged_in());
        assert!(ChargingState::Charging.is_plugged_in());
        assert!(ChargingState::Full.is_plugged_in());
        assert_eq!(ChargingState::Full.as_str(), "full");
    }

    #[test]
    fn test_battery_serde() {
        let data = BatteryData {
            percentage: 42,
            state: ChargingState::Charging,
            low_power_mode: false,
        };

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["state"], "charging");
        assert_eq!(json["percentage"], 42);
    }
}
