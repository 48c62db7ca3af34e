//! Fuel calculation configuration values.
//!
//! A [`Configuration`] is an immutable, persisted set of tuning parameters.
//! The most recently created one acts as the baseline for calculations; a
//! request may layer a [`ConfigOverride`] on top of it to produce the
//! effective [`FuelConfig`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::CalculationError;

/// Logarithm base applied to the airplane identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogBase {
    /// Base-10 logarithm.
    #[serde(rename = "10")]
    Ten,
    /// Natural logarithm.
    #[serde(rename = "e")]
    Natural,
}

impl LogBase {
    /// Stable wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ten => "10",
            Self::Natural => "e",
        }
    }

    /// Apply the logarithm to `value`.
    pub fn log(self, value: f64) -> f64 {
        match self {
            Self::Ten => value.log10(),
            Self::Natural => value.ln(),
        }
    }
}

impl fmt::Display for LogBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a log base string is neither `"10"` nor `"e"`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid log base")]
pub struct ParseLogBaseError;

impl FromStr for LogBase {
    type Err = ParseLogBaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "10" => Ok(Self::Ten),
            "e" => Ok(Self::Natural),
            _ => Err(ParseLogBaseError),
        }
    }
}

/// Unit in which flight duration is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Minute,
    Hour,
    Day,
}

impl TimeUnit {
    /// Stable wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
        }
    }

    /// Number of minutes in one unit.
    pub fn minutes_per_unit(self) -> f64 {
        match self {
            Self::Minute => 1.0,
            Self::Hour => 60.0,
            Self::Day => 1440.0,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a time unit string is not `minute`, `hour` or `day`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid time unit")]
pub struct ParseTimeUnitError;

impl FromStr for TimeUnit {
    type Err = ParseTimeUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minute" => Ok(Self::Minute),
            "hour" => Ok(Self::Hour),
            "day" => Ok(Self::Day),
            _ => Err(ParseTimeUnitError),
        }
    }
}

/// The five tuning parameters consumed by the calculator.
///
/// Used both for stored baselines and for the effective configuration of a
/// single calculation (which is also the snapshot persisted with a record).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelConfig {
    pub fuel_capacity_multiplier: f64,
    pub log_base: LogBase,
    pub passenger_fuel_impact: f64,
    pub fuel_consumption_coefficient: f64,
    pub time_unit: TimeUnit,
}

impl Default for FuelConfig {
    fn default() -> Self {
        Self {
            fuel_capacity_multiplier: 200.0,
            log_base: LogBase::Ten,
            passenger_fuel_impact: 0.002,
            fuel_consumption_coefficient: 0.80,
            time_unit: TimeUnit::Minute,
        }
    }
}

/// A persisted configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Configuration {
    pub id: i64,
    #[serde(flatten)]
    pub config: FuelConfig,
    pub created_at: DateTime<Utc>,
}

/// Values required to persist a new configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct NewConfiguration {
    pub config: FuelConfig,
    pub created_at: DateTime<Utc>,
}

/// Request-level subset of configuration fields.
///
/// Every present field replaces the baseline value; absent fields keep it.
///
/// # Examples
/// ```
/// use fuel_tracker::domain::{ConfigOverride, TimeUnit};
///
/// let over = ConfigOverride::default()
///     .with_fuel_capacity_multiplier(300.0)
///     .with_time_unit(TimeUnit::Hour);
/// assert_eq!(over.fuel_capacity_multiplier, Some(300.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConfigOverride {
    pub fuel_capacity_multiplier: Option<f64>,
    pub log_base: Option<LogBase>,
    pub passenger_fuel_impact: Option<f64>,
    pub fuel_consumption_coefficient: Option<f64>,
    pub time_unit: Option<TimeUnit>,
}

const FUEL_CAPACITY_MULTIPLIER: &str = "fuel_capacity_multiplier";
const LOG_BASE: &str = "log_base";
const PASSENGER_FUEL_IMPACT: &str = "passenger_fuel_impact";
const FUEL_CONSUMPTION_COEFFICIENT: &str = "fuel_consumption_coefficient";
const TIME_UNIT: &str = "time_unit";

impl ConfigOverride {
    #[must_use]
    pub fn with_fuel_capacity_multiplier(mut self, value: f64) -> Self {
        self.fuel_capacity_multiplier = Some(value);
        self
    }

    #[must_use]
    pub fn with_log_base(mut self, value: LogBase) -> Self {
        self.log_base = Some(value);
        self
    }

    #[must_use]
    pub fn with_passenger_fuel_impact(mut self, value: f64) -> Self {
        self.passenger_fuel_impact = Some(value);
        self
    }

    #[must_use]
    pub fn with_fuel_consumption_coefficient(mut self, value: f64) -> Self {
        self.fuel_consumption_coefficient = Some(value);
        self
    }

    #[must_use]
    pub fn with_time_unit(mut self, value: TimeUnit) -> Self {
        self.time_unit = Some(value);
        self
    }

    /// Parse an override from a raw JSON object.
    ///
    /// Keys outside the five configuration fields, values of the wrong JSON
    /// type and unknown enum values all fail with
    /// [`CalculationError::InvalidConfig`].
    ///
    /// # Examples
    /// ```
    /// use fuel_tracker::domain::{ConfigOverride, LogBase};
    /// use serde_json::json;
    ///
    /// let over = ConfigOverride::from_json(&json!({"log_base": "e"})).expect("valid override");
    /// assert_eq!(over.log_base, Some(LogBase::Natural));
    ///
    /// assert!(ConfigOverride::from_json(&json!({"log_base": "2"})).is_err());
    /// ```
    pub fn from_json(value: &Value) -> Result<Self, CalculationError> {
        let Value::Object(map) = value else {
            return Err(CalculationError::invalid_config(
                "Configuration override must be a JSON object",
            ));
        };
        Self::from_map(map)
    }

    fn from_map(map: &Map<String, Value>) -> Result<Self, CalculationError> {
        let mut parsed = Self::default();
        for (key, value) in map {
            match key.as_str() {
                FUEL_CAPACITY_MULTIPLIER => {
                    parsed.fuel_capacity_multiplier = Some(number_field(key, value)?);
                }
                LOG_BASE => parsed.log_base = Some(text_field(key, value)?.parse()?),
                PASSENGER_FUEL_IMPACT => {
                    parsed.passenger_fuel_impact = Some(number_field(key, value)?);
                }
                FUEL_CONSUMPTION_COEFFICIENT => {
                    parsed.fuel_consumption_coefficient = Some(number_field(key, value)?);
                }
                TIME_UNIT => parsed.time_unit = Some(text_field(key, value)?.parse()?),
                other => {
                    return Err(CalculationError::invalid_config(format!(
                        "Unknown configuration field: {other}"
                    )));
                }
            }
        }
        Ok(parsed)
    }
}

fn number_field(key: &str, value: &Value) -> Result<f64, CalculationError> {
    value
        .as_f64()
        .ok_or_else(|| CalculationError::invalid_config(format!("{key} must be a number")))
}

fn text_field<'a>(key: &str, value: &'a Value) -> Result<&'a str, CalculationError> {
    value
        .as_str()
        .ok_or_else(|| CalculationError::invalid_config(format!("{key} must be a string")))
}
