//! Calculation outputs, history records and the calculation error taxonomy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use super::{
    AirplaneId, Error, FuelConfig, ParseLogBaseError, ParseTimeUnitError, TimeUnit,
};

/// Output of one fuel calculation.
///
/// Stored verbatim in the cache, so the serialised form is also the cached
/// representation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub fuel_capacity: f64,
    pub fuel_consumption_per_minute: f64,
    pub flight_duration: f64,
    pub time_unit: TimeUnit,
}

/// Values persisted for a fresh calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFuelCalculationRecord {
    pub airplane_id: AirplaneId,
    pub passengers: u32,
    pub result: CalculationResult,
    pub configuration_snapshot: FuelConfig,
    pub timestamp: DateTime<Utc>,
}

/// Append-only history entry describing one fresh calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuelCalculationRecord {
    pub id: i64,
    pub airplane_id: AirplaneId,
    pub passengers: u32,
    #[serde(flatten)]
    pub result: CalculationResult,
    pub configuration_snapshot: FuelConfig,
    pub timestamp: DateTime<Utc>,
}

/// User-facing failures of the calculation pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculationError {
    /// More passengers than the airplane can carry.
    #[error("Exceeds max passengers ({max_passengers})")]
    ExceedsCapacity { max_passengers: u32 },
    /// The effective configuration, or an override, is malformed.
    #[error("{message}")]
    InvalidConfig { message: String },
    /// The consumption rate came out zero or negative.
    #[error("Fuel consumption must be positive")]
    NonPositiveConsumption,
    /// The requested airplane does not exist.
    #[error("Airplane {airplane_id} not found")]
    NotFound { airplane_id: AirplaneId },
    /// An intermediate value overflowed or became NaN.
    #[error("Calculation produced a non-finite value")]
    NonFiniteResult,
}

impl CalculationError {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::ExceedsCapacity { .. } => "exceeds_capacity",
            Self::InvalidConfig { .. } => "invalid_config",
            Self::NonPositiveConsumption => "non_positive_consumption",
            Self::NotFound { .. } => "airplane_not_found",
            Self::NonFiniteResult => "non_finite_result",
        }
    }
}

impl From<ParseLogBaseError> for CalculationError {
    fn from(err: ParseLogBaseError) -> Self {
        Self::invalid_config(err.to_string())
    }
}

impl From<ParseTimeUnitError> for CalculationError {
    fn from(err: ParseTimeUnitError) -> Self {
        Self::invalid_config(err.to_string())
    }
}

impl From<CalculationError> for Error {
    fn from(err: CalculationError) -> Self {
        let reason = err.code();
        match &err {
            CalculationError::NotFound { airplane_id } => Error::not_found(err.to_string())
                .with_details(json!({ "airplaneId": airplane_id.get(), "code": reason })),
            _ => Error::invalid_request(err.to_string()).with_details(json!({ "code": reason })),
        }
    }
}
