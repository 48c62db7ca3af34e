//! Pure fuel capacity, consumption and duration calculation.
//!
//! ```text
//! capacity     = fuel_capacity_multiplier * airplane_id
//! consumption  = log(airplane_id) * fuel_consumption_coefficient
//!              + passengers * passenger_fuel_impact
//! max_minutes  = capacity / consumption
//! duration     = max_minutes / minutes_per(time_unit)
//! ```
//!
//! Capacity and duration are rounded to two decimal places, consumption to
//! four. Rounding works on the exact binary value and sends ties to the even
//! digit, so `2.675` (stored as `2.67499…`) becomes `2.67` and `0.125` becomes
//! `0.12`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::{AirplaneId, CalculationError, CalculationResult, FuelConfig};

const CAPACITY_PLACES: u32 = 2;
const CONSUMPTION_PLACES: u32 = 4;
const DURATION_PLACES: u32 = 2;

/// From 2^52 upwards every `f64` is a whole number.
const WHOLE_NUMBER_THRESHOLD: f64 = 4_503_599_627_370_496.0;
/// Below this magnitude every supported precision rounds to zero.
const NEGLIGIBLE_THRESHOLD: f64 = 1e-12;

/// Compute the calculation result for one airplane and passenger load.
///
/// # Errors
/// - [`CalculationError::NonPositiveConsumption`] when the consumption rate is
///   zero or negative. Duration is never computed in that case.
/// - [`CalculationError::NonFiniteResult`] when an intermediate value is NaN or
///   infinite.
///
/// # Examples
/// ```
/// use fuel_tracker::domain::fuel_calculator::calculate;
/// use fuel_tracker::domain::{AirplaneId, FuelConfig};
///
/// let id = AirplaneId::new(1).expect("valid id");
/// let result = calculate(id, 50, &FuelConfig::default()).expect("valid calculation");
/// assert_eq!(result.fuel_capacity, 200.0);
/// assert_eq!(result.fuel_consumption_per_minute, 0.1);
/// assert_eq!(result.flight_duration, 2000.0);
/// ```
pub fn calculate(
    airplane_id: AirplaneId,
    passengers: u32,
    config: &FuelConfig,
) -> Result<CalculationResult, CalculationError> {
    let id = f64::from(airplane_id.get());
    let capacity = finite(config.fuel_capacity_multiplier * id)?;

    let log_value = config.log_base.log(id);
    let consumption = finite(
        log_value * config.fuel_consumption_coefficient
            + f64::from(passengers) * config.passenger_fuel_impact,
    )?;
    if consumption <= 0.0 {
        return Err(CalculationError::NonPositiveConsumption);
    }

    let max_minutes = finite(capacity / consumption)?;
    let duration = finite(max_minutes / config.time_unit.minutes_per_unit())?;

    Ok(CalculationResult {
        fuel_capacity: round_to(capacity, CAPACITY_PLACES)?,
        fuel_consumption_per_minute: round_to(consumption, CONSUMPTION_PLACES)?,
        flight_duration: round_to(duration, DURATION_PLACES)?,
        time_unit: config.time_unit,
    })
}

fn finite(value: f64) -> Result<f64, CalculationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalculationError::NonFiniteResult)
    }
}

fn round_to(value: f64, places: u32) -> Result<f64, CalculationError> {
    let value = finite(value)?;
    if value.abs() >= WHOLE_NUMBER_THRESHOLD {
        return Ok(value);
    }
    if value.abs() < NEGLIGIBLE_THRESHOLD {
        return Ok(0.0);
    }
    Decimal::from_f64_retain(value)
        .map(|exact| exact.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven))
        .and_then(|rounded| rounded.to_f64())
        .ok_or(CalculationError::NonFiniteResult)
        .and_then(finite)
}
