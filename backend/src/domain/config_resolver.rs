//! Derivation of the effective configuration for a calculation.

use super::{CalculationError, ConfigOverride, Configuration, FuelConfig};

/// Pick the baseline: the latest stored configuration, or defaults when none
/// has been created yet.
pub fn resolve_baseline(latest: Option<&Configuration>) -> FuelConfig {
    latest.map(|stored| stored.config).unwrap_or_default()
}

/// Merge an optional override onto `baseline`.
///
/// # Examples
/// ```
/// use fuel_tracker::domain::config_resolver::resolve;
/// use fuel_tracker::domain::{ConfigOverride, FuelConfig, TimeUnit};
///
/// let over = ConfigOverride::default().with_time_unit(TimeUnit::Day);
/// let effective = resolve(&FuelConfig::default(), Some(&over));
/// assert_eq!(effective.time_unit, TimeUnit::Day);
/// assert_eq!(effective.log_base, FuelConfig::default().log_base);
/// ```
pub fn resolve(baseline: &FuelConfig, over: Option<&ConfigOverride>) -> FuelConfig {
    let Some(over) = over else {
        return *baseline;
    };
    FuelConfig {
        fuel_capacity_multiplier: over
            .fuel_capacity_multiplier
            .unwrap_or(baseline.fuel_capacity_multiplier),
        log_base: over.log_base.unwrap_or(baseline.log_base),
        passenger_fuel_impact: over
            .passenger_fuel_impact
            .unwrap_or(baseline.passenger_fuel_impact),
        fuel_consumption_coefficient: over
            .fuel_consumption_coefficient
            .unwrap_or(baseline.fuel_consumption_coefficient),
        time_unit: over.time_unit.unwrap_or(baseline.time_unit),
    }
}

/// Reject configurations the calculator cannot work with.
///
/// Enum fields are valid by construction; numeric fields must be finite.
pub fn validate(config: &FuelConfig) -> Result<(), CalculationError> {
    let numeric = [
        ("fuel_capacity_multiplier", config.fuel_capacity_multiplier),
        ("passenger_fuel_impact", config.passenger_fuel_impact),
        (
            "fuel_consumption_coefficient",
            config.fuel_consumption_coefficient,
        ),
    ];
    match numeric.iter().find(|(_, value)| !value.is_finite()) {
        Some((field, _)) => Err(CalculationError::invalid_config(format!(
            "{field} must be a finite number"
        ))),
        None => Ok(()),
    }
}
