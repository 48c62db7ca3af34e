//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod airplane_repository;
mod calculation_cache;
mod calculation_record_repository;
mod configuration_repository;
mod fleet_command;
mod fleet_query;
mod fuel_calculation_command;

#[cfg(test)]
pub use airplane_repository::MockAirplaneRepository;
pub use airplane_repository::{AirplaneRepository, AirplaneRepositoryError};
#[cfg(test)]
pub use calculation_cache::MockCalculationCache;
pub use calculation_cache::{CalculationCache, CalculationCacheError, FixtureCalculationCache};
#[cfg(test)]
pub use calculation_record_repository::MockCalculationRecordRepository;
pub use calculation_record_repository::{
    CalculationRecordRepository, CalculationRecordRepositoryError,
};
#[cfg(test)]
pub use configuration_repository::MockConfigurationRepository;
pub use configuration_repository::{ConfigurationRepository, ConfigurationRepositoryError};
#[cfg(test)]
pub use fleet_command::MockFleetCommand;
pub use fleet_command::{FixtureFleetCommand, FleetCommand};
#[cfg(test)]
pub use fleet_query::MockFleetQuery;
pub use fleet_query::{FixtureFleetQuery, FleetQuery};
#[cfg(test)]
pub use fuel_calculation_command::MockFuelCalculationCommand;
pub use fuel_calculation_command::{
    FixtureFuelCalculationCommand, FuelCalculationCommand, FuelCalculationRequest,
};
