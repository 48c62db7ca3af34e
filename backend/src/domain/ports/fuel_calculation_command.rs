//! Driving port for running a fuel calculation.

use async_trait::async_trait;

use crate::domain::config_resolver::{resolve, validate};
use crate::domain::fuel_calculator::calculate;
use crate::domain::{AirplaneId, CalculationResult, ConfigOverride, Error, FuelConfig};

/// Input for one calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelCalculationRequest {
    pub airplane_id: AirplaneId,
    pub passengers: u32,
    pub config_override: Option<ConfigOverride>,
}

/// Domain use-case port for fuel calculations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FuelCalculationCommand: Send + Sync {
    /// Compute (or fetch from cache) the result for `request`.
    async fn calculate(&self, request: FuelCalculationRequest)
    -> Result<CalculationResult, Error>;
}

/// Fixture command computing against default configuration with no fleet,
/// cache or history.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFuelCalculationCommand;

#[async_trait]
impl FuelCalculationCommand for FixtureFuelCalculationCommand {
    async fn calculate(
        &self,
        request: FuelCalculationRequest,
    ) -> Result<CalculationResult, Error> {
        let config = resolve(&FuelConfig::default(), request.config_override.as_ref());
        validate(&config)?;
        Ok(calculate(request.airplane_id, request.passengers, &config)?)
    }
}
