//! Driving port for fleet, configuration and history reads.

use async_trait::async_trait;

use crate::domain::{Airplane, AirplaneId, Configuration, Error, FuelCalculationRecord};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FleetQuery: Send + Sync {
    async fn list_airplanes(&self) -> Result<Vec<Airplane>, Error>;

    async fn get_airplane(&self, airplane_id: AirplaneId) -> Result<Airplane, Error>;

    /// The active baseline, when one has been created.
    async fn latest_configuration(&self) -> Result<Option<Configuration>, Error>;

    async fn get_configuration(&self, id: i64) -> Result<Configuration, Error>;

    /// Calculation history, newest first.
    async fn list_records(&self) -> Result<Vec<FuelCalculationRecord>, Error>;

    async fn get_record(&self, id: i64) -> Result<FuelCalculationRecord, Error>;
}

/// Fixture query over an empty fleet.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFleetQuery;

#[async_trait]
impl FleetQuery for FixtureFleetQuery {
    async fn list_airplanes(&self) -> Result<Vec<Airplane>, Error> {
        Ok(Vec::new())
    }

    async fn get_airplane(&self, airplane_id: AirplaneId) -> Result<Airplane, Error> {
        Err(Error::not_found(format!("Airplane {airplane_id} not found")))
    }

    async fn latest_configuration(&self) -> Result<Option<Configuration>, Error> {
        Ok(None)
    }

    async fn get_configuration(&self, id: i64) -> Result<Configuration, Error> {
        Err(Error::not_found(format!("Configuration {id} not found")))
    }

    async fn list_records(&self) -> Result<Vec<FuelCalculationRecord>, Error> {
        Ok(Vec::new())
    }

    async fn get_record(&self, id: i64) -> Result<FuelCalculationRecord, Error> {
        Err(Error::not_found(format!("Calculation result {id} not found")))
    }
}
