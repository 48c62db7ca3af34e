//! Driving port for fleet and configuration mutations.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{Airplane, AirplaneId, AirplaneUpdate, Configuration, Error, FuelConfig};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FleetCommand: Send + Sync {
    /// Register a new airplane. Fails with a conflict when the id is taken.
    async fn create_airplane(&self, airplane: Airplane) -> Result<Airplane, Error>;

    /// Update an airplane's name and/or capacity.
    async fn update_airplane(
        &self,
        airplane_id: AirplaneId,
        update: AirplaneUpdate,
    ) -> Result<Airplane, Error>;

    /// Remove an airplane together with its calculation history.
    async fn delete_airplane(&self, airplane_id: AirplaneId) -> Result<(), Error>;

    /// Store a new baseline configuration.
    async fn create_configuration(&self, config: FuelConfig) -> Result<Configuration, Error>;
}

/// Fixture command that persists nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFleetCommand;

fn missing(airplane_id: AirplaneId) -> Error {
    Error::not_found(format!("Airplane {airplane_id} not found"))
}

#[async_trait]
impl FleetCommand for FixtureFleetCommand {
    async fn create_airplane(&self, airplane: Airplane) -> Result<Airplane, Error> {
        Ok(airplane)
    }

    async fn update_airplane(
        &self,
        airplane_id: AirplaneId,
        _update: AirplaneUpdate,
    ) -> Result<Airplane, Error> {
        Err(missing(airplane_id))
    }

    async fn delete_airplane(&self, airplane_id: AirplaneId) -> Result<(), Error> {
        Err(missing(airplane_id))
    }

    async fn create_configuration(&self, config: FuelConfig) -> Result<Configuration, Error> {
        Ok(Configuration {
            id: 1,
            config,
            created_at: Utc::now(),
        })
    }
}
