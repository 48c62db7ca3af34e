//! Fleet, baseline configuration and history service.
//!
//! Implements both [`FleetCommand`] and [`FleetQuery`] over the repository
//! ports.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use super::config_resolver::validate;
use super::port_errors::{map_airplane_error, map_configuration_error, map_record_error};
use super::ports::{
    AirplaneRepository, CalculationRecordRepository, ConfigurationRepository, FleetCommand,
    FleetQuery,
};
use super::{
    Airplane, AirplaneId, AirplaneUpdate, Configuration, Error, FuelCalculationRecord,
    FuelConfig, NewConfiguration,
};

/// Service backing the fleet management and history endpoints.
#[derive(Clone)]
pub struct FleetService<A, C, R> {
    airplanes: Arc<A>,
    configurations: Arc<C>,
    records: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<A, C, R> FleetService<A, C, R> {
    pub fn new(
        airplanes: Arc<A>,
        configurations: Arc<C>,
        records: Arc<R>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            airplanes,
            configurations,
            records,
            clock,
        }
    }
}

fn airplane_not_found(airplane_id: AirplaneId) -> Error {
    Error::not_found(format!("Airplane {airplane_id} not found"))
        .with_details(json!({ "airplaneId": airplane_id.get() }))
}

#[async_trait]
impl<A, C, R> FleetCommand for FleetService<A, C, R>
where
    A: AirplaneRepository,
    C: ConfigurationRepository,
    R: CalculationRecordRepository,
{
    async fn create_airplane(&self, airplane: Airplane) -> Result<Airplane, Error> {
        self.airplanes
            .create(&airplane)
            .await
            .map_err(map_airplane_error)?;
        info!(airplane_id = airplane.airplane_id().get(), "airplane created");
        Ok(airplane)
    }

    async fn update_airplane(
        &self,
        airplane_id: AirplaneId,
        update: AirplaneUpdate,
    ) -> Result<Airplane, Error> {
        let current = self
            .airplanes
            .find_by_airplane_id(airplane_id)
            .await
            .map_err(map_airplane_error)?
            .ok_or_else(|| airplane_not_found(airplane_id))?;
        let updated = current.apply(update).map_err(Error::from)?;
        let matched = self
            .airplanes
            .update(&updated)
            .await
            .map_err(map_airplane_error)?;
        if !matched {
            return Err(airplane_not_found(airplane_id));
        }
        info!(airplane_id = airplane_id.get(), "airplane updated");
        Ok(updated)
    }

    async fn delete_airplane(&self, airplane_id: AirplaneId) -> Result<(), Error> {
        let deleted = self
            .airplanes
            .delete(airplane_id)
            .await
            .map_err(map_airplane_error)?;
        if !deleted {
            return Err(airplane_not_found(airplane_id));
        }
        info!(airplane_id = airplane_id.get(), "airplane deleted");
        Ok(())
    }

    async fn create_configuration(&self, config: FuelConfig) -> Result<Configuration, Error> {
        validate(&config)?;
        let stored = self
            .configurations
            .create(&NewConfiguration {
                config,
                created_at: self.clock.utc(),
            })
            .await
            .map_err(map_configuration_error)?;
        info!(configuration_id = stored.id, "baseline configuration created");
        Ok(stored)
    }
}

#[async_trait]
impl<A, C, R> FleetQuery for FleetService<A, C, R>
where
    A: AirplaneRepository,
    C: ConfigurationRepository,
    R: CalculationRecordRepository,
{
    async fn list_airplanes(&self) -> Result<Vec<Airplane>, Error> {
        self.airplanes.list().await.map_err(map_airplane_error)
    }

    async fn get_airplane(&self, airplane_id: AirplaneId) -> Result<Airplane, Error> {
        self.airplanes
            .find_by_airplane_id(airplane_id)
            .await
            .map_err(map_airplane_error)?
            .ok_or_else(|| airplane_not_found(airplane_id))
    }

    async fn latest_configuration(&self) -> Result<Option<Configuration>, Error> {
        self.configurations
            .latest()
            .await
            .map_err(map_configuration_error)
    }

    async fn get_configuration(&self, id: i64) -> Result<Configuration, Error> {
        self.configurations
            .find_by_id(id)
            .await
            .map_err(map_configuration_error)?
            .ok_or_else(|| Error::not_found(format!("Configuration {id} not found")))
    }

    async fn list_records(&self) -> Result<Vec<FuelCalculationRecord>, Error> {
        self.records.list().await.map_err(map_record_error)
    }

    async fn get_record(&self, id: i64) -> Result<FuelCalculationRecord, Error> {
        self.records
            .find_by_id(id)
            .await
            .map_err(map_record_error)?
            .ok_or_else(|| Error::not_found(format!("Calculation result {id} not found")))
    }
}
