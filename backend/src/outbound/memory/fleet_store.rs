//! Mutex-guarded store implementing every repository port.
//!
//! Mirrors the PostgreSQL semantics the services rely on: unique airplane
//! ids, newest configuration wins (ties broken by id), records listed newest
//! first, and airplane deletion cascading to its records.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    AirplaneRepository, AirplaneRepositoryError, CalculationRecordRepository,
    CalculationRecordRepositoryError, ConfigurationRepository, ConfigurationRepositoryError,
};
use crate::domain::{
    Airplane, AirplaneId, Configuration, FuelCalculationRecord, NewConfiguration,
    NewFuelCalculationRecord,
};

#[derive(Default)]
struct State {
    airplanes: BTreeMap<AirplaneId, Airplane>,
    configurations: Vec<Configuration>,
    records: Vec<FuelCalculationRecord>,
    next_configuration_id: i64,
    next_record_id: i64,
}

/// Shared in-memory backing for the airplane, configuration and record ports.
#[derive(Default)]
pub struct InMemoryFleetStore {
    state: Mutex<State>,
}

const POISONED: &str = "in-memory store lock poisoned";

impl InMemoryFleetStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, ()> {
        self.state.lock().map_err(|_| ())
    }
}

#[async_trait]
impl AirplaneRepository for InMemoryFleetStore {
    async fn list(&self) -> Result<Vec<Airplane>, AirplaneRepositoryError> {
        let state = self
            .lock()
            .map_err(|()| AirplaneRepositoryError::connection(POISONED))?;
        Ok(state.airplanes.values().cloned().collect())
    }

    async fn find_by_airplane_id(
        &self,
        airplane_id: AirplaneId,
    ) -> Result<Option<Airplane>, AirplaneRepositoryError> {
        let state = self
            .lock()
            .map_err(|()| AirplaneRepositoryError::connection(POISONED))?;
        Ok(state.airplanes.get(&airplane_id).cloned())
    }

    async fn create(&self, airplane: &Airplane) -> Result<(), AirplaneRepositoryError> {
        let mut state = self
            .lock()
            .map_err(|()| AirplaneRepositoryError::connection(POISONED))?;
        let airplane_id = airplane.airplane_id();
        if state.airplanes.contains_key(&airplane_id) {
            return Err(AirplaneRepositoryError::duplicate(airplane_id.get()));
        }
        state.airplanes.insert(airplane_id, airplane.clone());
        Ok(())
    }

    async fn update(&self, airplane: &Airplane) -> Result<bool, AirplaneRepositoryError> {
        let mut state = self
            .lock()
            .map_err(|()| AirplaneRepositoryError::connection(POISONED))?;
        match state.airplanes.get_mut(&airplane.airplane_id()) {
            Some(stored) => {
                *stored = airplane.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, airplane_id: AirplaneId) -> Result<bool, AirplaneRepositoryError> {
        let mut state = self
            .lock()
            .map_err(|()| AirplaneRepositoryError::connection(POISONED))?;
        if state.airplanes.remove(&airplane_id).is_none() {
            return Ok(false);
        }
        state
            .records
            .retain(|record| record.airplane_id != airplane_id);
        Ok(true)
    }
}

#[async_trait]
impl ConfigurationRepository for InMemoryFleetStore {
    async fn latest(&self) -> Result<Option<Configuration>, ConfigurationRepositoryError> {
        let state = self
            .lock()
            .map_err(|()| ConfigurationRepositoryError::connection(POISONED))?;
        Ok(state
            .configurations
            .iter()
            .max_by_key(|stored| (stored.created_at, stored.id))
            .cloned())
    }

    async fn find_by_id(
        &self,
        id: i64,
    ) -> Result<Option<Configuration>, ConfigurationRepositoryError> {
        let state = self
            .lock()
            .map_err(|()| ConfigurationRepositoryError::connection(POISONED))?;
        Ok(state
            .configurations
            .iter()
            .find(|stored| stored.id == id)
            .cloned())
    }

    async fn create(
        &self,
        configuration: &NewConfiguration,
    ) -> Result<Configuration, ConfigurationRepositoryError> {
        let mut state = self
            .lock()
            .map_err(|()| ConfigurationRepositoryError::connection(POISONED))?;
        state.next_configuration_id += 1;
        let stored = Configuration {
            id: state.next_configuration_id,
            config: configuration.config,
            created_at: configuration.created_at,
        };
        state.configurations.push(stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl CalculationRecordRepository for InMemoryFleetStore {
    async fn create(
        &self,
        record: &NewFuelCalculationRecord,
    ) -> Result<i64, CalculationRecordRepositoryError> {
        let mut state = self
            .lock()
            .map_err(|()| CalculationRecordRepositoryError::connection(POISONED))?;
        if !state.airplanes.contains_key(&record.airplane_id) {
            return Err(CalculationRecordRepositoryError::query(format!(
                "airplane {} does not exist",
                record.airplane_id
            )));
        }
        state.next_record_id += 1;
        let id = state.next_record_id;
        state.records.push(FuelCalculationRecord {
            id,
            airplane_id: record.airplane_id,
            passengers: record.passengers,
            result: record.result,
            configuration_snapshot: record.configuration_snapshot,
            timestamp: record.timestamp,
        });
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<FuelCalculationRecord>, CalculationRecordRepositoryError> {
        let state = self
            .lock()
            .map_err(|()| CalculationRecordRepositoryError::connection(POISONED))?;
        let mut records = state.records.clone();
        records.sort_by(|a, b| (b.timestamp, b.id).cmp(&(a.timestamp, a.id)));
        Ok(records)
    }

    async fn find_by_id(
        &self,
        id: i64,
    ) -> Result<Option<FuelCalculationRecord>, CalculationRecordRepositoryError> {
        let state = self
            .lock()
            .map_err(|()| CalculationRecordRepositoryError::connection(POISONED))?;
        Ok(state.records.iter().find(|record| record.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CalculationResult, FuelConfig, TimeUnit};
    use chrono::{DateTime, TimeZone, Utc};
    use rstest::{fixture, rstest};

    fn id(value: u32) -> AirplaneId {
        AirplaneId::new(value).expect("valid id")
    }

    fn at(second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, second)
            .single()
            .expect("valid timestamp")
    }

    fn record(airplane: u32, second: u32) -> NewFuelCalculationRecord {
        NewFuelCalculationRecord {
            airplane_id: id(airplane),
            passengers: 10,
            result: CalculationResult {
                fuel_capacity: 1.0,
                fuel_consumption_per_minute: 1.0,
                flight_duration: 1.0,
                time_unit: TimeUnit::Minute,
            },
            configuration_snapshot: FuelConfig::default(),
            timestamp: at(second),
        }
    }

    #[fixture]
    fn store() -> InMemoryFleetStore {
        InMemoryFleetStore::new()
    }

    async fn add_airplane(store: &InMemoryFleetStore, value: u32) {
        let airplane = Airplane::new(id(value), "Plane", 100).expect("valid airplane");
        AirplaneRepository::create(store, &airplane)
            .await
            .expect("airplane stored");
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_airplane_is_rejected(store: InMemoryFleetStore) {
        add_airplane(&store, 1).await;
        let airplane = Airplane::new(id(1), "Again", 5).expect("valid airplane");

        let err = AirplaneRepository::create(&store, &airplane)
            .await
            .expect_err("duplicate");

        assert_eq!(err, AirplaneRepositoryError::duplicate(1_u32));
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_an_airplane_cascades_to_records(store: InMemoryFleetStore) {
        add_airplane(&store, 1).await;
        add_airplane(&store, 2).await;
        CalculationRecordRepository::create(&store, &record(1, 0))
            .await
            .expect("record");
        let kept = CalculationRecordRepository::create(&store, &record(2, 1))
            .await
            .expect("record");

        assert!(AirplaneRepository::delete(&store, id(1)).await.expect("delete"));

        let remaining = CalculationRecordRepository::list(&store).await.expect("list");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, kept);
    }

    #[rstest]
    #[tokio::test]
    async fn records_are_listed_newest_first(store: InMemoryFleetStore) {
        add_airplane(&store, 1).await;
        for second in [5, 1, 9] {
            CalculationRecordRepository::create(&store, &record(1, second))
                .await
                .expect("record");
        }

        let listed = CalculationRecordRepository::list(&store).await.expect("list");
        let seconds: Vec<_> = listed.iter().map(|r| r.timestamp).collect();

        assert_eq!(seconds, vec![at(9), at(5), at(1)]);
    }

    #[rstest]
    #[tokio::test]
    async fn latest_configuration_breaks_ties_by_id(store: InMemoryFleetStore) {
        for multiplier in [100.0, 300.0] {
            ConfigurationRepository::create(
                &store,
                &NewConfiguration {
                    config: FuelConfig {
                        fuel_capacity_multiplier: multiplier,
                        ..FuelConfig::default()
                    },
                    created_at: at(0),
                },
            )
            .await
            .expect("configuration");
        }

        let latest = store.latest().await.expect("latest").expect("present");

        assert_eq!(latest.id, 2);
        assert_eq!(latest.config.fuel_capacity_multiplier, 300.0);
    }
}
