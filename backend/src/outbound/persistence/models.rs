//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types re-validate
//! stored values and report corrupt rows as [`RowError`].

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use thiserror::Error;

use crate::domain::{
    Airplane, AirplaneId, CalculationResult, Configuration, FuelCalculationRecord, FuelConfig,
    NewConfiguration, NewFuelCalculationRecord,
};

use super::schema::{airplanes, fuel_calculation_results, fuel_configurations};

/// A stored row that no longer satisfies the domain invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {table} row: {message}")]
pub(crate) struct RowError {
    table: &'static str,
    message: String,
}

impl RowError {
    fn new(table: &'static str, message: impl ToString) -> Self {
        Self {
            table,
            message: message.to_string(),
        }
    }
}

fn to_u32(table: &'static str, column: &str, value: i64) -> Result<u32, RowError> {
    u32::try_from(value)
        .map_err(|_| RowError::new(table, format!("{column} out of range: {value}")))
}

// ---------------------------------------------------------------------------
// Airplanes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = airplanes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AirplaneRow {
    pub airplane_id: i64,
    pub name: String,
    pub max_passengers: i64,
}

impl TryFrom<AirplaneRow> for Airplane {
    type Error = RowError;

    fn try_from(row: AirplaneRow) -> Result<Self, Self::Error> {
        const TABLE: &str = "airplanes";
        let airplane_id = AirplaneId::new(to_u32(TABLE, "airplane_id", row.airplane_id)?)
            .map_err(|err| RowError::new(TABLE, err))?;
        let max_passengers = to_u32(TABLE, "max_passengers", row.max_passengers)?;
        Airplane::new(airplane_id, row.name, max_passengers)
            .map_err(|err| RowError::new(TABLE, err))
    }
}

/// Insertable and changeset form of an airplane.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = airplanes)]
pub(crate) struct AirplaneValues<'a> {
    pub airplane_id: i64,
    pub name: &'a str,
    pub max_passengers: i64,
}

impl<'a> From<&'a Airplane> for AirplaneValues<'a> {
    fn from(airplane: &'a Airplane) -> Self {
        Self {
            airplane_id: i64::from(airplane.airplane_id().get()),
            name: airplane.name(),
            max_passengers: i64::from(airplane.max_passengers()),
        }
    }
}

// ---------------------------------------------------------------------------
// Configurations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = fuel_configurations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ConfigurationRow {
    pub id: i64,
    pub fuel_capacity_multiplier: f64,
    pub log_base: String,
    pub passenger_fuel_impact: f64,
    pub fuel_consumption_coefficient: f64,
    pub time_unit: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ConfigurationRow> for Configuration {
    type Error = RowError;

    fn try_from(row: ConfigurationRow) -> Result<Self, Self::Error> {
        const TABLE: &str = "fuel_configurations";
        Ok(Configuration {
            id: row.id,
            config: FuelConfig {
                fuel_capacity_multiplier: row.fuel_capacity_multiplier,
                log_base: row.log_base.parse().map_err(|err| RowError::new(TABLE, err))?,
                passenger_fuel_impact: row.passenger_fuel_impact,
                fuel_consumption_coefficient: row.fuel_consumption_coefficient,
                time_unit: row
                    .time_unit
                    .parse()
                    .map_err(|err| RowError::new(TABLE, err))?,
            },
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = fuel_configurations)]
pub(crate) struct NewConfigurationRow {
    pub fuel_capacity_multiplier: f64,
    pub log_base: &'static str,
    pub passenger_fuel_impact: f64,
    pub fuel_consumption_coefficient: f64,
    pub time_unit: &'static str,
    pub created_at: DateTime<Utc>,
}

impl From<&NewConfiguration> for NewConfigurationRow {
    fn from(new: &NewConfiguration) -> Self {
        let config = new.config;
        Self {
            fuel_capacity_multiplier: config.fuel_capacity_multiplier,
            log_base: config.log_base.as_str(),
            passenger_fuel_impact: config.passenger_fuel_impact,
            fuel_consumption_coefficient: config.fuel_consumption_coefficient,
            time_unit: config.time_unit.as_str(),
            created_at: new.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Calculation results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = fuel_calculation_results)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CalculationRecordRow {
    pub id: i64,
    pub airplane_id: i64,
    pub passengers: i64,
    pub fuel_capacity: f64,
    pub fuel_consumption_per_minute: f64,
    pub flight_duration: f64,
    pub time_unit: String,
    pub configuration_snapshot: serde_json::Value,
    pub calculated_at: DateTime<Utc>,
}

impl TryFrom<CalculationRecordRow> for FuelCalculationRecord {
    type Error = RowError;

    fn try_from(row: CalculationRecordRow) -> Result<Self, Self::Error> {
        const TABLE: &str = "fuel_calculation_results";
        let airplane_id = AirplaneId::new(to_u32(TABLE, "airplane_id", row.airplane_id)?)
            .map_err(|err| RowError::new(TABLE, err))?;
        let configuration_snapshot: FuelConfig =
            serde_json::from_value(row.configuration_snapshot)
                .map_err(|err| RowError::new(TABLE, err))?;
        Ok(FuelCalculationRecord {
            id: row.id,
            airplane_id,
            passengers: to_u32(TABLE, "passengers", row.passengers)?,
            result: CalculationResult {
                fuel_capacity: row.fuel_capacity,
                fuel_consumption_per_minute: row.fuel_consumption_per_minute,
                flight_duration: row.flight_duration,
                time_unit: row
                    .time_unit
                    .parse()
                    .map_err(|err| RowError::new(TABLE, err))?,
            },
            configuration_snapshot,
            timestamp: row.calculated_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = fuel_calculation_results)]
pub(crate) struct NewCalculationRecordRow {
    pub airplane_id: i64,
    pub passengers: i64,
    pub fuel_capacity: f64,
    pub fuel_consumption_per_minute: f64,
    pub flight_duration: f64,
    pub time_unit: &'static str,
    pub configuration_snapshot: serde_json::Value,
    pub calculated_at: DateTime<Utc>,
}

impl TryFrom<&NewFuelCalculationRecord> for NewCalculationRecordRow {
    type Error = RowError;

    fn try_from(record: &NewFuelCalculationRecord) -> Result<Self, Self::Error> {
        let configuration_snapshot = serde_json::to_value(record.configuration_snapshot)
            .map_err(|err| RowError::new("fuel_calculation_results", err))?;
        Ok(Self {
            airplane_id: i64::from(record.airplane_id.get()),
            passengers: i64::from(record.passengers),
            fuel_capacity: record.result.fuel_capacity,
            fuel_consumption_per_minute: record.result.fuel_consumption_per_minute,
            flight_duration: record.result.flight_duration,
            time_unit: record.result.time_unit.as_str(),
            configuration_snapshot,
            calculated_at: record.timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LogBase, TimeUnit};
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn airplane_row_converts_to_domain() {
        let airplane = Airplane::try_from(AirplaneRow {
            airplane_id: 7,
            name: "Heron".into(),
            max_passengers: 120,
        })
        .expect("valid row");

        assert_eq!(airplane.airplane_id().get(), 7);
        assert_eq!(airplane.max_passengers(), 120);
    }

    #[rstest]
    #[case(0, 10)]
    #[case(-1, 10)]
    #[case(1, 0)]
    #[case(i64::from(u32::MAX) + 1, 10)]
    fn corrupt_airplane_rows_are_rejected(#[case] airplane_id: i64, #[case] max_passengers: i64) {
        let row = AirplaneRow {
            airplane_id,
            name: String::new(),
            max_passengers,
        };
        assert!(Airplane::try_from(row).is_err());
    }

    #[rstest]
    fn configuration_row_parses_enums() {
        let row = ConfigurationRow {
            id: 3,
            fuel_capacity_multiplier: 300.0,
            log_base: "e".into(),
            passenger_fuel_impact: 0.003,
            fuel_consumption_coefficient: 1.0,
            time_unit: "hour".into(),
            created_at: Utc::now(),
        };

        let configuration = Configuration::try_from(row).expect("valid row");

        assert_eq!(configuration.config.log_base, LogBase::Natural);
        assert_eq!(configuration.config.time_unit, TimeUnit::Hour);
    }

    #[rstest]
    fn unknown_log_base_is_a_row_error() {
        let row = ConfigurationRow {
            id: 3,
            fuel_capacity_multiplier: 300.0,
            log_base: "2".into(),
            passenger_fuel_impact: 0.003,
            fuel_consumption_coefficient: 1.0,
            time_unit: "hour".into(),
            created_at: Utc::now(),
        };

        let err = Configuration::try_from(row).expect_err("bad log base");
        assert!(err.to_string().contains("Invalid log base"));
    }

    #[rstest]
    fn record_snapshot_is_stored_as_json() {
        let record = NewFuelCalculationRecord {
            airplane_id: AirplaneId::new(1).expect("valid id"),
            passengers: 50,
            result: CalculationResult {
                fuel_capacity: 200.0,
                fuel_consumption_per_minute: 0.1,
                flight_duration: 2000.0,
                time_unit: TimeUnit::Minute,
            },
            configuration_snapshot: FuelConfig::default(),
            timestamp: Utc::now(),
        };

        let row = NewCalculationRecordRow::try_from(&record).expect("serialisable");

        assert_eq!(row.configuration_snapshot["log_base"], json!("10"));
        assert_eq!(row.configuration_snapshot["time_unit"], json!("minute"));
        assert_eq!(row.time_unit, "minute");
    }
}
