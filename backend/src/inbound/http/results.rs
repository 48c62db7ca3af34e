//! Calculation history HTTP handlers.
//!
//! ```text
//! GET /api/results
//! GET /api/results/{id}
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{FuelCalculationRecord, FuelConfig};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

#[derive(Debug, Deserialize)]
pub(super) struct ResultPath {
    id: i64,
}

/// Effective configuration captured with a record.
#[derive(Debug, Serialize, ToSchema)]
pub struct ConfigurationSnapshotResponse {
    pub fuel_capacity_multiplier: f64,
    pub log_base: String,
    pub passenger_fuel_impact: f64,
    pub fuel_consumption_coefficient: f64,
    pub time_unit: String,
}

impl From<FuelConfig> for ConfigurationSnapshotResponse {
    fn from(value: FuelConfig) -> Self {
        Self {
            fuel_capacity_multiplier: value.fuel_capacity_multiplier,
            log_base: value.log_base.to_string(),
            passenger_fuel_impact: value.passenger_fuel_impact,
            fuel_consumption_coefficient: value.fuel_consumption_coefficient,
            time_unit: value.time_unit.to_string(),
        }
    }
}

/// One history entry.
#[derive(Debug, Serialize, ToSchema)]
pub struct CalculationRecordResponse {
    pub id: i64,
    pub airplane_id: u32,
    pub passengers: u32,
    pub fuel_capacity: f64,
    pub fuel_consumption_per_minute: f64,
    pub flight_duration: f64,
    pub time_unit: String,
    pub configuration_snapshot: ConfigurationSnapshotResponse,
    /// RFC 3339 calculation time.
    pub timestamp: String,
}

impl From<FuelCalculationRecord> for CalculationRecordResponse {
    fn from(value: FuelCalculationRecord) -> Self {
        Self {
            id: value.id,
            airplane_id: value.airplane_id.get(),
            passengers: value.passengers,
            fuel_capacity: value.result.fuel_capacity,
            fuel_consumption_per_minute: value.result.fuel_consumption_per_minute,
            flight_duration: value.result.flight_duration,
            time_unit: value.result.time_unit.to_string(),
            configuration_snapshot: value.configuration_snapshot.into(),
            timestamp: value.timestamp.to_rfc3339(),
        }
    }
}

/// List calculation records, newest first.
#[utoipa::path(
    get,
    path = "/api/results",
    responses(
        (status = 200, description = "Calculation history", body = [CalculationRecordResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["results"],
    operation_id = "listResults"
)]
#[get("/results")]
pub async fn list_results(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CalculationRecordResponse>>> {
    let records = state.fleet_query.list_records().await?;
    Ok(web::Json(
        records
            .into_iter()
            .map(CalculationRecordResponse::from)
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/results/{id}",
    params(("id" = i64, Path, description = "Record identifier")),
    responses(
        (status = 200, description = "Calculation record", body = CalculationRecordResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["results"],
    operation_id = "getResult"
)]
#[get("/results/{id}")]
pub async fn get_result(
    state: web::Data<HttpState>,
    path: web::Path<ResultPath>,
) -> ApiResult<web::Json<CalculationRecordResponse>> {
    let record = state.fleet_query.get_record(path.into_inner().id).await?;
    Ok(web::Json(CalculationRecordResponse::from(record)))
}
