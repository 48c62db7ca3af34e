//! Airplane HTTP handlers, including the fuel calculation endpoint.
//!
//! ```text
//! GET    /api/airplanes
//! POST   /api/airplanes
//! GET    /api/airplanes/{airplane_id}
//! PUT    /api/airplanes/{airplane_id}
//! PATCH  /api/airplanes/{airplane_id}
//! DELETE /api/airplanes/{airplane_id}
//! POST   /api/airplanes/{airplane_id}/calculate_fuel
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::ports::FuelCalculationRequest;
use crate::domain::{
    Airplane, AirplaneId, AirplaneUpdate, CalculationResult, ConfigOverride, Error,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ConfigOverrideSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    AIRPLANE_ID, MAX_PASSENGERS, PASSENGERS, ensure_matching_airplane_id, parse_u32,
    path_airplane_id, require_u32,
};

#[derive(Debug, Deserialize)]
pub(super) struct AirplanePath {
    airplane_id: u32,
}

impl AirplanePath {
    fn resolve(self) -> Result<AirplaneId, Error> {
        path_airplane_id(self.airplane_id)
    }
}

/// Request payload for creating or updating an airplane.
///
/// Integer fields are accepted as `i64` so that negative or oversized values
/// surface as validation errors rather than opaque JSON failures.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct AirplaneRequest {
    #[schema(example = 1)]
    pub airplane_id: Option<i64>,
    #[schema(example = "Skylark")]
    pub name: Option<String>,
    #[schema(example = 150)]
    pub max_passengers: Option<i64>,
}

/// Airplane representation returned to clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct AirplaneResponse {
    pub airplane_id: u32,
    pub name: String,
    pub max_passengers: u32,
}

impl From<Airplane> for AirplaneResponse {
    fn from(value: Airplane) -> Self {
        Self {
            airplane_id: value.airplane_id().get(),
            name: value.name().to_owned(),
            max_passengers: value.max_passengers(),
        }
    }
}

/// Request payload for a fuel calculation.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct FuelCalculationBody {
    #[schema(example = 50)]
    pub passengers: Option<i64>,
    /// Optional subset of configuration fields applied over the baseline.
    #[schema(value_type = Option<ConfigOverrideSchema>)]
    pub config_override: Option<Value>,
}

/// Fuel calculation output.
#[derive(Debug, Serialize, ToSchema)]
pub struct CalculationResultResponse {
    #[schema(example = 200.0)]
    pub fuel_capacity: f64,
    #[schema(example = 0.1)]
    pub fuel_consumption_per_minute: f64,
    #[schema(example = 2000.0)]
    pub flight_duration: f64,
    /// `minute`, `hour` or `day`.
    #[schema(example = "minute")]
    pub time_unit: String,
}

impl From<CalculationResult> for CalculationResultResponse {
    fn from(value: CalculationResult) -> Self {
        Self {
            fuel_capacity: value.fuel_capacity,
            fuel_consumption_per_minute: value.fuel_consumption_per_minute,
            flight_duration: value.flight_duration,
            time_unit: value.time_unit.to_string(),
        }
    }
}

fn parse_new_airplane(payload: AirplaneRequest) -> Result<Airplane, Error> {
    let raw_id = require_u32(payload.airplane_id, AIRPLANE_ID, 1)?;
    let max_passengers = require_u32(payload.max_passengers, MAX_PASSENGERS, 1)?;
    let airplane_id = AirplaneId::new(raw_id)?;
    Ok(Airplane::new(
        airplane_id,
        payload.name.unwrap_or_default(),
        max_passengers,
    )?)
}

fn parse_replacement(path: AirplaneId, payload: AirplaneRequest) -> Result<AirplaneUpdate, Error> {
    ensure_matching_airplane_id(path, payload.airplane_id)?;
    Ok(AirplaneUpdate {
        name: payload.name,
        max_passengers: Some(require_u32(payload.max_passengers, MAX_PASSENGERS, 1)?),
    })
}

fn parse_partial_update(
    path: AirplaneId,
    payload: AirplaneRequest,
) -> Result<AirplaneUpdate, Error> {
    ensure_matching_airplane_id(path, payload.airplane_id)?;
    let max_passengers = payload
        .max_passengers
        .map(|raw| parse_u32(raw, MAX_PASSENGERS, 1))
        .transpose()?;
    Ok(AirplaneUpdate {
        name: payload.name,
        max_passengers,
    })
}

fn parse_calculation(
    airplane_id: AirplaneId,
    payload: FuelCalculationBody,
) -> Result<FuelCalculationRequest, Error> {
    let passengers = require_u32(payload.passengers, PASSENGERS, 0)?;
    let config_override = payload
        .config_override
        .as_ref()
        .map(ConfigOverride::from_json)
        .transpose()?;
    Ok(FuelCalculationRequest {
        airplane_id,
        passengers,
        config_override,
    })
}

/// List every registered airplane.
#[utoipa::path(
    get,
    path = "/api/airplanes",
    responses(
        (status = 200, description = "Airplanes ordered by id", body = [AirplaneResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["airplanes"],
    operation_id = "listAirplanes"
)]
#[get("/airplanes")]
pub async fn list_airplanes(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<AirplaneResponse>>> {
    let airplanes = state.fleet_query.list_airplanes().await?;
    Ok(web::Json(
        airplanes.into_iter().map(AirplaneResponse::from).collect(),
    ))
}

/// Register a new airplane.
#[utoipa::path(
    post,
    path = "/api/airplanes",
    request_body = AirplaneRequest,
    responses(
        (status = 201, description = "Airplane created", body = AirplaneResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Airplane id already taken", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["airplanes"],
    operation_id = "createAirplane"
)]
#[post("/airplanes")]
pub async fn create_airplane(
    state: web::Data<HttpState>,
    payload: web::Json<AirplaneRequest>,
) -> ApiResult<HttpResponse> {
    let airplane = parse_new_airplane(payload.into_inner())?;
    let created = state.fleet.create_airplane(airplane).await?;
    Ok(HttpResponse::Created().json(AirplaneResponse::from(created)))
}

#[utoipa::path(
    get,
    path = "/api/airplanes/{airplane_id}",
    params(("airplane_id" = u32, Path, description = "Airplane identifier")),
    responses(
        (status = 200, description = "Airplane", body = AirplaneResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["airplanes"],
    operation_id = "getAirplane"
)]
#[get("/airplanes/{airplane_id}")]
pub async fn get_airplane(
    state: web::Data<HttpState>,
    path: web::Path<AirplanePath>,
) -> ApiResult<web::Json<AirplaneResponse>> {
    let airplane_id = path.into_inner().resolve()?;
    let airplane = state.fleet_query.get_airplane(airplane_id).await?;
    Ok(web::Json(AirplaneResponse::from(airplane)))
}

/// Replace an airplane's attributes. `max_passengers` is required.
#[utoipa::path(
    put,
    path = "/api/airplanes/{airplane_id}",
    request_body = AirplaneRequest,
    params(("airplane_id" = u32, Path, description = "Airplane identifier")),
    responses(
        (status = 200, description = "Updated airplane", body = AirplaneResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["airplanes"],
    operation_id = "replaceAirplane"
)]
#[put("/airplanes/{airplane_id}")]
pub async fn replace_airplane(
    state: web::Data<HttpState>,
    path: web::Path<AirplanePath>,
    payload: web::Json<AirplaneRequest>,
) -> ApiResult<web::Json<AirplaneResponse>> {
    let airplane_id = path.into_inner().resolve()?;
    let update = parse_replacement(airplane_id, payload.into_inner())?;
    let updated = state.fleet.update_airplane(airplane_id, update).await?;
    Ok(web::Json(AirplaneResponse::from(updated)))
}

/// Update only the supplied airplane attributes.
#[utoipa::path(
    patch,
    path = "/api/airplanes/{airplane_id}",
    request_body = AirplaneRequest,
    params(("airplane_id" = u32, Path, description = "Airplane identifier")),
    responses(
        (status = 200, description = "Updated airplane", body = AirplaneResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["airplanes"],
    operation_id = "updateAirplane"
)]
#[patch("/airplanes/{airplane_id}")]
pub async fn update_airplane(
    state: web::Data<HttpState>,
    path: web::Path<AirplanePath>,
    payload: web::Json<AirplaneRequest>,
) -> ApiResult<web::Json<AirplaneResponse>> {
    let airplane_id = path.into_inner().resolve()?;
    let update = parse_partial_update(airplane_id, payload.into_inner())?;
    let updated = state.fleet.update_airplane(airplane_id, update).await?;
    Ok(web::Json(AirplaneResponse::from(updated)))
}

/// Delete an airplane and its calculation history.
#[utoipa::path(
    delete,
    path = "/api/airplanes/{airplane_id}",
    params(("airplane_id" = u32, Path, description = "Airplane identifier")),
    responses(
        (status = 204, description = "Airplane deleted"),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["airplanes"],
    operation_id = "deleteAirplane"
)]
#[delete("/airplanes/{airplane_id}")]
pub async fn delete_airplane(
    state: web::Data<HttpState>,
    path: web::Path<AirplanePath>,
) -> ApiResult<HttpResponse> {
    let airplane_id = path.into_inner().resolve()?;
    state.fleet.delete_airplane(airplane_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Calculate fuel capacity, consumption and flight duration.
///
/// Identical requests under an unchanged baseline are served from cache and
/// do not add history records. An unknown airplane is reported before the
/// body is validated.
#[utoipa::path(
    post,
    path = "/api/airplanes/{airplane_id}/calculate_fuel",
    request_body = FuelCalculationBody,
    params(("airplane_id" = u32, Path, description = "Airplane identifier")),
    responses(
        (status = 200, description = "Calculation result", body = CalculationResultResponse),
        (status = 400, description = "Invalid passengers or configuration", body = ErrorSchema),
        (status = 404, description = "Airplane not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["airplanes"],
    operation_id = "calculateFuel"
)]
#[post("/airplanes/{airplane_id}/calculate_fuel")]
pub async fn calculate_fuel(
    state: web::Data<HttpState>,
    path: web::Path<AirplanePath>,
    payload: web::Json<FuelCalculationBody>,
) -> ApiResult<web::Json<CalculationResultResponse>> {
    let airplane_id = path.into_inner().resolve()?;
    state.fleet_query.get_airplane(airplane_id).await?;
    let request = parse_calculation(airplane_id, payload.into_inner())?;
    let result = state.fuel_calculation.calculate(request).await?;
    Ok(web::Json(CalculationResultResponse::from(result)))
}

#[cfg(test)]
#[path = "airplanes_tests.rs"]
mod tests;
