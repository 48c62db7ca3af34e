//! Baseline configuration HTTP handlers.
//!
//! ```text
//! GET  /api/configurations
//! POST /api/configurations
//! GET  /api/configurations/{id}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::config_resolver::resolve;
use crate::domain::{ConfigOverride, Configuration, Error, FuelConfig};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ConfigOverrideSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;

#[derive(Debug, Deserialize)]
pub(super) struct ConfigurationPath {
    id: i64,
}

/// Stored configuration as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct ConfigurationResponse {
    pub id: i64,
    #[schema(example = 200.0)]
    pub fuel_capacity_multiplier: f64,
    /// `10` or `e`.
    #[schema(example = "10")]
    pub log_base: String,
    #[schema(example = 0.002)]
    pub passenger_fuel_impact: f64,
    #[schema(example = 0.8)]
    pub fuel_consumption_coefficient: f64,
    /// `minute`, `hour` or `day`.
    #[schema(example = "minute")]
    pub time_unit: String,
    /// RFC 3339 creation time.
    pub created_at: String,
}

impl From<Configuration> for ConfigurationResponse {
    fn from(value: Configuration) -> Self {
        let Configuration {
            id,
            config,
            created_at,
        } = value;
        Self {
            id,
            fuel_capacity_multiplier: config.fuel_capacity_multiplier,
            log_base: config.log_base.to_string(),
            passenger_fuel_impact: config.passenger_fuel_impact,
            fuel_consumption_coefficient: config.fuel_consumption_coefficient,
            time_unit: config.time_unit.to_string(),
            created_at: created_at.to_rfc3339(),
        }
    }
}

/// Fields omitted from the body take the built-in defaults, not the
/// current baseline.
fn parse_new_configuration(payload: &Value) -> Result<FuelConfig, Error> {
    let fields = ConfigOverride::from_json(payload)?;
    Ok(resolve(&FuelConfig::default(), Some(&fields)))
}

/// List configurations. Only the active baseline is returned.
#[utoipa::path(
    get,
    path = "/api/configurations",
    responses(
        (status = 200, description = "Zero or one configuration", body = [ConfigurationResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["configurations"],
    operation_id = "listConfigurations"
)]
#[get("/configurations")]
pub async fn list_configurations(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ConfigurationResponse>>> {
    let latest = state.fleet_query.latest_configuration().await?;
    Ok(web::Json(
        latest.into_iter().map(ConfigurationResponse::from).collect(),
    ))
}

/// Store a new baseline. It applies to every later calculation.
#[utoipa::path(
    post,
    path = "/api/configurations",
    request_body = ConfigOverrideSchema,
    responses(
        (status = 201, description = "Configuration created", body = ConfigurationResponse),
        (status = 400, description = "Invalid configuration", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["configurations"],
    operation_id = "createConfiguration"
)]
#[post("/configurations")]
pub async fn create_configuration(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let config = parse_new_configuration(&payload)?;
    let created = state.fleet.create_configuration(config).await?;
    Ok(HttpResponse::Created().json(ConfigurationResponse::from(created)))
}

#[utoipa::path(
    get,
    path = "/api/configurations/{id}",
    params(("id" = i64, Path, description = "Configuration identifier")),
    responses(
        (status = 200, description = "Configuration", body = ConfigurationResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["configurations"],
    operation_id = "getConfiguration"
)]
#[get("/configurations/{id}")]
pub async fn get_configuration(
    state: web::Data<HttpState>,
    path: web::Path<ConfigurationPath>,
) -> ApiResult<web::Json<ConfigurationResponse>> {
    let configuration = state
        .fleet_query
        .get_configuration(path.into_inner().id)
        .await?;
    Ok(web::Json(ConfigurationResponse::from(configuration)))
}
