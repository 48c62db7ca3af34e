//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the schema wrappers ([`ErrorSchema`], [`ErrorCodeSchema`],
//! [`ConfigOverrideSchema`]) that describe domain types without coupling them
//! to utoipa. Swagger UI serves the document in debug builds.

use crate::inbound::http::airplanes::{
    AirplaneRequest, AirplaneResponse, CalculationResultResponse, FuelCalculationBody,
};
use crate::inbound::http::configurations::ConfigurationResponse;
use crate::inbound::http::results::{CalculationRecordResponse, ConfigurationSnapshotResponse};
use crate::inbound::http::schemas::{ConfigOverrideSchema, ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fuel tracker API",
        description = "Airplane fleet management and fuel calculations with cached, recorded results."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::airplanes::list_airplanes,
        crate::inbound::http::airplanes::create_airplane,
        crate::inbound::http::airplanes::get_airplane,
        crate::inbound::http::airplanes::replace_airplane,
        crate::inbound::http::airplanes::update_airplane,
        crate::inbound::http::airplanes::delete_airplane,
        crate::inbound::http::airplanes::calculate_fuel,
        crate::inbound::http::configurations::list_configurations,
        crate::inbound::http::configurations::create_configuration,
        crate::inbound::http::configurations::get_configuration,
        crate::inbound::http::results::list_results,
        crate::inbound::http::results::get_result,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        AirplaneRequest,
        AirplaneResponse,
        FuelCalculationBody,
        CalculationResultResponse,
        ConfigurationResponse,
        CalculationRecordResponse,
        ConfigurationSnapshotResponse,
        ConfigOverrideSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "airplanes", description = "Fleet management and fuel calculations"),
        (name = "configurations", description = "Baseline calculation parameters"),
        (name = "results", description = "Calculation history"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
