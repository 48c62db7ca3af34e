//! Domain primitives, calculation logic and services.
//!
//! Purpose: define the fleet and fuel configuration types, the pure
//! calculator, and the services that orchestrate calculations over the
//! driven ports. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - Airplane / AirplaneId — fleet entries keyed by their business id.
//! - FuelConfig / Configuration / ConfigOverride — tuning parameters.
//! - CalculationResult / FuelCalculationRecord — outputs and history.
//! - FuelCalculationService / FleetService — port implementations.

pub mod airplane;
pub mod cache_key;
pub mod calculation;
pub mod config_resolver;
pub mod configuration;
pub mod error;
pub mod fleet_service;
pub mod fuel_calculation_service;
pub mod fuel_calculator;
mod port_errors;
pub mod ports;
#[cfg(test)]
pub(crate) mod test_clock;
pub mod trace_id;

pub use self::airplane::{
    AIRPLANE_NAME_MAX, Airplane, AirplaneId, AirplaneUpdate, AirplaneValidationError,
};
pub use self::cache_key::FuelCacheKey;
pub use self::calculation::{
    CalculationError, CalculationResult, FuelCalculationRecord, NewFuelCalculationRecord,
};
pub use self::configuration::{
    ConfigOverride, Configuration, FuelConfig, LogBase, NewConfiguration, ParseLogBaseError,
    ParseTimeUnitError, TimeUnit,
};
pub use self::error::{Error, ErrorCode};
pub use self::fleet_service::FleetService;
pub use self::fuel_calculation_service::{DEFAULT_CACHE_TTL, FuelCalculationService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use fuel_tracker::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
