//! Translation of driven-port failures into domain errors.
//!
//! Connection failures surface as `service_unavailable`; everything else is an
//! internal error and is redacted at the HTTP boundary.

use tracing::error;

use super::Error;
use super::ports::{
    AirplaneRepositoryError, CalculationCacheError, CalculationRecordRepositoryError,
    ConfigurationRepositoryError,
};

pub(crate) fn map_airplane_error(err: AirplaneRepositoryError) -> Error {
    error!(error = %err, "airplane repository failure");
    match err {
        AirplaneRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("airplane repository unavailable: {message}"))
        }
        AirplaneRepositoryError::Query { message } => {
            Error::internal(format!("airplane repository error: {message}"))
        }
        AirplaneRepositoryError::Duplicate { airplane_id } => {
            Error::conflict(format!("Airplane {airplane_id} already exists"))
        }
    }
}

pub(crate) fn map_configuration_error(err: ConfigurationRepositoryError) -> Error {
    error!(error = %err, "configuration repository failure");
    match err {
        ConfigurationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("configuration repository unavailable: {message}"))
        }
        ConfigurationRepositoryError::Query { message } => {
            Error::internal(format!("configuration repository error: {message}"))
        }
    }
}

pub(crate) fn map_record_error(err: CalculationRecordRepositoryError) -> Error {
    error!(error = %err, "calculation record repository failure");
    match err {
        CalculationRecordRepositoryError::Connection { message } => Error::service_unavailable(
            format!("calculation record repository unavailable: {message}"),
        ),
        CalculationRecordRepositoryError::Query { message } => {
            Error::internal(format!("calculation record repository error: {message}"))
        }
    }
}

pub(crate) fn map_cache_error(err: CalculationCacheError) -> Error {
    error!(error = %err, "calculation cache failure");
    match err {
        CalculationCacheError::Backend { message } => {
            Error::service_unavailable(format!("calculation cache unavailable: {message}"))
        }
        CalculationCacheError::Serialization { message } => {
            Error::internal(format!("calculation cache corrupted: {message}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(
        map_airplane_error(AirplaneRepositoryError::connection("down")),
        ErrorCode::ServiceUnavailable
    )]
    #[case(map_airplane_error(AirplaneRepositoryError::query("bad")), ErrorCode::InternalError)]
    #[case(map_airplane_error(AirplaneRepositoryError::duplicate(4_u32)), ErrorCode::Conflict)]
    #[case(
        map_configuration_error(ConfigurationRepositoryError::connection("down")),
        ErrorCode::ServiceUnavailable
    )]
    #[case(
        map_record_error(CalculationRecordRepositoryError::query("bad")),
        ErrorCode::InternalError
    )]
    #[case(
        map_cache_error(CalculationCacheError::backend("timeout")),
        ErrorCode::ServiceUnavailable
    )]
    #[case(
        map_cache_error(CalculationCacheError::serialization("garbage")),
        ErrorCode::InternalError
    )]
    fn port_errors_map_to_codes(#[case] error: Error, #[case] expected: ErrorCode) {
        assert_eq!(error.code(), expected);
    }
}
