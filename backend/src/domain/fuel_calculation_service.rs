//! Fuel calculation orchestration.
//!
//! Implements [`FuelCalculationCommand`]: load the airplane, check capacity,
//! resolve and validate the effective configuration, consult the cache, and
//! on a miss calculate, record and cache the result. Every pure check runs
//! before the first side effect, so a failed request leaves neither a record
//! nor a cache entry behind.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info, warn};

use super::config_resolver::{resolve, resolve_baseline, validate};
use super::fuel_calculator::calculate;
use super::port_errors::{
    map_airplane_error, map_cache_error, map_configuration_error, map_record_error,
};
use super::ports::{
    AirplaneRepository, CalculationCache, CalculationRecordRepository, ConfigurationRepository,
    FuelCalculationCommand, FuelCalculationRequest,
};
use super::{
    CalculationError, CalculationResult, Error, FuelCacheKey, NewFuelCalculationRecord,
};

/// Cache lifetime applied when none is configured.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Calculation service implementing the [`FuelCalculationCommand`] port.
#[derive(Clone)]
pub struct FuelCalculationService<A, C, R, K> {
    airplanes: Arc<A>,
    configurations: Arc<C>,
    records: Arc<R>,
    cache: Arc<K>,
    clock: Arc<dyn Clock>,
    cache_ttl: Duration,
}

impl<A, C, R, K> FuelCalculationService<A, C, R, K> {
    /// Create a new service using [`DEFAULT_CACHE_TTL`].
    pub fn new(
        airplanes: Arc<A>,
        configurations: Arc<C>,
        records: Arc<R>,
        cache: Arc<K>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            airplanes,
            configurations,
            records,
            cache,
            clock,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    /// Override how long fresh results stay cached.
    #[must_use]
    pub fn with_cache_ttl(mut self, cache_ttl: Duration) -> Self {
        self.cache_ttl = cache_ttl;
        self
    }
}

#[async_trait]
impl<A, C, R, K> FuelCalculationCommand for FuelCalculationService<A, C, R, K>
where
    A: AirplaneRepository,
    C: ConfigurationRepository,
    R: CalculationRecordRepository,
    K: CalculationCache,
{
    async fn calculate(
        &self,
        request: FuelCalculationRequest,
    ) -> Result<CalculationResult, Error> {
        let FuelCalculationRequest {
            airplane_id,
            passengers,
            config_override,
        } = request;

        let airplane = self
            .airplanes
            .find_by_airplane_id(airplane_id)
            .await
            .map_err(map_airplane_error)?
            .ok_or(CalculationError::NotFound { airplane_id })?;

        if passengers > airplane.max_passengers() {
            return Err(CalculationError::ExceedsCapacity {
                max_passengers: airplane.max_passengers(),
            }
            .into());
        }

        let latest = self
            .configurations
            .latest()
            .await
            .map_err(map_configuration_error)?;
        let config = resolve(&resolve_baseline(latest.as_ref()), config_override.as_ref());
        validate(&config)?;

        let key = FuelCacheKey::build(airplane_id, passengers, &config);
        if let Some(cached) = self.cache.get(&key).await.map_err(map_cache_error)? {
            debug!(%key, airplane_id = airplane_id.get(), "fuel calculation cache hit");
            return Ok(cached);
        }
        debug!(%key, airplane_id = airplane_id.get(), "fuel calculation cache miss");

        let result = calculate(airplane_id, passengers, &config)?;

        let record_id = self
            .records
            .create(&NewFuelCalculationRecord {
                airplane_id,
                passengers,
                result,
                configuration_snapshot: config,
                timestamp: self.clock.utc(),
            })
            .await
            .map_err(map_record_error)?;
        info!(
            record_id,
            airplane_id = airplane_id.get(),
            passengers,
            "fuel calculation recorded"
        );

        if let Err(err) = self.cache.set(&key, &result, self.cache_ttl).await {
            warn!(error = %err, %key, "failed to cache fuel calculation result");
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        CalculationCacheError, ConfigurationRepositoryError, MockAirplaneRepository,
        MockCalculationCache, MockCalculationRecordRepository, MockConfigurationRepository,
    };
    use crate::domain::{
        Airplane, AirplaneId, ConfigOverride, Configuration, ErrorCode, FuelConfig, LogBase,
        TimeUnit,
    };
    use crate::domain::test_clock::{fixture_clock, fixture_timestamp};
    use rstest::{fixture, rstest};

    type TestService = FuelCalculationService<
        MockAirplaneRepository,
        MockConfigurationRepository,
        MockCalculationRecordRepository,
        MockCalculationCache,
    >;

    struct Mocks {
        airplanes: MockAirplaneRepository,
        configurations: MockConfigurationRepository,
        records: MockCalculationRecordRepository,
        cache: MockCalculationCache,
    }

    impl Mocks {
        fn into_service(self) -> TestService {
            FuelCalculationService::new(
                Arc::new(self.airplanes),
                Arc::new(self.configurations),
                Arc::new(self.records),
                Arc::new(self.cache),
                fixture_clock(),
            )
        }
    }

    fn id(value: u32) -> AirplaneId {
        AirplaneId::new(value).expect("valid id")
    }

    fn airplane(value: u32, max_passengers: u32) -> Airplane {
        Airplane::new(id(value), "Test plane", max_passengers).expect("valid airplane")
    }

    fn request(passengers: u32, config_override: Option<ConfigOverride>) -> FuelCalculationRequest {
        FuelCalculationRequest {
            airplane_id: id(1),
            passengers,
            config_override,
        }
    }

    #[fixture]
    fn mocks() -> Mocks {
        let mut airplanes = MockAirplaneRepository::new();
        airplanes
            .expect_find_by_airplane_id()
            .returning(|airplane_id| Ok(Some(airplane(airplane_id.get(), 150))));
        let mut configurations = MockConfigurationRepository::new();
        configurations.expect_latest().returning(|| Ok(None));
        Mocks {
            airplanes,
            configurations,
            records: MockCalculationRecordRepository::new(),
            cache: MockCalculationCache::new(),
        }
    }

    fn expected_default_result() -> CalculationResult {
        CalculationResult {
            fuel_capacity: 200.0,
            fuel_consumption_per_minute: 0.1,
            flight_duration: 2000.0,
            time_unit: TimeUnit::Minute,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn cache_miss_calculates_records_and_caches(mut mocks: Mocks) {
        let expected_key = FuelCacheKey::build(id(1), 50, &FuelConfig::default());
        let get_key = expected_key.clone();
        mocks
            .cache
            .expect_get()
            .withf(move |key| *key == get_key)
            .times(1)
            .return_once(|_| Ok(None));
        mocks
            .records
            .expect_create()
            .withf(|record| {
                record.airplane_id.get() == 1
                    && record.passengers == 50
                    && record.configuration_snapshot == FuelConfig::default()
                    && record.timestamp == fixture_timestamp()
            })
            .times(1)
            .return_once(|_| Ok(11));
        mocks
            .cache
            .expect_set()
            .withf(move |key, result, ttl| {
                *key == expected_key
                    && *result == expected_default_result()
                    && *ttl == DEFAULT_CACHE_TTL
            })
            .times(1)
            .return_once(|_, _, _| Ok(()));

        let result = mocks
            .into_service()
            .calculate(request(50, None))
            .await
            .expect("calculation succeeds");

        assert_eq!(result, expected_default_result());
    }

    #[rstest]
    #[tokio::test]
    async fn cache_hit_skips_calculation_and_record(mut mocks: Mocks) {
        let cached = CalculationResult {
            fuel_capacity: 1.0,
            fuel_consumption_per_minute: 2.0,
            flight_duration: 3.0,
            time_unit: TimeUnit::Day,
        };
        mocks
            .cache
            .expect_get()
            .times(1)
            .return_once(move |_| Ok(Some(cached)));
        mocks.records.expect_create().never();
        mocks.cache.expect_set().never();

        let result = mocks
            .into_service()
            .calculate(request(50, None))
            .await
            .expect("cached result");

        assert_eq!(result, cached);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_airplane_is_not_found() {
        let mut airplanes = MockAirplaneRepository::new();
        airplanes
            .expect_find_by_airplane_id()
            .times(1)
            .return_once(|_| Ok(None));
        let mut configurations = MockConfigurationRepository::new();
        configurations.expect_latest().never();
        let mut cache = MockCalculationCache::new();
        cache.expect_get().never();
        let service = Mocks {
            airplanes,
            configurations,
            records: MockCalculationRecordRepository::new(),
            cache,
        }
        .into_service();

        let err = service
            .calculate(request(5, None))
            .await
            .expect_err("missing airplane");

        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn exceeding_capacity_has_no_side_effects(mut mocks: Mocks) {
        mocks.cache.expect_get().never();
        mocks.records.expect_create().never();
        mocks.cache.expect_set().never();

        let err = mocks
            .into_service()
            .calculate(request(151, None))
            .await
            .expect_err("over capacity");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "Exceeds max passengers (150)");
    }

    #[rstest]
    #[tokio::test]
    async fn capacity_boundary_is_inclusive(mut mocks: Mocks) {
        mocks.cache.expect_get().return_once(|_| Ok(None));
        mocks.records.expect_create().return_once(|_| Ok(1));
        mocks.cache.expect_set().return_once(|_, _, _| Ok(()));

        let result = mocks.into_service().calculate(request(150, None)).await;

        assert!(result.is_ok());
    }

    #[rstest]
    #[tokio::test]
    async fn non_positive_consumption_has_no_side_effects(mut mocks: Mocks) {
        mocks.cache.expect_get().times(1).return_once(|_| Ok(None));
        mocks.records.expect_create().never();
        mocks.cache.expect_set().never();
        let over = ConfigOverride::default()
            .with_fuel_consumption_coefficient(-100.0)
            .with_passenger_fuel_impact(0.0);

        let err = mocks
            .into_service()
            .calculate(FuelCalculationRequest {
                airplane_id: id(10),
                passengers: 5,
                config_override: Some(over),
            })
            .await
            .expect_err("non-positive consumption");

        assert_eq!(err.message(), "Fuel consumption must be positive");
    }

    #[rstest]
    #[tokio::test]
    async fn stored_baseline_and_override_are_merged() {
        let mut airplanes = MockAirplaneRepository::new();
        airplanes
            .expect_find_by_airplane_id()
            .return_once(|_| Ok(Some(airplane(1, 150))));
        let mut configurations = MockConfigurationRepository::new();
        configurations.expect_latest().return_once(|| {
            Ok(Some(Configuration {
                id: 3,
                config: FuelConfig {
                    log_base: LogBase::Natural,
                    ..FuelConfig::default()
                },
                created_at: fixture_timestamp(),
            }))
        });
        let mut records = MockCalculationRecordRepository::new();
        records
            .expect_create()
            .withf(|record| {
                record.configuration_snapshot.log_base == LogBase::Natural
                    && record.configuration_snapshot.time_unit == TimeUnit::Hour
                    && record.configuration_snapshot.fuel_capacity_multiplier == 300.0
            })
            .times(1)
            .return_once(|_| Ok(2));
        let mut cache = MockCalculationCache::new();
        cache.expect_get().return_once(|_| Ok(None));
        cache.expect_set().return_once(|_, _, _| Ok(()));
        let service = Mocks {
            airplanes,
            configurations,
            records,
            cache,
        }
        .into_service();
        let over = ConfigOverride::default()
            .with_fuel_capacity_multiplier(300.0)
            .with_time_unit(TimeUnit::Hour);

        let result = service
            .calculate(request(50, Some(over)))
            .await
            .expect("calculation succeeds");

        assert_eq!(result.fuel_capacity, 300.0);
        assert_eq!(result.flight_duration, 50.0);
        assert_eq!(result.time_unit, TimeUnit::Hour);
    }

    #[rstest]
    #[tokio::test]
    async fn non_finite_override_is_invalid_config(mut mocks: Mocks) {
        mocks.cache.expect_get().never();
        let over = ConfigOverride::default().with_fuel_capacity_multiplier(f64::NAN);

        let err = mocks
            .into_service()
            .calculate(request(10, Some(over)))
            .await
            .expect_err("invalid config");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.message(),
            "fuel_capacity_multiplier must be a finite number"
        );
    }

    #[rstest]
    #[tokio::test]
    async fn cache_write_failure_still_returns_result(mut mocks: Mocks) {
        mocks.cache.expect_get().return_once(|_| Ok(None));
        mocks.records.expect_create().times(1).return_once(|_| Ok(5));
        mocks
            .cache
            .expect_set()
            .times(1)
            .return_once(|_, _, _| Err(CalculationCacheError::backend("connection reset")));

        let result = mocks
            .into_service()
            .calculate(request(50, None))
            .await
            .expect("result despite cache failure");

        assert_eq!(result, expected_default_result());
    }

    #[rstest]
    #[tokio::test]
    async fn cache_read_failure_is_service_unavailable(mut mocks: Mocks) {
        mocks
            .cache
            .expect_get()
            .return_once(|_| Err(CalculationCacheError::backend("timeout")));
        mocks.records.expect_create().never();

        let err = mocks
            .into_service()
            .calculate(request(50, None))
            .await
            .expect_err("cache unavailable");

        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    #[tokio::test]
    async fn configuration_lookup_failure_propagates() {
        let mut airplanes = MockAirplaneRepository::new();
        airplanes
            .expect_find_by_airplane_id()
            .return_once(|_| Ok(Some(airplane(1, 150))));
        let mut configurations = MockConfigurationRepository::new();
        configurations
            .expect_latest()
            .return_once(|| Err(ConfigurationRepositoryError::query("syntax error")));
        let service = Mocks {
            airplanes,
            configurations,
            records: MockCalculationRecordRepository::new(),
            cache: MockCalculationCache::new(),
        }
        .into_service();

        let err = service
            .calculate(request(10, None))
            .await
            .expect_err("lookup failure");

        assert_eq!(err.code(), ErrorCode::InternalError);
    }

    #[rstest]
    #[tokio::test]
    async fn custom_ttl_is_passed_to_cache(mut mocks: Mocks) {
        mocks.cache.expect_get().return_once(|_| Ok(None));
        mocks.records.expect_create().return_once(|_| Ok(1));
        mocks
            .cache
            .expect_set()
            .withf(|_, _, ttl| *ttl == Duration::from_secs(60))
            .times(1)
            .return_once(|_, _, _| Ok(()));

        mocks
            .into_service()
            .with_cache_ttl(Duration::from_secs(60))
            .calculate(request(50, None))
            .await
            .expect("calculation succeeds");
    }
}
