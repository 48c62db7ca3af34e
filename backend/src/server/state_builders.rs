//! Builders wiring repository and cache adapters into HTTP state.

use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use fuel_tracker::domain::ports::{
    AirplaneRepository, CalculationCache, CalculationRecordRepository, ConfigurationRepository,
};
use fuel_tracker::domain::{FleetService, FuelCalculationService};
use fuel_tracker::inbound::http::state::{HttpState, HttpStatePorts};
use fuel_tracker::outbound::cache::{InMemoryCalculationCache, RedisCalculationCache};
use fuel_tracker::outbound::memory::InMemoryFleetStore;
use fuel_tracker::outbound::persistence::{
    DieselAirplaneRepository, DieselCalculationRecordRepository, DieselConfigurationRepository,
};

use super::ServerConfig;

/// Repository adapters shared by both services.
struct Repositories<A, C, R> {
    airplanes: Arc<A>,
    configurations: Arc<C>,
    records: Arc<R>,
}

fn build_ports<A, C, R, K>(
    repositories: Repositories<A, C, R>,
    cache: Arc<K>,
    clock: Arc<dyn Clock>,
    cache_ttl: Duration,
) -> HttpStatePorts
where
    A: AirplaneRepository + 'static,
    C: ConfigurationRepository + 'static,
    R: CalculationRecordRepository + 'static,
    K: CalculationCache + 'static,
{
    let Repositories {
        airplanes,
        configurations,
        records,
    } = repositories;
    let fleet = Arc::new(FleetService::new(
        airplanes.clone(),
        configurations.clone(),
        records.clone(),
        clock.clone(),
    ));
    let fuel_calculation = Arc::new(
        FuelCalculationService::new(airplanes, configurations, records, cache, clock)
            .with_cache_ttl(cache_ttl),
    );
    HttpStatePorts {
        fuel_calculation,
        fleet: fleet.clone(),
        fleet_query: fleet,
    }
}

fn with_cache<A, C, R>(
    repositories: Repositories<A, C, R>,
    redis_cache: Option<&RedisCalculationCache>,
    cache_ttl: Duration,
) -> HttpStatePorts
where
    A: AirplaneRepository + 'static,
    C: ConfigurationRepository + 'static,
    R: CalculationRecordRepository + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    match redis_cache {
        Some(cache) => {
            info!("using Redis calculation cache");
            build_ports(repositories, Arc::new(cache.clone()), clock, cache_ttl)
        }
        None => {
            info!("using in-process calculation cache");
            let cache = Arc::new(InMemoryCalculationCache::new(clock.clone()));
            build_ports(repositories, cache, clock, cache_ttl)
        }
    }
}

/// Build the HTTP state, preferring the Diesel repositories and Redis cache
/// when the configuration provides them.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let redis_cache = config.redis_cache.as_ref();
    let ports = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL repositories");
            let repositories = Repositories {
                airplanes: Arc::new(DieselAirplaneRepository::new(pool.clone())),
                configurations: Arc::new(DieselConfigurationRepository::new(pool.clone())),
                records: Arc::new(DieselCalculationRecordRepository::new(pool.clone())),
            };
            with_cache(repositories, redis_cache, config.cache_ttl)
        }
        None => {
            info!("using in-memory repositories");
            let store = Arc::new(InMemoryFleetStore::new());
            let repositories = Repositories {
                airplanes: store.clone(),
                configurations: store.clone(),
                records: store,
            };
            with_cache(repositories, redis_cache, config.cache_ttl)
        }
    };
    web::Data::new(HttpState::new(ports))
}
