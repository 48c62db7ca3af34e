//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use fuel_tracker::domain::DEFAULT_CACHE_TTL;
use fuel_tracker::outbound::cache::RedisCalculationCache;
use fuel_tracker::outbound::persistence::DbPool;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Builder-style configuration for creating the HTTP server.
///
/// Without a pool or Redis cache the server falls back to in-process
/// adapters.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) redis_cache: Option<RedisCalculationCache>,
    pub(crate) cache_ttl: Duration,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            redis_cache: None,
            cache_ttl: DEFAULT_CACHE_TTL,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Attach a database connection pool for the Diesel repositories.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Attach a Redis-backed calculation cache.
    #[must_use]
    pub fn with_redis_cache(mut self, cache: RedisCalculationCache) -> Self {
        self.redis_cache = Some(cache);
        self
    }

    #[must_use]
    pub fn with_cache_ttl(mut self, cache_ttl: Duration) -> Self {
        self.cache_ttl = cache_ttl;
        self
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
