//! Redis-backed `CalculationCache` adapter.
//!
//! Results are stored as JSON strings under the hashed cache key with
//! `SET ... EX`, so Redis handles expiry.

use std::time::Duration;

use async_trait::async_trait;
use bb8_redis::RedisConnectionManager;
use bb8_redis::bb8::Pool;
use bb8_redis::redis::AsyncCommands;

use crate::domain::ports::{CalculationCache, CalculationCacheError};
use crate::domain::{CalculationResult, FuelCacheKey};

/// Calculation cache backed by a pooled Redis connection.
#[derive(Clone)]
pub struct RedisCalculationCache {
    pool: Pool<RedisConnectionManager>,
}

impl RedisCalculationCache {
    /// Wrap an existing pool.
    pub fn new(pool: Pool<RedisConnectionManager>) -> Self {
        Self { pool }
    }

    /// Build a pool for `redis_url` and wrap it.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationCacheError::Backend`] when the URL is invalid or
    /// the initial connections cannot be established.
    pub async fn connect(redis_url: &str) -> Result<Self, CalculationCacheError> {
        let manager = RedisConnectionManager::new(redis_url)
            .map_err(|err| CalculationCacheError::backend(err.to_string()))?;
        let pool = Pool::builder()
            .build(manager)
            .await
            .map_err(|err| CalculationCacheError::backend(err.to_string()))?;
        Ok(Self::new(pool))
    }
}

/// Redis rejects `EX 0`; sub-second TTLs round up to one second.
fn expiry_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

#[async_trait]
impl CalculationCache for RedisCalculationCache {
    async fn get(
        &self,
        key: &FuelCacheKey,
    ) -> Result<Option<CalculationResult>, CalculationCacheError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| CalculationCacheError::backend(err.to_string()))?;
        let cached: Option<String> = conn
            .get(key.as_str())
            .await
            .map_err(|err| CalculationCacheError::backend(err.to_string()))?;

        cached
            .map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(|err| CalculationCacheError::serialization(err.to_string()))
    }

    async fn set(
        &self,
        key: &FuelCacheKey,
        result: &CalculationResult,
        ttl: Duration,
    ) -> Result<(), CalculationCacheError> {
        let payload = serde_json::to_string(result)
            .map_err(|err| CalculationCacheError::serialization(err.to_string()))?;
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| CalculationCacheError::backend(err.to_string()))?;
        let _: () = conn
            .set_ex(key.as_str(), payload, expiry_seconds(ttl))
            .await
            .map_err(|err| CalculationCacheError::backend(err.to_string()))?;
        Ok(())
    }
}
