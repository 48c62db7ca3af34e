//! Port for caching calculation results.
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{CalculationResult, FuelCacheKey};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by the caching adapter.
    pub enum CalculationCacheError {
        /// Cache backend is unavailable or timing out.
        Backend { message: String } => "calculation cache backend failure: {message}",
        /// Serialisation or deserialisation of cached content failed.
        Serialization { message: String } => "calculation cache serialisation failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalculationCache: Send + Sync {
    /// Read a cached result for the given key.
    async fn get(&self, key: &FuelCacheKey)
    -> Result<Option<CalculationResult>, CalculationCacheError>;

    /// Store a result under `key`, expiring after `ttl`.
    async fn set(
        &self,
        key: &FuelCacheKey,
        result: &CalculationResult,
        ttl: Duration,
    ) -> Result<(), CalculationCacheError>;
}

/// Cache that never stores anything. Every lookup misses.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCalculationCache;

#[async_trait]
impl CalculationCache for FixtureCalculationCache {
    async fn get(
        &self,
        _key: &FuelCacheKey,
    ) -> Result<Option<CalculationResult>, CalculationCacheError> {
        Ok(None)
    }

    async fn set(
        &self,
        _key: &FuelCacheKey,
        _result: &CalculationResult,
        _ttl: Duration,
    ) -> Result<(), CalculationCacheError> {
        Ok(())
    }
}
