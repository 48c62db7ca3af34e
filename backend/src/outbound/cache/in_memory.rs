//! In-process `CalculationCache` adapter with clock-driven expiry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::ports::{CalculationCache, CalculationCacheError};
use crate::domain::{CalculationResult, FuelCacheKey};

struct Entry {
    result: CalculationResult,
    expires_at: DateTime<Utc>,
}

/// Calculation cache held in a mutex-guarded map.
///
/// Expired entries are dropped on lookup and swept on every write, so keys
/// that are never read again do not accumulate.
pub struct InMemoryCalculationCache {
    entries: Mutex<HashMap<FuelCacheKey, Entry>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryCalculationCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    fn poisoned() -> CalculationCacheError {
        CalculationCacheError::backend("in-memory cache lock poisoned")
    }
}

#[async_trait]
impl CalculationCache for InMemoryCalculationCache {
    async fn get(
        &self,
        key: &FuelCacheKey,
    ) -> Result<Option<CalculationResult>, CalculationCacheError> {
        let now = self.clock.utc();
        let mut entries = self.entries.lock().map_err(|_| Self::poisoned())?;
        match entries.get(key) {
            Some(entry) if entry.expires_at > now => Ok(Some(entry.result)),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(
        &self,
        key: &FuelCacheKey,
        result: &CalculationResult,
        ttl: Duration,
    ) -> Result<(), CalculationCacheError> {
        let now = self.clock.utc();
        let ttl = TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX);
        let expires_at = now
            .checked_add_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let mut entries = self.entries.lock().map_err(|_| Self::poisoned())?;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key.clone(),
            Entry {
                result: *result,
                expires_at,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AirplaneId, FuelConfig, TimeUnit};
    use chrono::{Local, TimeZone};
    use rstest::rstest;

    struct SteppingClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl SteppingClock {
        fn advance(&self, by: TimeDelta) {
            let mut now = self.now.lock().expect("clock lock");
            *now += by;
        }
    }

    impl Clock for SteppingClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.now.lock().expect("clock lock")
        }
    }

    fn setup() -> (Arc<SteppingClock>, InMemoryCalculationCache, FuelCacheKey) {
        let clock = Arc::new(SteppingClock {
            now: Mutex::new(
                Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
                    .single()
                    .expect("valid timestamp"),
            ),
        });
        let cache = InMemoryCalculationCache::new(clock.clone());
        let key = FuelCacheKey::build(
            AirplaneId::new(1).expect("valid id"),
            50,
            &FuelConfig::default(),
        );
        (clock, cache, key)
    }

    fn sample() -> CalculationResult {
        CalculationResult {
            fuel_capacity: 200.0,
            fuel_consumption_per_minute: 0.1,
            flight_duration: 2000.0,
            time_unit: TimeUnit::Minute,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn stored_result_is_returned_until_expiry() {
        let (clock, cache, key) = setup();
        cache
            .set(&key, &sample(), Duration::from_secs(3600))
            .await
            .expect("set");

        clock.advance(TimeDelta::seconds(3599));
        assert_eq!(cache.get(&key).await.expect("get"), Some(sample()));

        clock.advance(TimeDelta::seconds(1));
        assert_eq!(cache.get(&key).await.expect("get"), None);
    }

    #[rstest]
    #[tokio::test]
    async fn writes_sweep_expired_entries() {
        let (clock, cache, stale) = setup();
        cache
            .set(&stale, &sample(), Duration::from_secs(60))
            .await
            .expect("set stale");

        clock.advance(TimeDelta::seconds(61));
        let fresh = FuelCacheKey::build(
            AirplaneId::new(2).expect("valid id"),
            50,
            &FuelConfig::default(),
        );
        cache
            .set(&fresh, &sample(), Duration::from_secs(60))
            .await
            .expect("set fresh");

        let entries = cache.entries.lock().expect("cache lock");
        assert!(!entries.contains_key(&stale));
        assert!(entries.contains_key(&fresh));
        assert_eq!(entries.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_key_misses() {
        let (_clock, cache, key) = setup();
        assert_eq!(cache.get(&key).await.expect("get"), None);
    }
}
