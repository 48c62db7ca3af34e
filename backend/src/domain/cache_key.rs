//! Cache key derivation for calculation results.

use serde_json::{Value, json};
use sha2::{Digest, Sha256};

use super::{AirplaneId, FuelConfig};

const KEY_PREFIX: &str = "fuel:";

/// Cache key identifying one (airplane, passengers, effective config) input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FuelCacheKey(String);

impl FuelCacheKey {
    /// Derive the key for a calculation input.
    ///
    /// The inputs are rendered as canonical JSON (keys sorted), hashed with
    /// SHA-256 and hex encoded behind a `fuel:` prefix. The key changes
    /// whenever any of the seven inputs changes, including `time_unit`.
    ///
    /// # Examples
    /// ```
    /// use fuel_tracker::domain::{AirplaneId, FuelCacheKey, FuelConfig};
    ///
    /// let id = AirplaneId::new(1).expect("valid id");
    /// let key = FuelCacheKey::build(id, 50, &FuelConfig::default());
    /// assert!(key.as_str().starts_with("fuel:"));
    /// assert_eq!(key, FuelCacheKey::build(id, 50, &FuelConfig::default()));
    /// ```
    pub fn build(airplane_id: AirplaneId, passengers: u32, config: &FuelConfig) -> Self {
        let payload = json!({
            "airplane_id": airplane_id.get(),
            "passengers": passengers,
            "fuel_capacity_multiplier": config.fuel_capacity_multiplier,
            "log_base": config.log_base.as_str(),
            "passenger_fuel_impact": config.passenger_fuel_impact,
            "fuel_consumption_coefficient": config.fuel_consumption_coefficient,
            "time_unit": config.time_unit.as_str(),
        });
        let canonical = canonicalize(&payload).to_string();
        let digest = Sha256::digest(canonical.as_bytes());
        Self(format!("{KEY_PREFIX}{}", hex::encode(digest)))
    }

    /// Borrow the underlying key as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for FuelCacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for FuelCacheKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Recursively sort object keys.
fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut sorted: Vec<_> = map.iter().collect();
            sorted.sort_by_key(|(k, _)| k.as_str());
            Value::Object(
                sorted
                    .into_iter()
                    .map(|(k, v)| (k.clone(), canonicalize(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}
