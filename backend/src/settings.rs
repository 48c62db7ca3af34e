//! Server settings loaded via OrthoConfig.
//!
//! Values are layered from CLI arguments, `FUEL_TRACKER_*` environment
//! variables and configuration files. Absent optional values select the
//! in-process adapters.

use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::DEFAULT_CACHE_TTL;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_POOL_MAX_SIZE: u32 = 10;

/// Runtime configuration for the fuel tracker server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FUEL_TRACKER")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string. In-memory repositories are used when
    /// unset.
    pub database_url: Option<String>,
    /// Redis connection string. An in-process cache is used when unset.
    pub redis_url: Option<String>,
    /// Lifetime of cached calculation results.
    pub cache_ttl_seconds: Option<u64>,
    /// Upper bound on pooled database connections.
    pub db_pool_max_size: Option<u32>,
}

impl ServerSettings {
    /// Parse the configured bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR).parse()
    }

    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl_seconds
            .map_or(DEFAULT_CACHE_TTL, Duration::from_secs)
    }

    pub fn db_pool_max_size(&self) -> u32 {
        self.db_pool_max_size.unwrap_or(DEFAULT_DB_POOL_MAX_SIZE)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "FUEL_TRACKER_BIND_ADDR",
        "FUEL_TRACKER_DATABASE_URL",
        "FUEL_TRACKER_REDIS_URL",
        "FUEL_TRACKER_CACHE_TTL_SECONDS",
        "FUEL_TRACKER_DB_POOL_MAX_SIZE",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("fuel-tracker")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default address parses"),
            SocketAddr::from(([0, 0, 0, 0], 8080))
        );
        assert_eq!(settings.cache_ttl(), Duration::from_secs(3600));
        assert_eq!(settings.db_pool_max_size(), 10);
        assert!(settings.database_url.is_none());
        assert!(settings.redis_url.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("FUEL_TRACKER_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "FUEL_TRACKER_DATABASE_URL",
                Some("postgres://fuel@localhost/fuel".to_owned()),
            ),
            ("FUEL_TRACKER_REDIS_URL", Some("redis://localhost:6379".to_owned())),
            ("FUEL_TRACKER_CACHE_TTL_SECONDS", Some("60".to_owned())),
            ("FUEL_TRACKER_DB_POOL_MAX_SIZE", Some("4".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("address parses"),
            SocketAddr::from(([127, 0, 0, 1], 9000))
        );
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://fuel@localhost/fuel")
        );
        assert_eq!(settings.redis_url.as_deref(), Some("redis://localhost:6379"));
        assert_eq!(settings.cache_ttl(), Duration::from_secs(60));
        assert_eq!(settings.db_pool_max_size(), 4);
    }

    #[rstest]
    fn malformed_bind_addr_is_reported() {
        let _guard = lock_env(VARS.map(|name| {
            let value = (name == "FUEL_TRACKER_BIND_ADDR").then(|| "not-an-address".to_owned());
            (name, value)
        }));

        let settings = load_from_empty_args();
        assert!(settings.bind_addr().is_err());
    }
}
