//! Fuel tracker entry-point: loads settings, prepares adapters and serves the
//! REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use fuel_tracker::inbound::http::health::HealthState;
use fuel_tracker::outbound::cache::RedisCalculationCache;
use fuel_tracker::outbound::persistence::{DbPool, PoolConfig, apply_migrations};
use fuel_tracker::settings::ServerSettings;
use ortho_config::OrthoConfig;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().wrap_err("failed to load server settings")?;
    let bind_addr = settings
        .bind_addr()
        .wrap_err("invalid FUEL_TRACKER_BIND_ADDR")?;

    let mut config = ServerConfig::new(bind_addr).with_cache_ttl(settings.cache_ttl());

    if let Some(database_url) = settings.database_url.clone() {
        let migration_url = database_url.clone();
        let applied = tokio::task::spawn_blocking(move || apply_migrations(&migration_url))
            .await
            .wrap_err("migration task panicked")?
            .wrap_err("failed to apply database migrations")?;
        info!(applied, "database migrations up to date");

        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.db_pool_max_size()),
        )
        .await
        .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }

    if let Some(redis_url) = settings.redis_url.as_deref() {
        let cache = RedisCalculationCache::connect(redis_url)
            .await
            .wrap_err("failed to connect to Redis")?;
        config = config.with_redis_cache(cache);
    }

    #[cfg(feature = "metrics")]
    {
        config = config.with_metrics(Some(server::build_metrics()?));
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "fuel tracker listening");
    server.await?;
    Ok(())
}
