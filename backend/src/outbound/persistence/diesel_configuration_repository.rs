//! PostgreSQL-backed `ConfigurationRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ConfigurationRepository, ConfigurationRepositoryError};
use crate::domain::{Configuration, NewConfiguration};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, map_row_error,
};
use super::models::{ConfigurationRow, NewConfigurationRow, RowError};
use super::pool::{DbPool, PoolError};
use super::schema::fuel_configurations;

/// Diesel-backed implementation of the configuration repository port.
///
/// The latest configuration is the one with the newest `created_at`; ties
/// are broken by the larger surrogate id.
#[derive(Clone)]
pub struct DieselConfigurationRepository {
    pool: DbPool,
}

impl DieselConfigurationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ConfigurationRepositoryError {
    map_basic_pool_error(error, |message| ConfigurationRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> ConfigurationRepositoryError {
    map_basic_diesel_error(
        error,
        ConfigurationRepositoryError::query,
        ConfigurationRepositoryError::connection,
    )
}

fn map_row(error: RowError) -> ConfigurationRepositoryError {
    map_row_error(error, |message| ConfigurationRepositoryError::query(message))
}

fn to_domain(row: ConfigurationRow) -> Result<Configuration, ConfigurationRepositoryError> {
    Configuration::try_from(row).map_err(map_row)
}

#[async_trait]
impl ConfigurationRepository for DieselConfigurationRepository {
    async fn latest(&self) -> Result<Option<Configuration>, ConfigurationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ConfigurationRow> = fuel_configurations::table
            .order((
                fuel_configurations::created_at.desc(),
                fuel_configurations::id.desc(),
            ))
            .select(ConfigurationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(to_domain).transpose()
    }

    async fn find_by_id(
        &self,
        id: i64,
    ) -> Result<Option<Configuration>, ConfigurationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ConfigurationRow> = fuel_configurations::table
            .find(id)
            .select(ConfigurationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(to_domain).transpose()
    }

    async fn create(
        &self,
        configuration: &NewConfiguration,
    ) -> Result<Configuration, ConfigurationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: ConfigurationRow = diesel::insert_into(fuel_configurations::table)
            .values(NewConfigurationRow::from(configuration))
            .returning(ConfigurationRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        to_domain(row)
    }
}
