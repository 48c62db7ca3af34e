//! PostgreSQL-backed `CalculationRecordRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CalculationRecordRepository, CalculationRecordRepositoryError};
use crate::domain::{FuelCalculationRecord, NewFuelCalculationRecord};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, map_row_error,
};
use super::models::{CalculationRecordRow, NewCalculationRecordRow, RowError};
use super::pool::{DbPool, PoolError};
use super::schema::fuel_calculation_results;

/// Diesel-backed implementation of the calculation history port.
#[derive(Clone)]
pub struct DieselCalculationRecordRepository {
    pool: DbPool,
}

impl DieselCalculationRecordRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CalculationRecordRepositoryError {
    map_basic_pool_error(error, |message| CalculationRecordRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> CalculationRecordRepositoryError {
    map_basic_diesel_error(
        error,
        CalculationRecordRepositoryError::query,
        CalculationRecordRepositoryError::connection,
    )
}

fn map_row(error: RowError) -> CalculationRecordRepositoryError {
    map_row_error(error, |message| CalculationRecordRepositoryError::query(message))
}

fn to_domain(
    row: CalculationRecordRow,
) -> Result<FuelCalculationRecord, CalculationRecordRepositoryError> {
    FuelCalculationRecord::try_from(row).map_err(map_row)
}

#[async_trait]
impl CalculationRecordRepository for DieselCalculationRecordRepository {
    async fn create(
        &self,
        record: &NewFuelCalculationRecord,
    ) -> Result<i64, CalculationRecordRepositoryError> {
        let values = NewCalculationRecordRow::try_from(record).map_err(map_row)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(fuel_calculation_results::table)
            .values(values)
            .returning(fuel_calculation_results::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn list(&self) -> Result<Vec<FuelCalculationRecord>, CalculationRecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CalculationRecordRow> = fuel_calculation_results::table
            .order((
                fuel_calculation_results::calculated_at.desc(),
                fuel_calculation_results::id.desc(),
            ))
            .select(CalculationRecordRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(to_domain).collect()
    }

    async fn find_by_id(
        &self,
        id: i64,
    ) -> Result<Option<FuelCalculationRecord>, CalculationRecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CalculationRecordRow> = fuel_calculation_results::table
            .find(id)
            .select(CalculationRecordRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(to_domain).transpose()
    }
}
