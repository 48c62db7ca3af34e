//! PostgreSQL-backed `AirplaneRepository` implementation using Diesel ORM.
//!
//! Deleting an airplane relies on the `ON DELETE CASCADE` foreign key of
//! `fuel_calculation_results` to remove its history in the same statement.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AirplaneRepository, AirplaneRepositoryError};
use crate::domain::{Airplane, AirplaneId};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error, map_row_error,
};
use super::models::{AirplaneRow, AirplaneValues, RowError};
use super::pool::{DbPool, PoolError};
use super::schema::airplanes;

/// Diesel-backed implementation of the airplane repository port.
#[derive(Clone)]
pub struct DieselAirplaneRepository {
    pool: DbPool,
}

impl DieselAirplaneRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AirplaneRepositoryError {
    map_basic_pool_error(error, |message| AirplaneRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> AirplaneRepositoryError {
    map_basic_diesel_error(
        error,
        AirplaneRepositoryError::query,
        AirplaneRepositoryError::connection,
    )
}

fn map_row(error: RowError) -> AirplaneRepositoryError {
    map_row_error(error, |message| AirplaneRepositoryError::query(message))
}

fn to_domain(row: AirplaneRow) -> Result<Airplane, AirplaneRepositoryError> {
    Airplane::try_from(row).map_err(map_row)
}

#[async_trait]
impl AirplaneRepository for DieselAirplaneRepository {
    async fn list(&self) -> Result<Vec<Airplane>, AirplaneRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<AirplaneRow> = airplanes::table
            .order(airplanes::airplane_id.asc())
            .select(AirplaneRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(to_domain).collect()
    }

    async fn find_by_airplane_id(
        &self,
        airplane_id: AirplaneId,
    ) -> Result<Option<Airplane>, AirplaneRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<AirplaneRow> = airplanes::table
            .find(i64::from(airplane_id.get()))
            .select(AirplaneRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(to_domain).transpose()
    }

    async fn create(&self, airplane: &Airplane) -> Result<(), AirplaneRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(airplanes::table)
            .values(AirplaneValues::from(airplane))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation(&err) {
                    AirplaneRepositoryError::duplicate(airplane.airplane_id().get())
                } else {
                    map_diesel_error(err)
                }
            })
    }

    async fn update(&self, airplane: &Airplane) -> Result<bool, AirplaneRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(airplanes::table.find(i64::from(airplane.airplane_id().get())))
            .set(AirplaneValues::from(airplane))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(updated > 0)
    }

    async fn delete(&self, airplane_id: AirplaneId) -> Result<bool, AirplaneRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(airplanes::table.find(i64::from(airplane_id.get())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
