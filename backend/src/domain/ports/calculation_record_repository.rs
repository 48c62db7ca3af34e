//! Port for the append-only calculation history.

use async_trait::async_trait;

use crate::domain::{FuelCalculationRecord, NewFuelCalculationRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by calculation record repository adapters.
    pub enum CalculationRecordRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "calculation record repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "calculation record repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalculationRecordRepository: Send + Sync {
    /// Append a record and return its id.
    async fn create(
        &self,
        record: &NewFuelCalculationRecord,
    ) -> Result<i64, CalculationRecordRepositoryError>;

    /// All records, newest first.
    async fn list(&self) -> Result<Vec<FuelCalculationRecord>, CalculationRecordRepositoryError>;

    /// Fetch a single record by id.
    async fn find_by_id(
        &self,
        id: i64,
    ) -> Result<Option<FuelCalculationRecord>, CalculationRecordRepositoryError>;
}
