//! Port for airplane persistence.

use async_trait::async_trait;

use crate::domain::{Airplane, AirplaneId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by airplane repository adapters.
    pub enum AirplaneRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "airplane repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "airplane repository query failed: {message}",
        /// An airplane with the same business identifier already exists.
        Duplicate { airplane_id: u32 } =>
            "airplane {airplane_id} already exists",
    }
}

/// Port for storing and retrieving airplanes by their business identifier.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AirplaneRepository: Send + Sync {
    /// List all airplanes ordered by `airplane_id`.
    async fn list(&self) -> Result<Vec<Airplane>, AirplaneRepositoryError>;

    /// Fetch one airplane; `None` when it does not exist.
    async fn find_by_airplane_id(
        &self,
        airplane_id: AirplaneId,
    ) -> Result<Option<Airplane>, AirplaneRepositoryError>;

    /// Insert a new airplane.
    ///
    /// Fails with [`AirplaneRepositoryError::Duplicate`] when the identifier
    /// is taken.
    async fn create(&self, airplane: &Airplane) -> Result<(), AirplaneRepositoryError>;

    /// Replace the stored attributes. Returns `false` when nothing matched.
    async fn update(&self, airplane: &Airplane) -> Result<bool, AirplaneRepositoryError>;

    /// Delete the airplane and its calculation history. Returns `false` when
    /// nothing matched.
    async fn delete(&self, airplane_id: AirplaneId) -> Result<bool, AirplaneRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn duplicate_error_names_the_airplane() {
        let err = AirplaneRepositoryError::duplicate(7_u32);
        assert_eq!(err.to_string(), "airplane 7 already exists");
    }
}
