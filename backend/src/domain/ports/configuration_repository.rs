//! Port for configuration persistence.
//!
//! Configurations are append-only; the newest one by creation time is the
//! baseline for calculations.

use async_trait::async_trait;

use crate::domain::{Configuration, NewConfiguration};

use super::define_port_error;

define_port_error! {
    /// Errors raised by configuration repository adapters.
    pub enum ConfigurationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "configuration repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "configuration repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConfigurationRepository: Send + Sync {
    /// Most recently created configuration, if any exists.
    async fn latest(&self) -> Result<Option<Configuration>, ConfigurationRepositoryError>;

    /// Fetch a configuration by surrogate id.
    async fn find_by_id(&self, id: i64)
    -> Result<Option<Configuration>, ConfigurationRepositoryError>;

    /// Persist a configuration and return it with its assigned id.
    async fn create(
        &self,
        configuration: &NewConfiguration,
    ) -> Result<Configuration, ConfigurationRepositoryError>;
}
