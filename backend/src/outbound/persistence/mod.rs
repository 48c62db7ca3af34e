//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the airplane, configuration and calculation
//! history ports, backed by PostgreSQL via `diesel-async` and `bb8`.
//!
//! - **Thin adapters**: repositories translate between Diesel rows and domain
//!   types. No business logic resides here.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: database failures map onto each port's error
//!   enum; corrupt rows surface as query errors.
//!
//! # Example
//!
//! ```ignore
//! use fuel_tracker::outbound::persistence::{DbPool, DieselAirplaneRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/fuel")).await?;
//! let airplanes = DieselAirplaneRepository::new(pool);
//! ```

mod diesel_airplane_repository;
mod diesel_basic_error_mapping;
mod diesel_calculation_record_repository;
mod diesel_configuration_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_airplane_repository::DieselAirplaneRepository;
pub use diesel_calculation_record_repository::DieselCalculationRecordRepository;
pub use diesel_configuration_repository::DieselConfigurationRepository;
pub use migrations::{MIGRATIONS, MigrationError, apply_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
