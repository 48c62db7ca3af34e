//! In-process repositories for running without PostgreSQL.

mod fleet_store;

pub use fleet_store::InMemoryFleetStore;
