//! HTTP inbound adapter exposing REST endpoints.

pub mod airplanes;
pub mod configurations;
pub mod error;
pub mod health;
pub mod results;
pub mod schemas;
pub mod state;
pub mod validation;

pub use error::ApiResult;
