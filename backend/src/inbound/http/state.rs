//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureFleetCommand, FixtureFleetQuery, FixtureFuelCalculationCommand, FleetCommand,
    FleetQuery, FuelCalculationCommand,
};

/// Parameter object bundling the port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub fuel_calculation: Arc<dyn FuelCalculationCommand>,
    pub fleet: Arc<dyn FleetCommand>,
    pub fleet_query: Arc<dyn FleetQuery>,
}

impl Default for HttpStatePorts {
    fn default() -> Self {
        Self {
            fuel_calculation: Arc::new(FixtureFuelCalculationCommand),
            fleet: Arc::new(FixtureFleetCommand),
            fleet_query: Arc::new(FixtureFleetQuery),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub fuel_calculation: Arc<dyn FuelCalculationCommand>,
    pub fleet: Arc<dyn FleetCommand>,
    pub fleet_query: Arc<dyn FleetQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use fuel_tracker::domain::ports::FixtureFuelCalculationCommand;
    /// use fuel_tracker::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let state = HttpState::new(HttpStatePorts {
    ///     fuel_calculation: Arc::new(FixtureFuelCalculationCommand),
    ///     ..HttpStatePorts::default()
    /// });
    /// let _calculator = state.fuel_calculation.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            fuel_calculation,
            fleet,
            fleet_query,
        } = ports;
        Self {
            fuel_calculation,
            fleet,
            fleet_query,
        }
    }
}
