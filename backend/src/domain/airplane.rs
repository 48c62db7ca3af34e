//! Airplane aggregate and its identifier.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use super::Error as DomainError;

/// Maximum length of an airplane name, in characters.
pub const AIRPLANE_NAME_MAX: usize = 100;

/// Business identifier of an airplane. Always strictly positive.
///
/// # Examples
/// ```
/// use fuel_tracker::domain::AirplaneId;
///
/// assert!(AirplaneId::new(0).is_err());
/// assert_eq!(AirplaneId::new(7).expect("valid id").get(), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct AirplaneId(u32);

impl AirplaneId {
    /// Validate and wrap a raw identifier.
    pub fn new(value: u32) -> Result<Self, AirplaneValidationError> {
        if value == 0 {
            return Err(AirplaneValidationError::ZeroId);
        }
        Ok(Self(value))
    }

    /// Raw identifier value.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for AirplaneId {
    type Error = AirplaneValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AirplaneId> for u32 {
    fn from(value: AirplaneId) -> Self {
        value.0
    }
}

impl fmt::Display for AirplaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation failures for airplane identifiers and attributes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AirplaneValidationError {
    #[error("airplane_id must be a positive integer")]
    ZeroId,
    #[error("name must be at most 100 characters")]
    NameTooLong,
    #[error("max_passengers must be at least 1")]
    NoPassengerCapacity,
}

impl From<AirplaneValidationError> for DomainError {
    fn from(err: AirplaneValidationError) -> Self {
        DomainError::invalid_request(err.to_string())
            .with_details(json!({ "code": "invalid_airplane" }))
    }
}

/// An airplane in the fleet.
///
/// ## Invariants
/// - `name` has at most [`AIRPLANE_NAME_MAX`] characters; it may be empty.
/// - `max_passengers` is at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Airplane {
    airplane_id: AirplaneId,
    name: String,
    max_passengers: u32,
}

impl Airplane {
    /// Build a validated airplane.
    ///
    /// # Examples
    /// ```
    /// use fuel_tracker::domain::{Airplane, AirplaneId};
    ///
    /// let id = AirplaneId::new(1).expect("valid id");
    /// let plane = Airplane::new(id, "Skylark", 180).expect("valid airplane");
    /// assert_eq!(plane.max_passengers(), 180);
    /// assert!(Airplane::new(id, "Skylark", 0).is_err());
    /// ```
    pub fn new(
        airplane_id: AirplaneId,
        name: impl Into<String>,
        max_passengers: u32,
    ) -> Result<Self, AirplaneValidationError> {
        let name = name.into();
        if name.chars().count() > AIRPLANE_NAME_MAX {
            return Err(AirplaneValidationError::NameTooLong);
        }
        if max_passengers == 0 {
            return Err(AirplaneValidationError::NoPassengerCapacity);
        }
        Ok(Self {
            airplane_id,
            name,
            max_passengers,
        })
    }

    pub fn airplane_id(&self) -> AirplaneId {
        self.airplane_id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn max_passengers(&self) -> u32 {
        self.max_passengers
    }

    /// Apply an update, re-validating the result.
    pub fn apply(&self, update: AirplaneUpdate) -> Result<Self, AirplaneValidationError> {
        let AirplaneUpdate {
            name,
            max_passengers,
        } = update;
        Self::new(
            self.airplane_id,
            name.unwrap_or_else(|| self.name.clone()),
            max_passengers.unwrap_or(self.max_passengers),
        )
    }
}

/// Changes applied to an existing airplane. Absent fields are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AirplaneUpdate {
    pub name: Option<String>,
    pub max_passengers: Option<u32>,
}
