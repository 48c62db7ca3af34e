//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{AirplaneId, Error};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    OutOfRange,
    Mismatch,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::OutOfRange => "out_of_range",
            ErrorCode::Mismatch => "mismatch",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

pub(crate) const AIRPLANE_ID: FieldName = FieldName::new("airplane_id");
pub(crate) const MAX_PASSENGERS: FieldName = FieldName::new("max_passengers");
pub(crate) const PASSENGERS: FieldName = FieldName::new("passengers");

fn field_error(field: FieldName, code: ErrorCode, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ErrorCode::MissingField,
        format!("missing required field: {name}"),
    )
}

/// Require `value` to be present and within `min..=u32::MAX`.
pub(crate) fn require_u32(value: Option<i64>, field: FieldName, min: u32) -> Result<u32, Error> {
    let raw = value.ok_or_else(|| missing_field_error(field))?;
    parse_u32(raw, field, min)
}

pub(crate) fn parse_u32(raw: i64, field: FieldName, min: u32) -> Result<u32, Error> {
    u32::try_from(raw)
        .ok()
        .filter(|value| *value >= min)
        .ok_or_else(|| {
            let name = field.as_str();
            let message = match min {
                0 => format!("{name} must be a non-negative integer"),
                1 => format!("{name} must be a positive integer"),
                _ => format!("{name} must be at least {min}"),
            };
            field_error(field, ErrorCode::OutOfRange, message)
        })
}

/// Resolve the `{airplane_id}` path segment.
///
/// Zero can never name a stored airplane, so it reports as not found.
pub(crate) fn path_airplane_id(raw: u32) -> Result<AirplaneId, Error> {
    AirplaneId::new(raw).map_err(|_| Error::not_found(format!("Airplane {raw} not found")))
}

/// Reject a body `airplane_id` that disagrees with the path.
pub(crate) fn ensure_matching_airplane_id(
    path: AirplaneId,
    body: Option<i64>,
) -> Result<(), Error> {
    match body {
        Some(value) if value != i64::from(path.get()) => Err(field_error(
            AIRPLANE_ID,
            ErrorCode::Mismatch,
            "airplane_id cannot be changed".to_owned(),
        )),
        _ => Ok(()),
    }
}
