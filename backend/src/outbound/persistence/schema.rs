//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` when the migrations change.

diesel::table! {
    /// Registered airplanes keyed by their business identifier.
    airplanes (airplane_id) {
        /// Positive business identifier; also drives the calculation.
        airplane_id -> Int8,
        /// Display name (max 100 characters, may be empty).
        name -> Varchar,
        /// Passenger capacity, at least 1.
        max_passengers -> Int8,
    }
}

diesel::table! {
    /// Baseline configurations. The newest row is the active one.
    fuel_configurations (id) {
        id -> Int8,
        fuel_capacity_multiplier -> Float8,
        /// `10` or `e`.
        log_base -> Varchar,
        passenger_fuel_impact -> Float8,
        fuel_consumption_coefficient -> Float8,
        /// `minute`, `hour` or `day`.
        time_unit -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only calculation history.
    fuel_calculation_results (id) {
        id -> Int8,
        /// Owning airplane; rows cascade on airplane deletion.
        airplane_id -> Int8,
        passengers -> Int8,
        fuel_capacity -> Float8,
        fuel_consumption_per_minute -> Float8,
        flight_duration -> Float8,
        time_unit -> Varchar,
        /// Effective configuration used for the calculation.
        configuration_snapshot -> Jsonb,
        calculated_at -> Timestamptz,
    }
}

diesel::joinable!(fuel_calculation_results -> airplanes (airplane_id));

diesel::allow_tables_to_appear_in_same_query!(airplanes, fuel_calculation_results);
