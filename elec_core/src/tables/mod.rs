//! # Code Tables
//!
//! Immutable lookup data used by the engines. Nothing here has behavior
//! beyond lookup and documented extrapolation.
//!
//! - [`range_columns`] - NEC Table 220.55 Columns A, B and C
//! - [`conductors`] - NEC Chapter 9 Table 9 resistance and reactance
//! - [`breaker_sizes`] - standard overcurrent device ratings
//!
//! Every lookup is total over its key space: counts above the last tabulated
//! row fall back to an explicit band or closed form, never to zero.

pub mod breaker_sizes;
pub mod conductors;
pub mod range_columns;

pub use breaker_sizes::{largest_standard_rating, STANDARD_BREAKER_RATINGS_A};
pub use conductors::{ConductorMaterial, ConduitMaterial, ResistanceReactance, WireSize};
pub use range_columns::{column_a_factor, column_b_factor, column_c_base_kw};

/// Edition of the wiring code the tables are transcribed from.
pub const CODE_EDITION: &str = "NEC 2023";

/// NEC section references used in rule annotations.
pub mod nec_ref {
    /// Cooking appliance demand table
    pub const TABLE_220_55: &str = "NEC Table 220.55";
    /// General lighting load by occupancy
    pub const GENERAL_LIGHTING: &str = "NEC 220.41";
    /// Small-appliance and laundry branch circuits
    pub const SMALL_APPLIANCE_LAUNDRY: &str = "NEC 220.52";
    /// Lighting demand factors
    pub const LIGHTING_DEMAND: &str = "NEC 220.45";
    /// Noncoincident loads
    pub const NONCOINCIDENT: &str = "NEC 220.60";
    /// Motor loads, 125% of largest motor
    pub const MOTORS: &str = "NEC 220.50 / 430.24";
    /// Electric vehicle supply equipment
    pub const EVSE: &str = "NEC 220.57";
    /// Optional dwelling calculation
    pub const OPTIONAL_DWELLING: &str = "NEC 220.82";
    /// Continuous load overcurrent sizing
    pub const CONTINUOUS_LOAD: &str = "NEC 210.20(A)";
    /// Standard ampere ratings
    pub const STANDARD_RATINGS: &str = "NEC 240.6(A)";
    /// AC resistance and reactance
    pub const TABLE_9: &str = "NEC Chapter 9 Table 9";
}
