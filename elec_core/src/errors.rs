//! # Error Types
//!
//! Structured error types for elec_core. A failed calculation returns one of
//! these in place of its result record, so callers check the `Err` arm before
//! reading any numeric field.
//!
//! ## Example
//!
//! ```rust
//! use elec_core::errors::{CalcError, CalcResult};
//!
//! fn validate_voltage(voltage: f64) -> CalcResult<()> {
//!     if !(voltage > 0.0) {
//!         return Err(CalcError::invalid_input(
//!             "voltage",
//!             voltage.to_string(),
//!             "Voltage must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_voltage(0.0).unwrap_err().is_validation());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for elec_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, non-finite, empty list, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Conductor material is not tabulated for the wire size (14 AWG aluminum)
    #[error("Unsupported conductor: {conductor} is not available in size {wire_size}")]
    UnsupportedConductor { wire_size: String, conductor: String },

    /// A code table has no entry for the key
    #[error("No entry in {table} for key {key}")]
    TableLookup { table: String, key: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnsupportedConductor error
    pub fn unsupported_conductor(wire_size: impl Into<String>, conductor: impl Into<String>) -> Self {
        CalcError::UnsupportedConductor {
            wire_size: wire_size.into(),
            conductor: conductor.into(),
        }
    }

    /// Create a TableLookup error
    pub fn table_lookup(table: impl Into<String>, key: impl Into<String>) -> Self {
        CalcError::TableLookup {
            table: table.into(),
            key: key.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// True for errors caused by bad caller input (the validation class).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. }
                | CalcError::UnsupportedConductor { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::UnsupportedConductor { .. } => "UNSUPPORTED_CONDUCTOR",
            CalcError::TableLookup { .. } => "TABLE_LOOKUP",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::serialization(err.to_string())
    }
}

/// Reject NaN and infinities with a field-specific error.
pub(crate) fn require_finite(field: &str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), "Value must be a finite number"))
    }
}

/// Finite and >= 0.
pub(crate) fn require_non_negative(field: &str, value: f64) -> CalcResult<f64> {
    require_finite(field, value)?;
    if value < 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value cannot be negative"));
    }
    Ok(value)
}

/// Finite and > 0.
pub(crate) fn require_positive(field: &str, value: f64) -> CalcResult<f64> {
    require_finite(field, value)?;
    if value <= 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value must be positive"));
    }
    Ok(value)
}
