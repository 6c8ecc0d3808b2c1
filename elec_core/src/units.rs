//! # Unit Types
//!
//! Type-safe wrappers for the electrical quantities the engines pass around.
//! Like the rest of the crate they serialize as bare numbers.
//!
//! ## Conventions
//!
//! - Power: volt-amperes (VA) for dwelling loads, kilowatts (kW) for cooking
//!   appliance nameplates. Table 220.55 treats kW and kVA as equivalent, so
//!   `Kilowatts` converts to `VoltAmperes` by a factor of 1000.
//! - Length: metres or feet, selected by [`UnitSystem`]. Impedance tables are
//!   per 1000 of the chosen unit (Ω/km or Ω/1000 ft).
//! - Area: square metres or square feet, selected by [`AreaUnit`].
//!
//! ## Example
//!
//! ```rust
//! use elec_core::units::{Feet, Kilowatts, Meters, VoltAmperes};
//!
//! let rating = Kilowatts(12.0);
//! let va: VoltAmperes = rating.into();
//! assert_eq!(va.0, 12_000.0);
//!
//! let run: Feet = Meters(10.0).into();
//! assert!((run.0 - 32.8084).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Feet in one metre.
pub const FEET_PER_METER: f64 = 3.28084;

// ============================================================================
// Electrical Units
// ============================================================================

/// Potential in volts
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Volts(pub f64);

/// Current in amperes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amperes(pub f64);

/// Apparent power in volt-amperes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoltAmperes(pub f64);

/// Power in kilowatts
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilowatts(pub f64);

impl From<Kilowatts> for VoltAmperes {
    fn from(kw: Kilowatts) -> Self {
        VoltAmperes(kw.0 * 1000.0)
    }
}

impl From<VoltAmperes> for Kilowatts {
    fn from(va: VoltAmperes) -> Self {
        Kilowatts(va.0 / 1000.0)
    }
}

impl VoltAmperes {
    /// Line current drawn at the given voltage, I = S / V
    pub fn current_at(self, voltage: Volts) -> Amperes {
        Amperes(self.0 / voltage.0)
    }
}

// ============================================================================
// Length Units
// ============================================================================

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

impl From<Meters> for Feet {
    fn from(m: Meters) -> Self {
        Feet(m.0 * FEET_PER_METER)
    }
}

impl From<Feet> for Meters {
    fn from(ft: Feet) -> Self {
        Meters(ft.0 / FEET_PER_METER)
    }
}

// ============================================================================
// Unit Systems
// ============================================================================

/// Measurement system for circuit lengths and the impedance table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UnitSystem {
    /// Metres; impedance in Ω/km
    #[default]
    Metric,
    /// Feet; impedance in Ω/1000 ft
    Imperial,
}

impl UnitSystem {
    /// All unit systems for UI selection
    pub const ALL: [UnitSystem; 2] = [UnitSystem::Metric, UnitSystem::Imperial];

    /// Length unit symbol
    pub fn length_symbol(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "m",
            UnitSystem::Imperial => "ft",
        }
    }

    /// Impedance unit for the table column this system selects
    pub fn impedance_symbol(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "Ω/km",
            UnitSystem::Imperial => "Ω/1000 ft",
        }
    }

    /// Convert a length expressed in `self` into `target`.
    ///
    /// Identity when the systems match, so switching back and forth only
    /// accumulates floating-point rounding.
    pub fn convert_length(&self, length: f64, target: UnitSystem) -> f64 {
        match (self, target) {
            (UnitSystem::Metric, UnitSystem::Imperial) => Feet::from(Meters(length)).0,
            (UnitSystem::Imperial, UnitSystem::Metric) => Meters::from(Feet(length)).0,
            _ => length,
        }
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitSystem::Metric => write!(f, "Metric"),
            UnitSystem::Imperial => write!(f, "Imperial"),
        }
    }
}

/// Unit of the dwelling floor area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AreaUnit {
    /// Square metres
    #[default]
    SquareMeters,
    /// Square feet
    SquareFeet,
}

impl AreaUnit {
    /// Display symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            AreaUnit::SquareMeters => "m²",
            AreaUnit::SquareFeet => "ft²",
        }
    }

    /// General lighting load rate customarily used with this unit (VA per unit area)
    pub fn default_va_rate(&self) -> f64 {
        match self {
            AreaUnit::SquareMeters => 33.0,
            AreaUnit::SquareFeet => 3.0,
        }
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Volts);
impl_arithmetic!(Amperes);
impl_arithmetic!(VoltAmperes);
impl_arithmetic!(Kilowatts);
impl_arithmetic!(Meters);
impl_arithmetic!(Feet);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kilowatts_to_va() {
        let va: VoltAmperes = Kilowatts(6.5).into();
        assert_eq!(va.0, 6500.0);
        let back: Kilowatts = va.into();
        assert_eq!(back.0, 6.5);
    }

    #[test]
    fn test_current_at() {
        let amps = VoltAmperes(6500.0).current_at(Volts(230.0));
        assert!((amps.0 - 28.26).abs() < 0.01);
    }

    #[test]
    fn test_length_round_trip() {
        let original = 37.3;
        let ft = UnitSystem::Metric.convert_length(original, UnitSystem::Imperial);
        let m = UnitSystem::Imperial.convert_length(ft, UnitSystem::Metric);
        assert!(((m - original) / original).abs() < 1e-12);
        assert_eq!(UnitSystem::Metric.convert_length(original, UnitSystem::Metric), original);
    }

    #[test]
    fn test_arithmetic() {
        let a = VoltAmperes(3000.0);
        let b = VoltAmperes(1500.0);
        assert_eq!((a + b).0, 4500.0);
        assert_eq!((a - b).0, 1500.0);
        assert_eq!((a * 0.35).0, 1050.0);
        assert_eq!((a / 2.0).value(), 1500.0);
    }

    #[test]
    fn test_serialization() {
        let v = Volts(240.0);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "240.0");
        let system: UnitSystem = serde_json::from_str("\"Imperial\"").unwrap();
        assert_eq!(system, UnitSystem::Imperial);
    }
}
