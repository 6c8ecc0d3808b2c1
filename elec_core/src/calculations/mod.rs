//! # Load Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(&input) -> CalcResult<*Result>` - Pure calculation function
//!
//! No engine depends on another. All of them read the same immutable code
//! tables, so separate calculations can run in any order or in parallel.
//!
//! ## Available Calculations
//!
//! - [`range`] - Cooking appliance demand (Table 220.55)
//! - [`residential`] - Dwelling service demand (Article 220)
//! - [`voltage_drop`] - Circuit voltage drop (Chapter 9 Table 9)

pub mod demand_result;
pub mod range;
pub mod residential;
pub mod voltage_drop;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;

// Re-export commonly used types
pub use demand_result::{DemandDetail, DemandResult, DemandSubtotals};
pub use range::{RangeDetail, RangeInput, RangeMethod, RangePolicy};
pub use residential::{
    CalculationMethod, DemandTable, GeneralLoad, OptionalMotorHandling, ResidentialDetail, ResidentialInput,
};
pub use voltage_drop::{CircuitResult, CircuitSpec, VoltageDropInput, VoltageDropResult};

/// Enum wrapper for all calculation types.
///
/// Lets a project hold heterogeneous calculations in one collection while
/// keeping a clean tagged serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Cooking appliance demand
    Range(RangeInput),
    /// Dwelling service demand
    Residential(ResidentialInput),
    /// Circuit voltage drop
    VoltageDrop(VoltageDropInput),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::Range(r) => &r.label,
            CalculationItem::Residential(r) => &r.label,
            CalculationItem::VoltageDrop(v) => &v.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::Range(_) => "Range",
            CalculationItem::Residential(_) => "Residential",
            CalculationItem::VoltageDrop(_) => "VoltageDrop",
        }
    }

    /// Run the matching engine
    pub fn calculate(&self) -> CalcResult<CalculationOutput> {
        match self {
            CalculationItem::Range(input) => range::calculate(input).map(CalculationOutput::Demand),
            CalculationItem::Residential(input) => residential::calculate(input).map(CalculationOutput::Demand),
            CalculationItem::VoltageDrop(input) => voltage_drop::calculate(input).map(CalculationOutput::VoltageDrop),
        }
    }
}

/// Result of any calculation item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "result")]
pub enum CalculationOutput {
    Demand(DemandResult),
    VoltageDrop(VoltageDropResult),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::{ApplianceKind, ApplianceRow};

    #[test]
    fn test_item_tagged_serialization() {
        let item = CalculationItem::Range(RangeInput {
            label: "Kitchen".to_string(),
            appliances: vec![ApplianceRow::new(ApplianceKind::Range, 12.0, 1)],
            voltage: 240.0,
            policy: RangePolicy::default(),
        });
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"type\":\"Range\""));
        let roundtrip: CalculationItem = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, item);
        assert_eq!(roundtrip.label(), "Kitchen");
        assert_eq!(roundtrip.calc_type(), "Range");
    }

    #[test]
    fn test_dispatch() {
        let item = CalculationItem::VoltageDrop(VoltageDropInput {
            label: "Feeders".to_string(),
            unit_system: Default::default(),
            circuits: vec![],
        });
        match item.calculate().unwrap() {
            CalculationOutput::VoltageDrop(result) => assert!(result.circuits.is_empty()),
            other => panic!("unexpected output {:?}", other),
        }
    }
}
