//! # Demand Result
//!
//! The single output record of the range and residential engines. Built once
//! at the end of a calculation and never updated afterwards.
//!
//! Every value is kept at full `f64` precision. Use [`DemandResult::display_demand_va`]
//! and [`DemandResult::display_amps`] for 2-decimal display values.

use serde::{Deserialize, Serialize};

use crate::breaker::BreakerRating;
use crate::numeric::round2;
use crate::trace::RuleTrace;
use crate::units::{Kilowatts, VoltAmperes, Volts};

use super::range::RangeDetail;
use super::residential::ResidentialDetail;

/// Per-group subtotals in VA.
///
/// Groups an engine does not use stay at zero (a range calculation only
/// fills `range_va`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DemandSubtotals {
    /// Floor area, small-appliance and laundry circuits
    pub general_va: f64,
    /// Other fixed loads
    pub other_va: f64,
    /// Heating total (reported even when cooling wins)
    pub heating_va: f64,
    /// Cooling total (reported even when heating wins)
    pub cooling_va: f64,
    /// Larger of heating and cooling
    pub hvac_va: f64,
    /// Motor contributions plus 25% of the largest motor
    pub motor_va: f64,
    /// EV charging, never demand-reduced
    pub ev_va: f64,
    /// Cooking appliance demand
    pub range_va: f64,
}

/// Engine-specific breakdown carried alongside the flat fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "engine")]
pub enum DemandDetail {
    Range(RangeDetail),
    Residential(ResidentialDetail),
}

/// Results from a demand calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "general_va": 0.0,
///   "range_va": 18700.0,
///   "demand_va": 18700.0,
///   "voltage": 240.0,
///   "amps": 77.916,
///   "breaker": { "Standard": 80 },
///   "breaker_label": "80 A",
///   "trace": [{ "rule": "RangeNote1", "detail": "all ratings 14 kW -> +10%" }],
///   "detail": { "engine": "Range", "...": "..." }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandResult {
    #[serde(flatten)]
    pub subtotals: DemandSubtotals,

    /// Final demand load (VA)
    pub demand_va: f64,

    /// Supply voltage used for the current
    pub voltage: f64,

    /// demand_va / voltage
    pub amps: f64,

    /// Suggested overcurrent device
    pub breaker: BreakerRating,

    /// Display label for `breaker`
    pub breaker_label: String,

    /// Rules that fired, in order
    pub trace: RuleTrace,

    pub detail: DemandDetail,
}

impl DemandResult {
    /// Assemble a result. `amps` is derived here so it always equals
    /// `demand_va / voltage`.
    pub(crate) fn new(
        subtotals: DemandSubtotals,
        demand_va: f64,
        voltage: f64,
        breaker: BreakerRating,
        trace: RuleTrace,
        detail: DemandDetail,
    ) -> Self {
        DemandResult {
            subtotals,
            demand_va,
            voltage,
            amps: VoltAmperes(demand_va).current_at(Volts(voltage)).value(),
            breaker,
            breaker_label: breaker.label(),
            trace,
            detail,
        }
    }

    /// Demand in kW
    pub fn demand_kw(&self) -> f64 {
        Kilowatts::from(VoltAmperes(self.demand_va)).value()
    }

    /// Demand VA rounded to 2 decimals
    pub fn display_demand_va(&self) -> f64 {
        round2(self.demand_va)
    }

    /// Current rounded to 2 decimals
    pub fn display_amps(&self) -> f64 {
        round2(self.amps)
    }

    /// Annotation lines for display
    pub fn annotations(&self) -> Vec<String> {
        self.trace.lines()
    }

    /// Range breakdown, if this came from the range engine
    pub fn range_detail(&self) -> Option<&RangeDetail> {
        match &self.detail {
            DemandDetail::Range(detail) => Some(detail),
            DemandDetail::Residential(_) => None,
        }
    }

    /// Residential breakdown, if this came from the residential engine
    pub fn residential_detail(&self) -> Option<&ResidentialDetail> {
        match &self.detail {
            DemandDetail::Residential(detail) => Some(detail),
            DemandDetail::Range(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::range::{self, RangeInput};
    use crate::loads::{ApplianceKind, ApplianceRow};

    fn four_ranges() -> DemandResult {
        range::calculate(&RangeInput {
            label: String::new(),
            appliances: vec![ApplianceRow::new(ApplianceKind::Range, 14.0, 4)],
            voltage: 240.0,
            policy: Default::default(),
        })
        .unwrap()
    }

    #[test]
    fn test_derived_fields() {
        let result = four_ranges();
        assert!((result.amps - result.demand_va / 240.0).abs() < 1e-12);
        assert_eq!(result.display_amps(), 77.92);
        assert_eq!(result.display_demand_va(), 18700.0);
        assert_eq!(result.breaker, BreakerRating::Standard(80));
        assert_eq!(result.breaker_label, "80 A");
        assert!(result.range_detail().is_some());
        assert!(result.residential_detail().is_none());
        assert_eq!(result.subtotals.range_va, result.demand_va);
    }

    #[test]
    fn test_json_shape() {
        let result = four_ranges();
        let value = serde_json::to_value(&result).unwrap();
        // Subtotals are flattened next to the totals
        assert!(value.get("range_va").is_some());
        assert!(value.get("subtotals").is_none());
        assert_eq!(value["breaker_label"], "80 A");
        assert_eq!(value["detail"]["engine"], "Range");

        let restored: DemandResult = serde_json::from_value(value).unwrap();
        assert_eq!(restored.breaker, result.breaker);
        assert_eq!(restored.trace, result.trace);
        assert_eq!(restored.range_detail().map(|d| d.method), result.range_detail().map(|d| d.method));
    }
}
