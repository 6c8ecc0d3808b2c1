//! # Rule Trace
//!
//! Records which code rule fired during a calculation and why. The trace is
//! part of every result so a report can print the reasoning next to the
//! numbers.
//!
//! ```rust
//! use elec_core::trace::{Rule, RuleTrace};
//!
//! let mut trace = RuleTrace::new();
//! trace.record(Rule::RangeNote1, "all ratings 14 kW -> +10%");
//! assert!(trace.fired(Rule::RangeNote1));
//! assert_eq!(trace.lines()[0], "NEC Table 220.55 Note 1: all ratings 14 kW -> +10%");
//! ```

use serde::{Deserialize, Serialize};

use crate::tables::nec_ref;

/// A rule the engines can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    // Cooking appliances
    /// Single wall oven or cooktop at nameplate
    RangeNote5,
    /// Cooktop and up to two wall ovens treated as one range
    RangeNote6,
    /// Columns A/B for appliances 1.75-8.75 kW
    RangeNote3,
    /// Column C maximum demand
    RangeColumnC,
    /// Same-rating ranges over 12 kW
    RangeNote1,
    /// Unequal ratings, averaged with 12 kW floor
    RangeNote2,
    /// Unequal ratings, average of the 12 kW and larger subset only
    RangeNote2Alternate,
    /// Appliances at or below 1.75 kW left out of the table
    RangeBelowTable,

    // Dwelling service
    /// Floor area, small-appliance and laundry circuits
    GeneralLoad,
    /// First block / remainder tiers on the general load
    StandardDemandTiers,
    /// First block / remainder tiers on the combined base
    OptionalDemandTiers,
    /// Larger of heating and cooling
    NoncoincidentHvac,
    /// 25% of the largest motor
    LargestMotor,
    /// EV charging added without demand factor
    EvExcluded,

    // Shared
    /// Breaker sized at 125% of a continuous load
    ContinuousLoadDerate,
    /// Current above the largest standard rating
    BreakerExceedsTable,
    /// Table 9 impedance for a circuit
    Table9Impedance,
}

impl Rule {
    /// Short name used in annotations
    pub fn name(&self) -> &'static str {
        match self {
            Rule::RangeNote5 => "Note 5",
            Rule::RangeNote6 => "Note 6",
            Rule::RangeNote3 => "Note 3",
            Rule::RangeColumnC => "Column C",
            Rule::RangeNote1 => "Note 1",
            Rule::RangeNote2 => "Note 2",
            Rule::RangeNote2Alternate => "Note 2 (alternate averaging)",
            Rule::RangeBelowTable => "Scope",
            Rule::GeneralLoad => "General load",
            Rule::StandardDemandTiers => "Demand factors",
            Rule::OptionalDemandTiers => "Optional demand factors",
            Rule::NoncoincidentHvac => "Noncoincident loads",
            Rule::LargestMotor => "Largest motor",
            Rule::EvExcluded => "EV charging",
            Rule::ContinuousLoadDerate => "Continuous load",
            Rule::BreakerExceedsTable => "Standard ratings",
            Rule::Table9Impedance => "Effective impedance",
        }
    }

    /// Code section the rule comes from
    pub fn reference(&self) -> &'static str {
        match self {
            Rule::RangeNote5
            | Rule::RangeNote6
            | Rule::RangeNote3
            | Rule::RangeColumnC
            | Rule::RangeNote1
            | Rule::RangeNote2
            | Rule::RangeNote2Alternate
            | Rule::RangeBelowTable => nec_ref::TABLE_220_55,
            Rule::GeneralLoad => nec_ref::GENERAL_LIGHTING,
            Rule::StandardDemandTiers => nec_ref::LIGHTING_DEMAND,
            Rule::OptionalDemandTiers => nec_ref::OPTIONAL_DWELLING,
            Rule::NoncoincidentHvac => nec_ref::NONCOINCIDENT,
            Rule::LargestMotor => nec_ref::MOTORS,
            Rule::EvExcluded => nec_ref::EVSE,
            Rule::ContinuousLoadDerate => nec_ref::CONTINUOUS_LOAD,
            Rule::BreakerExceedsTable => nec_ref::STANDARD_RATINGS,
            Rule::Table9Impedance => nec_ref::TABLE_9,
        }
    }
}

/// One fired rule with the values that triggered it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// The rule that fired
    pub rule: Rule,
    /// Human-readable detail ("adjusted average 13.50 kW -> +10%")
    pub detail: String,
}

impl Annotation {
    /// "NEC Table 220.55 Note 1: detail"
    pub fn line(&self) -> String {
        format!("{} {}: {}", self.rule.reference(), self.rule.name(), self.detail)
    }
}

/// Ordered list of rules fired during one calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleTrace {
    annotations: Vec<Annotation>,
}

impl RuleTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an annotation
    pub fn record(&mut self, rule: Rule, detail: impl Into<String>) {
        self.annotations.push(Annotation {
            rule,
            detail: detail.into(),
        });
    }

    /// All annotations in firing order
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Whether a rule fired at least once
    pub fn fired(&self, rule: Rule) -> bool {
        self.annotations.iter().any(|a| a.rule == rule)
    }

    /// Formatted lines for display
    pub fn lines(&self) -> Vec<String> {
        self.annotations.iter().map(Annotation::line).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}
