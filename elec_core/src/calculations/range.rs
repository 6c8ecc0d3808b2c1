//! # Cooking Appliance Demand
//!
//! Household range, wall oven and cooktop demand per NEC Table 220.55 and its
//! Notes.
//!
//! ## Procedure
//!
//! 1. Expand `{kind, kw, qty}` rows into single appliances and validate them.
//! 2. **Note 5**: one wall oven or one cooktop alone is taken at nameplate.
//! 3. **Note 6** (policy): one or more cooktops with at most two wall ovens
//!    are merged into one range rated at their sum.
//! 4. Split into small (1.75 kW < rating ≤ 8.75 kW) and large (> 8.75 kW).
//!    When everything is small, Note 3 applies regardless of policy.
//! 5. **Note 3**: small appliances use Column A (< 3.5 kW) and Column B
//!    (≥ 3.5 kW), each factor looked up by that subset's own count.
//! 6. **Column C**: the large subset (or the whole set when Note 3 is not
//!    splitting) gets the Column C maximum demand, increased by Note 1 or
//!    Note 2 for ratings above 12 kW.
//!
//! ## Example
//!
//! ```rust
//! use elec_core::calculations::range::{calculate, RangeInput};
//! use elec_core::loads::{ApplianceKind, ApplianceRow};
//!
//! let input = RangeInput {
//!     label: "Unit kitchens".to_string(),
//!     appliances: vec![ApplianceRow::new(ApplianceKind::Range, 14.0, 4)],
//!     voltage: 240.0,
//!     policy: Default::default(),
//! };
//! let result = calculate(&input).unwrap();
//! assert!((result.demand_kw() - 18.7).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::breaker::{suggest_breaker, BreakerRating};
use crate::errors::{require_positive, CalcResult};
use crate::loads::appliance::{
    expand, total_kw, ApplianceKind, ApplianceRating, ApplianceRow, NOTE_REFERENCE_KW, SMALL_LOWER_KW,
    SMALL_UPPER_KW,
};
use crate::numeric::{all_equal, kw_increments_above, round2};
use crate::tables::range_columns::{column_a_factor, column_b_factor, column_c_base_kw};
use crate::trace::{Rule, RuleTrace};
use crate::units::{Kilowatts, VoltAmperes, Volts};

use super::demand_result::{DemandDetail, DemandResult, DemandSubtotals};

/// Percent increase per kW (or major fraction) above 12 kW, Notes 1 and 2.
const INCREASE_PER_KW: f64 = 0.05;

/// Policy toggles for the Notes that leave room for judgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RangePolicy {
    /// Route 1.75-8.75 kW appliances through Columns A/B instead of Column C
    pub apply_note3_to_small: bool,
    /// Treat cooktops with up to two wall ovens as one range (Note 6)
    pub combine_cooktop_and_ovens: bool,
    /// Note 2 average over the ≥ 12 kW appliances only (non-standard)
    pub alternate_note2_averaging: bool,
}

impl Default for RangePolicy {
    fn default() -> Self {
        RangePolicy {
            apply_note3_to_small: true,
            combine_cooktop_and_ovens: true,
            alternate_note2_averaging: false,
        }
    }
}

/// Input parameters for a cooking appliance demand calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Apartment block",
///   "appliances": [
///     { "kind": "Range", "kw": 12.0, "qty": 3 },
///     { "kind": "Cooktop", "kw": 6.0, "qty": 1 }
///   ],
///   "voltage": 240.0,
///   "policy": { "apply_note3_to_small": true }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RangeInput {
    /// User label (e.g., "Unit 4B kitchen")
    #[serde(default)]
    pub label: String,

    /// Appliance rows before quantity expansion
    pub appliances: Vec<ApplianceRow>,

    /// Supply voltage
    pub voltage: f64,

    #[serde(default)]
    pub policy: RangePolicy,
}

impl RangeInput {
    /// Validate the scalar fields. Appliance ratings are checked during expansion.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("voltage", self.voltage)?;
        Ok(())
    }
}

/// How the demand was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeMethod {
    /// Single wall oven or cooktop at nameplate
    Note5Nameplate,
    /// Every appliance small, Columns A/B applied to all and Column C also
    /// counted over the whole set
    AllSmallNote3,
    /// Small appliances on Columns A/B, the rest on Column C
    SplitNote3ColumnC,
    /// Everything on Column C
    ColumnCOnly,
}

impl RangeMethod {
    pub fn display_name(&self) -> &'static str {
        match self {
            RangeMethod::Note5Nameplate => "Note 5: single wall oven or cooktop at nameplate rating",
            RangeMethod::AllSmallNote3 => {
                "All appliances small: Note 3 applied to all (Columns A/B), plus Column C over the whole set"
            }
            RangeMethod::SplitNote3ColumnC => "Small appliances to Columns A/B, others to Column C",
            RangeMethod::ColumnCOnly => "All appliances to Column C (no Note 3)",
        }
    }
}

impl std::fmt::Display for RangeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One demand-factor column applied to a subset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnSubtotal {
    pub count: u32,
    /// Sum of nameplate ratings (kW)
    pub sum_kw: f64,
    pub factor: f64,
    /// sum_kw × factor
    pub demand_kw: f64,
}

impl ColumnSubtotal {
    fn new(appliances: &[ApplianceRating], factor_for: fn(u32) -> f64) -> Self {
        let count = appliances.len() as u32;
        let sum_kw = total_kw(appliances);
        let factor = factor_for(count);
        ColumnSubtotal {
            count,
            sum_kw,
            factor,
            demand_kw: sum_kw * factor,
        }
    }
}

/// Note 3 demand for the small appliances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SmallGroupDemand {
    pub column_a: ColumnSubtotal,
    pub column_b: ColumnSubtotal,
    /// Connected kW of the small group
    pub total_kw: f64,
    /// Column A demand + Column B demand
    pub demand_kw: f64,
}

/// Increase applied on top of the Column C base.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ColumnCAdjustment {
    /// No Note applies
    None,
    /// Same ratings above 12 kW
    Note1 { rating_kw: f64, increments: u32 },
    /// Unequal ratings, 12 kW substituted for smaller ones
    Note2 { average_kw: f64, increments: u32 },
    /// Unequal ratings, averaged over the ≥ 12 kW appliances only.
    /// `average_kw` is `None` when no appliance reaches 12 kW.
    Note2Alternate { average_kw: Option<f64>, increments: u32 },
}

impl ColumnCAdjustment {
    /// Whole 5% steps applied
    pub fn increments(&self) -> u32 {
        match self {
            ColumnCAdjustment::None => 0,
            ColumnCAdjustment::Note1 { increments, .. }
            | ColumnCAdjustment::Note2 { increments, .. }
            | ColumnCAdjustment::Note2Alternate { increments, .. } => *increments,
        }
    }

    /// Multiplier on the Column C base
    pub fn factor(&self) -> f64 {
        1.0 + INCREASE_PER_KW * f64::from(self.increments())
    }

    /// Human-readable summary, e.g. "adjusted average 13.50 kW -> +10%"
    pub fn note(&self) -> String {
        match self {
            ColumnCAdjustment::None => "no adjustment".to_string(),
            ColumnCAdjustment::Note1 { rating_kw, increments } => {
                format!("all ratings {} kW -> +{}%", rating_kw, increments * 5)
            }
            ColumnCAdjustment::Note2 { average_kw, increments } => {
                format!("adjusted average {:.2} kW -> {}", average_kw, increase_text(*increments))
            }
            ColumnCAdjustment::Note2Alternate { average_kw: Some(avg), increments } => {
                format!("average of ratings >= 12 kW {:.2} kW -> {}", avg, increase_text(*increments))
            }
            ColumnCAdjustment::Note2Alternate { average_kw: None, .. } => {
                "no appliances >= 12 kW -> no increase".to_string()
            }
        }
    }
}

fn increase_text(increments: u32) -> String {
    if increments == 0 {
        "no increase".to_string()
    } else {
        format!("+{}%", increments * 5)
    }
}

/// Column C block of the calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnCDemand {
    /// Appliances counted in Column C
    pub count: u32,
    /// Column C maximum demand before adjustment (kW)
    pub base_kw: f64,
    pub adjustment: ColumnCAdjustment,
    /// base_kw × adjustment factor
    pub demand_kw: f64,
}

impl ColumnCDemand {
    pub fn factor(&self) -> f64 {
        self.adjustment.factor()
    }
}

/// Breakdown of a range calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeDetail {
    pub method: RangeMethod,
    /// Whether Note 6 merged cooktops and wall ovens
    pub combined_note6: bool,
    /// Working set after expansion and Note 6
    pub ratings: Vec<ApplianceRating>,
    /// Appliances ≤ 1.75 kW left out of Columns A/B and C
    pub excluded: Vec<ApplianceRating>,
    /// Columns A/B, when Note 3 applied
    pub small: Option<SmallGroupDemand>,
    /// Column C, when anything was counted there
    pub column_c: Option<ColumnCDemand>,
    /// Total demand (kW)
    pub demand_kw: f64,
}

/// Calculate cooking appliance demand.
///
/// # Errors
///
/// * `InvalidInput` for a non-positive voltage, an empty expansion, or any
///   rating that is non-finite, ≤ 0 or above 27 kW.
pub fn calculate(input: &RangeInput) -> CalcResult<DemandResult> {
    input.validate()?;
    let expanded = expand(&input.appliances)?;
    for appliance in &expanded {
        trace!(kind = %appliance.kind, kw = appliance.kw, "expanded appliance");
    }

    let mut rules = RuleTrace::new();

    if let [single] = expanded.as_slice() {
        if single.kind != ApplianceKind::Range {
            debug!(kind = %single.kind, kw = single.kw, "Note 5 nameplate rating");
            rules.record(
                Rule::RangeNote5,
                format!("single {} taken at nameplate {} kW", single.kind, single.kw),
            );
            let detail = RangeDetail {
                method: RangeMethod::Note5Nameplate,
                combined_note6: false,
                ratings: expanded.clone(),
                excluded: Vec::new(),
                small: None,
                column_c: None,
                demand_kw: single.kw,
            };
            return Ok(finish(input.voltage, rules, detail));
        }
    }

    let (working, combined_note6) = if input.policy.combine_cooktop_and_ovens {
        combine_note6(expanded, &mut rules)
    } else {
        (expanded, false)
    };

    let small: Vec<ApplianceRating> = working.iter().copied().filter(ApplianceRating::is_small).collect();
    let large: Vec<ApplianceRating> = working.iter().copied().filter(ApplianceRating::is_large).collect();
    let all_small = working.iter().all(ApplianceRating::is_small);
    let split = input.policy.apply_note3_to_small && !all_small;

    let small_demand = if (input.policy.apply_note3_to_small && !small.is_empty()) || all_small {
        if all_small && !input.policy.apply_note3_to_small {
            debug!("all appliances small, Note 3 forced");
        }
        Some(note3_demand(&small, all_small, &mut rules))
    } else {
        None
    };

    let excluded: Vec<ApplianceRating> = if split {
        working.iter().copied().filter(|a| a.kw <= SMALL_LOWER_KW).collect()
    } else {
        Vec::new()
    };
    if !excluded.is_empty() {
        rules.record(
            Rule::RangeBelowTable,
            format!(
                "{} appliance(s) at or below {} kW ({:.2} kW) not counted",
                excluded.len(),
                SMALL_LOWER_KW,
                total_kw(&excluded)
            ),
        );
    }

    let (column_c_set, scope) = if split {
        (large, "large appliances")
    } else if all_small {
        (working.clone(), "whole set, also counted with all appliances small")
    } else {
        (working.clone(), "all appliances")
    };
    let column_c = column_c_demand(&column_c_set, scope, input.policy.alternate_note2_averaging, &mut rules);

    let method = if all_small {
        RangeMethod::AllSmallNote3
    } else if input.policy.apply_note3_to_small {
        RangeMethod::SplitNote3ColumnC
    } else {
        RangeMethod::ColumnCOnly
    };

    let demand_kw = small_demand.map_or(0.0, |s| s.demand_kw) + column_c.map_or(0.0, |c| c.demand_kw);
    debug!(?method, demand_kw, "range demand");

    let detail = RangeDetail {
        method,
        combined_note6,
        ratings: working,
        excluded,
        small: small_demand,
        column_c,
        demand_kw,
    };
    Ok(finish(input.voltage, rules, detail))
}

/// Note 6: cooktops plus up to two wall ovens become one range.
fn combine_note6(appliances: Vec<ApplianceRating>, rules: &mut RuleTrace) -> (Vec<ApplianceRating>, bool) {
    let cooktops = appliances.iter().filter(|a| a.kind == ApplianceKind::Cooktop).count();
    let ovens = appliances.iter().filter(|a| a.kind == ApplianceKind::WallOven).count();
    if cooktops == 0 || ovens > 2 {
        return (appliances, false);
    }

    let (merged, mut kept): (Vec<ApplianceRating>, Vec<ApplianceRating>) =
        appliances.into_iter().partition(|a| a.kind != ApplianceKind::Range);
    let combined_kw = total_kw(&merged);
    debug!(cooktops, ovens, combined_kw, "Note 6 combine");
    rules.record(
        Rule::RangeNote6,
        format!(
            "{} cooktop(s) and {} wall oven(s) treated as one {:.2} kW range",
            cooktops, ovens, combined_kw
        ),
    );
    kept.push(ApplianceRating::new(ApplianceKind::Range, combined_kw));
    (kept, true)
}

fn note3_demand(small: &[ApplianceRating], all_small: bool, rules: &mut RuleTrace) -> SmallGroupDemand {
    let col_a: Vec<ApplianceRating> = small.iter().copied().filter(ApplianceRating::in_column_a).collect();
    let col_b: Vec<ApplianceRating> = small.iter().copied().filter(ApplianceRating::in_column_b).collect();
    let column_a = ColumnSubtotal::new(&col_a, column_a_factor);
    let column_b = ColumnSubtotal::new(&col_b, column_b_factor);
    let demand_kw = column_a.demand_kw + column_b.demand_kw;

    debug!(
        count_a = column_a.count,
        factor_a = column_a.factor,
        count_b = column_b.count,
        factor_b = column_b.factor,
        "Note 3 columns A/B"
    );
    let scope = if all_small { "all appliances small" } else { "small appliances" };
    rules.record(
        Rule::RangeNote3,
        format!(
            "{}: Column A {} x {:.2} kW x {:.2}, Column B {} x {:.2} kW x {:.2} = {:.2} kW",
            scope,
            column_a.count,
            column_a.sum_kw,
            column_a.factor,
            column_b.count,
            column_b.sum_kw,
            column_b.factor,
            demand_kw
        ),
    );

    SmallGroupDemand {
        column_a,
        column_b,
        total_kw: column_a.sum_kw + column_b.sum_kw,
        demand_kw,
    }
}

fn column_c_demand(
    set: &[ApplianceRating],
    scope: &str,
    alternate: bool,
    rules: &mut RuleTrace,
) -> Option<ColumnCDemand> {
    if set.is_empty() {
        return None;
    }
    let count = set.len() as u32;
    let base_kw = column_c_base_kw(count);
    let ratings: Vec<f64> = set.iter().map(|a| a.kw).collect();

    let adjustment = if all_equal(&ratings) && ratings[0] > NOTE_REFERENCE_KW {
        ColumnCAdjustment::Note1 {
            rating_kw: ratings[0],
            increments: kw_increments_above(ratings[0], NOTE_REFERENCE_KW),
        }
    } else if ratings.iter().any(|&kw| kw > SMALL_UPPER_KW) {
        if alternate {
            note2_alternate(&ratings)
        } else {
            let adjusted_sum: f64 = ratings.iter().map(|&kw| kw.max(NOTE_REFERENCE_KW)).sum();
            let average_kw = adjusted_sum / f64::from(count);
            ColumnCAdjustment::Note2 {
                average_kw,
                increments: kw_increments_above(average_kw, NOTE_REFERENCE_KW),
            }
        }
    } else {
        ColumnCAdjustment::None
    };

    let demand_kw = base_kw * adjustment.factor();
    debug!(count, base_kw, factor = adjustment.factor(), demand_kw, "Column C");
    rules.record(
        Rule::RangeColumnC,
        format!("{}: {} appliance(s), maximum demand {} kW", scope, count, base_kw),
    );
    match adjustment {
        ColumnCAdjustment::Note1 { .. } => rules.record(Rule::RangeNote1, adjustment.note()),
        ColumnCAdjustment::Note2 { .. } => rules.record(Rule::RangeNote2, adjustment.note()),
        ColumnCAdjustment::Note2Alternate { .. } => rules.record(Rule::RangeNote2Alternate, adjustment.note()),
        ColumnCAdjustment::None => {}
    }

    Some(ColumnCDemand {
        count,
        base_kw,
        adjustment,
        demand_kw,
    })
}

fn note2_alternate(ratings: &[f64]) -> ColumnCAdjustment {
    let at_least_12: Vec<f64> = ratings.iter().copied().filter(|&kw| kw >= NOTE_REFERENCE_KW).collect();
    if at_least_12.is_empty() {
        return ColumnCAdjustment::Note2Alternate {
            average_kw: None,
            increments: 0,
        };
    }
    let average_kw = at_least_12.iter().sum::<f64>() / at_least_12.len() as f64;
    ColumnCAdjustment::Note2Alternate {
        average_kw: Some(average_kw),
        increments: kw_increments_above(average_kw, NOTE_REFERENCE_KW),
    }
}

/// Cooking loads are not continuous, so the breaker is sized on demand current.
fn finish(voltage: f64, mut rules: RuleTrace, detail: RangeDetail) -> DemandResult {
    let demand_va = VoltAmperes::from(Kilowatts(detail.demand_kw)).value();
    let amps = VoltAmperes(demand_va).current_at(Volts(voltage)).value();
    let breaker = suggest_breaker(amps);
    if breaker == BreakerRating::ExceedsTable {
        rules.record(Rule::BreakerExceedsTable, format!("{:.2} A", round2(amps)));
    }
    debug!(demand_va, amps, %breaker, "range breaker");

    let subtotals = DemandSubtotals {
        range_va: demand_va,
        ..Default::default()
    };
    DemandResult::new(subtotals, demand_va, voltage, breaker, rules, DemandDetail::Range(detail))
}
