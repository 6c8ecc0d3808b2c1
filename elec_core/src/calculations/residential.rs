//! # Dwelling Service Demand
//!
//! Whole-dwelling demand load per NEC Article 220, Standard (Part III) or
//! Optional (Part IV) method.
//!
//! ## Load Groups
//!
//! - **General**: floor area × VA rate + 1500 VA per small-appliance circuit
//!   + 1500 VA per laundry circuit
//! - **Other**, **heating**, **cooling**, **motor**, **EV**: lists of
//!   [`LoadItem`]s summed at their effective VA
//! - **HVAC**: the larger of heating and cooling, never both
//! - **Motor**: group sum plus 25% of the single largest nameplate rating
//! - **EV**: added at full value under both methods
//!
//! ## Methods
//!
//! - Standard: tiers apply to the general load only.
//! - Optional: tiers apply to general + other + HVAC (+ motors, see
//!   [`OptionalMotorHandling`]) as one base.
//!
//! The breaker is sized on the service current divided by 0.8.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::breaker::{continuous_load_current, suggest_breaker_continuous, BreakerRating};
use crate::errors::{require_non_negative, require_positive, CalcResult};
use crate::loads::{total_effective_va, validate_group, LoadItem};
use crate::numeric::{percent, round2};
use crate::trace::{Rule, RuleTrace};
use crate::units::{AreaUnit, VoltAmperes, Volts};

use super::demand_result::{DemandDetail, DemandResult, DemandSubtotals};

/// VA per small-appliance or laundry branch circuit.
pub const VA_PER_CIRCUIT: f64 = 1500.0;
/// Fraction of the largest motor added once.
pub const LARGEST_MOTOR_FRACTION: f64 = 0.25;

/// General lighting and receptacle load settings.
///
/// ## JSON Example
///
/// ```json
/// {
///   "floor_area": 100.0,
///   "area_unit": "SquareMeters",
///   "small_appliance_circuits": 2,
///   "laundry_circuits": 1
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralLoad {
    /// Dwelling floor area in `area_unit`
    pub floor_area: f64,

    #[serde(default)]
    pub area_unit: AreaUnit,

    /// VA per unit area; defaults to 33 VA/m² or 3 VA/ft²
    #[serde(default)]
    pub va_per_area: Option<f64>,

    pub small_appliance_circuits: u32,

    pub laundry_circuits: u32,
}

impl GeneralLoad {
    /// VA rate in effect
    pub fn va_rate(&self) -> f64 {
        self.va_per_area.unwrap_or_else(|| self.area_unit.default_va_rate())
    }

    /// floor_area × rate
    pub fn floor_va(&self) -> f64 {
        self.floor_area * self.va_rate()
    }

    pub fn small_appliance_va(&self) -> f64 {
        f64::from(self.small_appliance_circuits) * VA_PER_CIRCUIT
    }

    pub fn laundry_va(&self) -> f64 {
        f64::from(self.laundry_circuits) * VA_PER_CIRCUIT
    }

    /// Total general load before demand factors
    pub fn total_va(&self) -> f64 {
        self.floor_va() + self.small_appliance_va() + self.laundry_va()
    }

    fn validate(&self) -> CalcResult<()> {
        require_non_negative("general.floor_area", self.floor_area)?;
        if let Some(rate) = self.va_per_area {
            require_non_negative("general.va_per_area", rate)?;
        }
        Ok(())
    }
}

/// Load calculation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CalculationMethod {
    /// NEC 220 Part III
    #[default]
    Standard,
    /// NEC 220 Part IV
    Optional,
}

impl CalculationMethod {
    pub const ALL: [CalculationMethod; 2] = [CalculationMethod::Standard, CalculationMethod::Optional];

    pub fn display_name(&self) -> &'static str {
        match self {
            CalculationMethod::Standard => "NEC 220 Part III (Standard)",
            CalculationMethod::Optional => "NEC 220 Part IV (Optional)",
        }
    }
}

impl std::fmt::Display for CalculationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// First block / remainder demand tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DemandTable {
    /// Size of the first block (VA)
    pub first_va: f64,
    /// Percent applied to the first block
    pub first_percent: f64,
    /// Percent applied above the first block
    pub remainder_percent: f64,
}

impl DemandTable {
    /// Defaults for a method: 3000 VA / 100% / 35% or 10000 VA / 100% / 40%.
    pub fn for_method(method: CalculationMethod) -> Self {
        match method {
            CalculationMethod::Standard => DemandTable {
                first_va: 3000.0,
                first_percent: 100.0,
                remainder_percent: 35.0,
            },
            CalculationMethod::Optional => DemandTable {
                first_va: 10_000.0,
                first_percent: 100.0,
                remainder_percent: 40.0,
            },
        }
    }

    /// "first_va=3000, first_percent=100, remainder_percent=35"
    pub fn settings(&self) -> String {
        format!(
            "first_va={}, first_percent={}, remainder_percent={}",
            self.first_va, self.first_percent, self.remainder_percent
        )
    }

    fn validate(&self) -> CalcResult<()> {
        require_non_negative("demand_table.first_va", self.first_va)?;
        require_non_negative("demand_table.first_percent", self.first_percent)?;
        require_non_negative("demand_table.remainder_percent", self.remainder_percent)?;
        Ok(())
    }
}

/// Motor treatment under the Optional method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OptionalMotorHandling {
    /// Motor contributions join the tiered base; the 25% uplift is added after
    #[default]
    InDemandBase,
    /// Motors stay out of the base; the full motor load is added after
    AddedAtFullValue,
}

/// Input parameters for a dwelling service calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Main house",
///   "general": { "floor_area": 100.0, "small_appliance_circuits": 2, "laundry_circuits": 1 },
///   "other_loads": [{ "name": "Dryer", "rated_va": 5000.0, "quantity": 1 }],
///   "heating_loads": [],
///   "cooling_loads": [{ "name": "Air conditioner", "rated_va": 4000.0, "quantity": 1 }],
///   "motor_loads": [],
///   "ev_loads": [],
///   "method": "Standard",
///   "voltage": 230.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResidentialInput {
    #[serde(default)]
    pub label: String,

    pub general: GeneralLoad,

    /// Fixed appliances and other loads
    #[serde(default)]
    pub other_loads: Vec<LoadItem>,

    #[serde(default)]
    pub heating_loads: Vec<LoadItem>,

    #[serde(default)]
    pub cooling_loads: Vec<LoadItem>,

    #[serde(default)]
    pub motor_loads: Vec<LoadItem>,

    /// EV chargers, excluded from demand factors
    #[serde(default)]
    pub ev_loads: Vec<LoadItem>,

    #[serde(default)]
    pub method: CalculationMethod,

    /// Tier settings; `None` uses [`DemandTable::for_method`]
    #[serde(default)]
    pub demand_table: Option<DemandTable>,

    /// Service voltage
    pub voltage: f64,

    #[serde(default)]
    pub optional_motor_handling: OptionalMotorHandling,
}

impl ResidentialInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("voltage", self.voltage)?;
        self.general.validate()?;
        for (group, items) in self.load_groups() {
            validate_group(group, items)?;
        }
        self.demand_table().validate()?;
        Ok(())
    }

    /// Tier settings in effect
    pub fn demand_table(&self) -> DemandTable {
        self.demand_table.unwrap_or_else(|| DemandTable::for_method(self.method))
    }

    /// Item lists with their field names
    pub fn load_groups(&self) -> [(&'static str, &[LoadItem]); 5] {
        [
            ("other_loads", self.other_loads.as_slice()),
            ("heating_loads", self.heating_loads.as_slice()),
            ("cooling_loads", self.cooling_loads.as_slice()),
            ("motor_loads", self.motor_loads.as_slice()),
            ("ev_loads", self.ev_loads.as_slice()),
        ]
    }
}

/// Breakdown of a dwelling calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidentialDetail {
    pub method: CalculationMethod,
    pub demand_table: DemandTable,
    pub optional_motor_handling: OptionalMotorHandling,

    pub area_unit: AreaUnit,
    pub floor_area: f64,
    pub va_per_area: f64,
    pub floor_va: f64,
    pub small_appliance_va: f64,
    pub laundry_va: f64,

    /// Σ motor contributions
    pub motor_sum_va: f64,
    /// Largest per-unit motor rating among motors with quantity > 0
    pub largest_motor_va: f64,
    /// 25% of `largest_motor_va`
    pub motor_uplift_va: f64,

    /// Load the tiers were applied to
    pub tier_base_va: f64,
    /// Portion of the base inside the first block
    pub first_block_va: f64,
    /// Portion of the base above the first block
    pub remainder_block_va: f64,
    /// Base after tiers
    pub tiered_va: f64,

    /// Service current divided by 0.8
    pub continuous_amps: f64,
}

/// Per-unit rating of the largest motor actually present.
fn largest_motor(motors: &[LoadItem]) -> f64 {
    motors
        .iter()
        .filter(|m| m.quantity > 0)
        .map(|m| m.rated_va)
        .fold(0.0, f64::max)
}

/// Split `base` at `first_va` and apply the tier percentages.
///
/// Returns (first block, remainder block, tiered value).
fn apply_tiers(base: f64, first_va: f64, first_fraction: f64, remainder_fraction: f64) -> (f64, f64, f64) {
    let first_block = base.min(first_va);
    let remainder_block = (base - first_va).max(0.0);
    let tiered = first_block * first_fraction + remainder_block * remainder_fraction;
    (first_block, remainder_block, tiered)
}

/// Calculate dwelling service demand.
///
/// # Errors
///
/// * `InvalidInput` for a non-positive voltage, a negative floor area, VA
///   rate, item rating, multiplier or tier setting, or any non-finite value.
pub fn calculate(input: &ResidentialInput) -> CalcResult<DemandResult> {
    input.validate()?;
    let table = input.demand_table();
    let mut rules = RuleTrace::new();

    let general = &input.general;
    let general_va = general.total_va();
    rules.record(
        Rule::GeneralLoad,
        format!(
            "{} {} x {} VA + {} small-appliance + {} laundry circuit(s) x {} VA = {:.2} VA",
            general.floor_area,
            general.area_unit.symbol(),
            general.va_rate(),
            general.small_appliance_circuits,
            general.laundry_circuits,
            VA_PER_CIRCUIT,
            general_va
        ),
    );

    for (group, items) in input.load_groups() {
        for item in items {
            trace!(group, name = %item.name, va = item.effective_va(), "load item");
        }
    }

    let other_va = total_effective_va(&input.other_loads);
    let heating_va = total_effective_va(&input.heating_loads);
    let cooling_va = total_effective_va(&input.cooling_loads);
    let hvac_va = heating_va.max(cooling_va);
    if heating_va > 0.0 || cooling_va > 0.0 {
        let (used, dropped) = if heating_va >= cooling_va {
            ("heating", "cooling")
        } else {
            ("cooling", "heating")
        };
        rules.record(
            Rule::NoncoincidentHvac,
            format!(
                "heating {:.2} VA, cooling {:.2} VA: {} used, {} omitted",
                heating_va, cooling_va, used, dropped
            ),
        );
    }

    let motor_sum_va = total_effective_va(&input.motor_loads);
    let largest_motor_va = largest_motor(&input.motor_loads);
    let motor_uplift_va = LARGEST_MOTOR_FRACTION * largest_motor_va;
    let motor_va = motor_sum_va + motor_uplift_va;
    if largest_motor_va > 0.0 {
        rules.record(
            Rule::LargestMotor,
            format!("25% of largest motor {:.2} VA = {:.2} VA", largest_motor_va, motor_uplift_va),
        );
    }

    let ev_va = total_effective_va(&input.ev_loads);
    if ev_va > 0.0 {
        rules.record(Rule::EvExcluded, format!("{:.2} VA added without demand factor", ev_va));
    }

    let remainder_fraction = percent(table.remainder_percent);
    let (tier_base_va, first_block_va, remainder_block_va, tiered_va, demand_va) = match input.method {
        CalculationMethod::Standard => {
            let (first, remainder, tiered) = apply_tiers(general_va, table.first_va, 1.0, remainder_fraction);
            rules.record(
                Rule::StandardDemandTiers,
                format!(
                    "first {:.2} VA at 100%, remainder {:.2} VA at {}% = {:.2} VA",
                    first, remainder, table.remainder_percent, tiered
                ),
            );
            let total = tiered + other_va + hvac_va + motor_va + ev_va;
            (general_va, first, remainder, tiered, total)
        }
        CalculationMethod::Optional => {
            let motors_in_base = input.optional_motor_handling == OptionalMotorHandling::InDemandBase;
            let base = general_va + other_va + hvac_va + if motors_in_base { motor_sum_va } else { 0.0 };
            let (first, remainder, tiered) =
                apply_tiers(base, table.first_va, percent(table.first_percent), remainder_fraction);
            rules.record(
                Rule::OptionalDemandTiers,
                format!(
                    "first {:.2} VA at {}%, remainder {:.2} VA at {}% = {:.2} VA",
                    first, table.first_percent, remainder, table.remainder_percent, tiered
                ),
            );
            let motor_after = if motors_in_base { motor_uplift_va } else { motor_va };
            (base, first, remainder, tiered, tiered + ev_va + motor_after)
        }
    };
    debug!(method = ?input.method, tier_base_va, tiered_va, demand_va, "residential demand");

    let amps = VoltAmperes(demand_va).current_at(Volts(input.voltage)).value();
    let continuous_amps = continuous_load_current(amps);
    let breaker = suggest_breaker_continuous(amps);
    rules.record(
        Rule::ContinuousLoadDerate,
        format!("{:.2} A / 0.8 = {:.2} A -> {}", round2(amps), round2(continuous_amps), breaker),
    );
    if breaker == BreakerRating::ExceedsTable {
        rules.record(Rule::BreakerExceedsTable, format!("{:.2} A", round2(continuous_amps)));
    }
    debug!(amps, continuous_amps, %breaker, "residential breaker");

    let subtotals = DemandSubtotals {
        general_va,
        other_va,
        heating_va,
        cooling_va,
        hvac_va,
        motor_va,
        ev_va,
        range_va: 0.0,
    };
    let detail = ResidentialDetail {
        method: input.method,
        demand_table: table,
        optional_motor_handling: input.optional_motor_handling,
        area_unit: general.area_unit,
        floor_area: general.floor_area,
        va_per_area: general.va_rate(),
        floor_va: general.floor_va(),
        small_appliance_va: general.small_appliance_va(),
        laundry_va: general.laundry_va(),
        motor_sum_va,
        largest_motor_va,
        motor_uplift_va,
        tier_base_va,
        first_block_va,
        remainder_block_va,
        tiered_va,
        continuous_amps,
    };
    Ok(DemandResult::new(
        subtotals,
        demand_va,
        input.voltage,
        breaker,
        rules,
        DemandDetail::Residential(detail),
    ))
}
