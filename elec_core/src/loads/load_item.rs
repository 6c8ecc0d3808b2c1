//! Dwelling load items and the groups they belong to.

use serde::{Deserialize, Serialize};

use crate::errors::{require_non_negative, CalcResult};

fn default_multiplier() -> f64 {
    100.0
}

/// One line of connected load (e.g., "Dryer, 5000 VA x 1").
///
/// Effective contribution = `rated_va × quantity × demand_multiplier_percent / 100`.
///
/// ## JSON Example
///
/// ```json
/// { "name": "Water Heater", "rated_va": 4500.0, "quantity": 1, "demand_multiplier_percent": 100.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadItem {
    /// Description shown in reports
    pub name: String,
    /// Nameplate rating per unit (VA)
    pub rated_va: f64,
    /// Number of identical units
    pub quantity: u32,
    /// Per-item demand multiplier in percent (default 100)
    #[serde(default = "default_multiplier")]
    pub demand_multiplier_percent: f64,
}

impl LoadItem {
    /// Item at 100% multiplier
    pub fn new(name: impl Into<String>, rated_va: f64, quantity: u32) -> Self {
        LoadItem {
            name: name.into(),
            rated_va,
            quantity,
            demand_multiplier_percent: default_multiplier(),
        }
    }

    /// Set the demand multiplier (builder pattern)
    pub fn with_multiplier(mut self, percent: f64) -> Self {
        self.demand_multiplier_percent = percent;
        self
    }

    /// rated_va × quantity, before the multiplier
    pub fn connected_va(&self) -> f64 {
        self.rated_va * f64::from(self.quantity)
    }

    /// rated_va × quantity × multiplier / 100
    pub fn effective_va(&self) -> f64 {
        self.connected_va() * self.demand_multiplier_percent / 100.0
    }

    /// Check VA and multiplier. `field` is the path prefix used in errors.
    pub fn validate(&self, field: &str) -> CalcResult<()> {
        require_non_negative(&format!("{}.rated_va", field), self.rated_va)?;
        require_non_negative(
            &format!("{}.demand_multiplier_percent", field),
            self.demand_multiplier_percent,
        )?;
        Ok(())
    }
}

/// Category a load line is reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadCategory {
    /// Lighting, small-appliance and laundry circuits
    General,
    /// Fixed appliances and other loads
    Other,
    Heating,
    Cooling,
    Motor,
    /// Electric vehicle charging
    Ev,
    /// Cooking appliances (range engine)
    Cooking,
}

impl LoadCategory {
    /// All categories in report order
    pub const ALL: [LoadCategory; 7] = [
        LoadCategory::General,
        LoadCategory::Other,
        LoadCategory::Heating,
        LoadCategory::Cooling,
        LoadCategory::Motor,
        LoadCategory::Ev,
        LoadCategory::Cooking,
    ];

    /// Lowercase key used in exports
    pub fn key(&self) -> &'static str {
        match self {
            LoadCategory::General => "general",
            LoadCategory::Other => "other",
            LoadCategory::Heating => "heating",
            LoadCategory::Cooling => "cooling",
            LoadCategory::Motor => "motor",
            LoadCategory::Ev => "ev",
            LoadCategory::Cooking => "cooking",
        }
    }

    /// Display name for section headings
    pub fn display_name(&self) -> &'static str {
        match self {
            LoadCategory::General => "General lighting & receptacles",
            LoadCategory::Other => "Other fixed loads",
            LoadCategory::Heating => "Heating",
            LoadCategory::Cooling => "Cooling",
            LoadCategory::Motor => "Motor loads",
            LoadCategory::Ev => "EV charging",
            LoadCategory::Cooking => "Cooking appliances",
        }
    }
}

impl std::fmt::Display for LoadCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Sum of effective contributions.
pub fn total_effective_va(items: &[LoadItem]) -> f64 {
    items.iter().map(LoadItem::effective_va).sum()
}

/// Validate every item, reporting paths as `group[i]`.
pub fn validate_group(group: &str, items: &[LoadItem]) -> CalcResult<()> {
    for (i, item) in items.iter().enumerate() {
        item.validate(&format!("{}[{}]", group, i))?;
    }
    Ok(())
}
